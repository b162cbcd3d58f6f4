//! CLI for the mfdl downloader.

mod progress;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use mfdl_core::batch::{self, BatchOptions, Outcome};
use mfdl_core::config;
use mfdl_core::extract::PageExtractor;
use mfdl_core::http::HttpOptions;
use mfdl_core::profile::SiteProfile;
use mfdl_core::storage::CollisionPolicy;

use progress::ProgressPrinter;

/// Download shared files from Mediafire share links.
#[derive(Debug, Parser)]
#[command(name = "mfdl", version)]
#[command(about = "Download shared files from Mediafire share links", long_about = None)]
pub struct Cli {
    /// Share URLs to download (processed in order).
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Directory to save downloaded files into.
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Resolve direct links and print them without downloading.
    #[arg(long)]
    pub dump_links: bool,

    /// Overwrite existing files instead of renaming with a " (n)" suffix.
    #[arg(long, conflicts_with = "skip_existing")]
    pub overwrite: bool,

    /// Skip URLs whose destination file already exists.
    #[arg(long)]
    pub skip_existing: bool,

    /// Whole-transfer timeout per HTTP request, in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Debug-level logging.
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// No progress output (summary lines are still printed).
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Runs the batch and returns the process exit code.
pub fn run(args: Cli) -> Result<i32> {
    let cfg = config::load_or_init()?;
    tracing::debug!(?cfg, "loaded config");

    let opts = BatchOptions {
        dest_dir: args.output_dir.clone(),
        http: HttpOptions {
            timeout: Duration::from_secs(args.timeout.unwrap_or(cfg.timeout_secs)),
            user_agent: cfg.user_agent.clone(),
            receive_buffer_bytes: cfg.receive_buffer_bytes,
            ..HttpOptions::default()
        },
        collision: collision_policy(&args, &cfg),
        dump_links: args.dump_links,
    };

    let profile = SiteProfile::mediafire();
    let extractor = PageExtractor::new(profile.clone());

    let mut printer = ProgressPrinter::new();
    let mut on_progress = |name: &str, p: &mfdl_core::download::TransferProgress| {
        printer.update(name, p);
    };
    let progress = if args.quiet || args.dump_links {
        None
    } else {
        Some(&mut on_progress as batch::ProgressFn<'_>)
    };

    let report = batch::run_batch(&args.urls, &profile, &extractor, &opts, progress);
    printer.finish();

    for result in &report.results {
        match &result.outcome {
            Outcome::Succeeded { path, bytes_written } => {
                println!("OK      {} -> {} ({} bytes)", result.source_url, path.display(), bytes_written);
            }
            Outcome::Resolved { target } => {
                println!("{}\t{}", target.direct_url, target.filename);
            }
            Outcome::Failed { error } => {
                println!("FAILED  {}: {}", result.source_url, error);
            }
        }
    }
    if !report.all_succeeded() {
        eprintln!("{} of {} URL(s) failed", report.failed(), report.results.len());
    }

    Ok(report.exit_code())
}

fn collision_policy(args: &Cli, cfg: &config::MfdlConfig) -> CollisionPolicy {
    if args.overwrite {
        CollisionPolicy::Overwrite
    } else if args.skip_existing {
        CollisionPolicy::Skip
    } else {
        cfg.collision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn urls_are_required() {
        assert!(Cli::try_parse_from(["mfdl"]).is_err());
    }

    #[test]
    fn parses_urls_and_defaults() {
        let cli = Cli::try_parse_from(["mfdl", "https://www.mediafire.com/file/k/n/file"]).unwrap();
        assert_eq!(cli.urls.len(), 1);
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(!cli.overwrite && !cli.skip_existing && !cli.dump_links);
        assert!(cli.timeout.is_none());
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "mfdl",
            "-o",
            "/tmp/out",
            "--timeout",
            "60",
            "--skip-existing",
            "-q",
            "url1",
            "url2",
        ])
        .unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(cli.timeout, Some(60));
        assert!(cli.skip_existing && cli.quiet);
        assert_eq!(cli.urls, vec!["url1", "url2"]);
    }

    #[test]
    fn overwrite_conflicts_with_skip() {
        assert!(Cli::try_parse_from(["mfdl", "--overwrite", "--skip-existing", "u"]).is_err());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["mfdl", "-v", "-q", "u"]).is_err());
    }

    #[test]
    fn collision_policy_resolution() {
        let cfg = config::MfdlConfig::default();
        let cli = Cli::try_parse_from(["mfdl", "--overwrite", "u"]).unwrap();
        assert_eq!(collision_policy(&cli, &cfg), CollisionPolicy::Overwrite);
        let cli = Cli::try_parse_from(["mfdl", "--skip-existing", "u"]).unwrap();
        assert_eq!(collision_policy(&cli, &cfg), CollisionPolicy::Skip);
        let cli = Cli::try_parse_from(["mfdl", "u"]).unwrap();
        assert_eq!(collision_policy(&cli, &cfg), CollisionPolicy::Rename);
    }
}
