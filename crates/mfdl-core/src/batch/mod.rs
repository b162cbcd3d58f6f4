//! The driver: sequential per-URL pipeline with failure isolation.
//!
//! Each URL walks validate → fetch → extract → download and always reaches a
//! terminal state; one URL's failure is recorded and the batch moves on. The
//! accumulating result list is an explicit value threaded through the loop.

mod report;

pub use report::{BatchReport, DownloadResult, Outcome};

use std::fmt;
use std::path::PathBuf;

use crate::download::{self, DownloadOptions, TransferProgress};
use crate::error::Error;
use crate::extract::LinkExtractor;
use crate::fetch;
use crate::http::HttpOptions;
use crate::profile::SiteProfile;
use crate::share_link::ShareLink;
use crate::storage::CollisionPolicy;

/// Pipeline position of a URL, for logging and failure context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Fetching,
    Extracting,
    Downloading,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Validating => "validating",
            Stage::Fetching => "fetching",
            Stage::Extracting => "extracting",
            Stage::Downloading => "downloading",
        })
    }
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Where downloaded files land.
    pub dest_dir: PathBuf,
    pub http: HttpOptions,
    pub collision: CollisionPolicy,
    /// Resolve and report direct links without downloading.
    pub dump_links: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            dest_dir: PathBuf::from("."),
            http: HttpOptions::default(),
            collision: CollisionPolicy::default(),
            dump_links: false,
        }
    }
}

/// Progress callback: filename being written plus the transfer snapshot.
pub type ProgressFn<'a> = &'a mut dyn FnMut(&str, &TransferProgress);

/// Runs the pipeline over every URL, in order. Always returns exactly one
/// result per input; never aborts early.
pub fn run_batch(
    urls: &[String],
    profile: &SiteProfile,
    extractor: &dyn LinkExtractor,
    opts: &BatchOptions,
    mut progress: Option<ProgressFn<'_>>,
) -> BatchReport {
    let mut results = Vec::with_capacity(urls.len());
    for (index, raw) in urls.iter().enumerate() {
        tracing::info!(url = %raw, n = index + 1, of = urls.len(), "processing");
        let outcome = match process_url(raw, profile, extractor, opts, progress.as_deref_mut()) {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(url = %raw, %error, "failed");
                Outcome::Failed { error }
            }
        };
        results.push(DownloadResult {
            source_url: raw.clone(),
            outcome,
        });
    }
    BatchReport { results }
}

fn process_url<'a>(
    raw: &str,
    profile: &SiteProfile,
    extractor: &dyn LinkExtractor,
    opts: &BatchOptions,
    mut progress: Option<&mut (dyn FnMut(&str, &TransferProgress) + 'a)>,
) -> Result<Outcome, Error> {
    tracing::debug!(url = raw, stage = %Stage::Validating);
    let link = ShareLink::parse(raw, profile)?;

    tracing::debug!(url = %link, stage = %Stage::Fetching);
    let page = fetch::fetch_share_page(&link, &opts.http)?;

    tracing::debug!(url = %link, stage = %Stage::Extracting);
    let target = extractor.extract(&page.body)?;

    if opts.dump_links {
        return Ok(Outcome::Resolved { target });
    }

    tracing::debug!(url = %link, stage = %Stage::Downloading, direct_url = %target.direct_url);
    let download_opts = DownloadOptions {
        http: opts.http.clone(),
        collision: opts.collision,
    };
    let name = target.filename.clone();
    let mut on_chunk = |p: &TransferProgress| {
        if let Some(cb) = progress.as_mut() {
            cb(&name, p);
        }
    };
    let outcome = download::download_file(&target, &opts.dest_dir, &download_opts, &mut on_chunk)?;

    Ok(Outcome::Succeeded {
        path: outcome.path,
        bytes_written: outcome.bytes_written,
    })
}
