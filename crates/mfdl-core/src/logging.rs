//! Logging init: file under the XDG state dir, or graceful fallback to stderr.
//!
//! The log carries tracing output; user-facing lines (progress, summaries)
//! go to stdout from the CLI and never through here.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Initialize structured logging to `~/.local/state/mfdl/mfdl.log`.
/// Returns the log path. On failure (e.g. state dir unwritable) returns Err
/// so the caller can fall back to `init_logging_stderr`.
pub fn init_logging(verbose: bool) -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mfdl")?;
    let log_dir = xdg_dirs.get_state_home();
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("mfdl.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("mfdl logging initialized at {}", log_path.display());
    Ok(log_path)
}

/// Stderr-only logging. Use when `init_logging` fails so the CLI still runs.
pub fn init_logging_stderr(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "debug"
    } else {
        "info,mfdl_core=debug"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
