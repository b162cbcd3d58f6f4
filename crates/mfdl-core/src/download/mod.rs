//! Streaming file download.
//!
//! One GET of the direct URL, body written chunk-by-chunk into a `.part`
//! file, atomic rename once the transfer and its length check pass. No
//! retry: a mid-stream failure leaves the `.part` file behind and surfaces
//! as one failed URL.

mod headers;
mod progress;

pub use progress::TransferProgress;

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::str;
use std::time::Instant;

use curl::easy::Easy;

use crate::error::Error;
use crate::extract::ResolvedTarget;
use crate::http::{self, HttpOptions};
use crate::naming;
use crate::storage::{self, CollisionPolicy, PartFile};

#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    pub http: HttpOptions,
    pub collision: CollisionPolicy,
}

#[derive(Debug)]
pub struct DownloadOutcome {
    /// Final local path (or the pre-existing file when skipped).
    pub path: PathBuf,
    /// Bytes written by this run; 0 when an existing file was kept.
    pub bytes_written: u64,
}

/// Downloads `target` into `dest_dir`, reporting progress through the
/// caller's callback as chunks arrive.
pub fn download_file(
    target: &ResolvedTarget,
    dest_dir: &Path,
    opts: &DownloadOptions,
    progress: &mut dyn FnMut(&TransferProgress),
) -> Result<DownloadOutcome, Error> {
    let provisional = naming::derive_filename(Some(&target.filename), None, &target.direct_url);

    let existing = dest_dir.join(&provisional);
    if opts.collision == CollisionPolicy::Skip && existing.exists() {
        tracing::info!(path = %existing.display(), "destination exists, skipping");
        return Ok(DownloadOutcome {
            path: existing,
            bytes_written: 0,
        });
    }

    std::fs::create_dir_all(dest_dir)?;
    let temp_path = storage::part_path(&dest_dir.join(&provisional));
    let mut part = PartFile::create(temp_path)?;

    let mut easy = Easy::new();
    configure_file_get(&mut easy, &target.direct_url, &opts.http).map_err(download_err)?;

    let started = Instant::now();
    let mut header_lines: Vec<String> = Vec::new();
    let mut bytes_written: u64 = 0;
    let mut write_error: Option<std::io::Error> = None;
    // Updated from the header callback so the progress total switches from
    // the page's size label to the authoritative Content-Length.
    let content_length = Cell::new(None::<u64>);
    let size_hint = target.size_hint;

    let perform_result = {
        let content_length = &content_length;
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    let line = line.trim_end();
                    if line.starts_with("HTTP/") {
                        content_length.set(None);
                    } else if let Some(n) = headers::content_length_of_line(line) {
                        content_length.set(Some(n));
                    }
                    header_lines.push(line.to_string());
                }
                true
            })
            .map_err(download_err)?;
        transfer
            .write_function(|data| match part.write(data) {
                Ok(()) => {
                    bytes_written += data.len() as u64;
                    progress(&TransferProgress {
                        bytes_done: bytes_written,
                        total_bytes: content_length.get().or(size_hint),
                        elapsed_secs: started.elapsed().as_secs_f64(),
                    });
                    Ok(data.len())
                }
                Err(e) => {
                    write_error = Some(e);
                    // Abort the transfer; the error is picked up below.
                    Ok(0)
                }
            })
            .map_err(download_err)?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(Error::FileSystem(e));
    }
    perform_result.map_err(download_err)?;

    let status = easy.response_code().map_err(download_err)?;
    if !(200..300).contains(&status) {
        return Err(Error::Download(format!("direct link returned HTTP {status}")));
    }

    let meta = headers::parse_header_lines(&header_lines);
    if let Some(expected) = meta.content_length {
        if bytes_written != expected {
            return Err(Error::Download(format!(
                "partial transfer: wrote {bytes_written} of {expected} bytes"
            )));
        }
    }

    let final_name = naming::derive_filename(
        Some(&target.filename),
        meta.content_disposition.as_deref(),
        &target.direct_url,
    );
    let final_path = match storage::resolve_collision(dest_dir, &final_name, opts.collision) {
        Some(path) => path,
        None => {
            // The name came into existence mid-transfer; honor the policy.
            let kept = dest_dir.join(&final_name);
            tracing::info!(path = %kept.display(), "destination appeared during transfer, skipping");
            part.discard();
            return Ok(DownloadOutcome {
                path: kept,
                bytes_written: 0,
            });
        }
    };
    part.finalize(&final_path)?;

    tracing::info!(
        path = %final_path.display(),
        bytes = bytes_written,
        "download complete"
    );

    Ok(DownloadOutcome {
        path: final_path,
        bytes_written,
    })
}

fn configure_file_get(easy: &mut Easy, url: &str, opts: &HttpOptions) -> Result<(), curl::Error> {
    http::configure(easy, opts)?;
    easy.url(url)?;
    easy.get(true)
}

fn download_err(e: curl::Error) -> Error {
    Error::Download(e.to_string())
}
