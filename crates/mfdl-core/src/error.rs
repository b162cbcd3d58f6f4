//! Failure taxonomy for one URL's pipeline.
//!
//! Every stage failure is converted into a `Failed` batch entry at the
//! driver boundary; no error here ever aborts processing of later URLs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Input string does not match the share-link shape (scheme, host, path).
    #[error("invalid share link: {reason}")]
    InvalidUrl { reason: String },

    /// Network-level failure (or unexpected status) reaching the share page.
    #[error("share page fetch failed: {0}")]
    Fetch(String),

    /// The share page reports the file removed/expired, or returned 404/410.
    #[error("file removed or link no longer valid")]
    NotFound,

    /// The share page did not match the expected layout.
    #[error("could not extract download link: {0}")]
    Extraction(String),

    /// Network failure or unexpected status during the direct file transfer.
    #[error("download failed: {0}")]
    Download(String),

    /// Local write failure (disk full, permission denied, ...).
    #[error("filesystem error: {0}")]
    FileSystem(#[from] std::io::Error),
}

impl Error {
    /// Shorthand used by the validator.
    pub(crate) fn invalid_url(reason: impl Into<String>) -> Self {
        Error::InvalidUrl {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let e = Error::invalid_url("not http(s)");
        assert_eq!(e.to_string(), "invalid share link: not http(s)");
    }

    #[test]
    fn filesystem_wraps_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = Error::from(io);
        assert!(matches!(e, Error::FileSystem(_)));
        assert!(e.to_string().contains("denied"));
    }
}
