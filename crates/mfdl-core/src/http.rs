//! Shared libcurl handle setup.
//!
//! Both network stages (share-page fetch and direct file GET) use the same
//! base options: bounded timeouts, redirect following, and a conventional
//! browser user-agent.

use std::time::Duration;

use curl::easy::Easy;

/// Sent with every request; the share host serves bot-unfriendly pages to
/// unknown agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 15;

/// Per-request knobs shared by the fetcher and the downloader.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Whole-transfer timeout.
    pub timeout: Duration,
    /// Connect-phase timeout.
    pub connect_timeout: Duration,
    pub user_agent: String,
    /// libcurl receive buffer size; also the chunk size seen by the write
    /// callback. `None` keeps libcurl's default.
    pub receive_buffer_bytes: Option<usize>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        HttpOptions {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            receive_buffer_bytes: None,
        }
    }
}

/// Applies the shared options to a fresh handle.
pub(crate) fn configure(easy: &mut Easy, opts: &HttpOptions) -> Result<(), curl::Error> {
    easy.useragent(&opts.user_agent)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    if let Some(size) = opts.receive_buffer_bytes {
        easy.buffer_size(size)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_bounded() {
        let opts = HttpOptions::default();
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert_eq!(opts.connect_timeout, Duration::from_secs(15));
        assert!(opts.user_agent.starts_with("Mozilla/5.0"));
        assert!(opts.receive_buffer_bytes.is_none());
    }

    #[test]
    fn configure_accepts_defaults() {
        let mut easy = Easy::new();
        configure(&mut easy, &HttpOptions::default()).unwrap();
    }
}
