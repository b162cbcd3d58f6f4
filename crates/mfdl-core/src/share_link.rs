//! Share-link validation.
//!
//! Pure shape check against a `SiteProfile`; no I/O. A `ShareLink` is the
//! only thing the fetcher will accept, so malformed input is rejected before
//! any request is made.

use url::Url;

use crate::error::Error;
use crate::naming;
use crate::profile::SiteProfile;

/// A validated share URL plus the pieces parsed out of its path:
/// `/file/<key>/<name>/...` or `/file_premium/<key>/<name>/...`.
#[derive(Debug, Clone)]
pub struct ShareLink {
    url: Url,
    /// Alphanumeric file key from the share path.
    pub file_key: String,
    /// Percent-decoded filename segment from the share path.
    pub name_hint: String,
}

impl ShareLink {
    /// Validates `raw` against the profile's scheme/host/path shape.
    pub fn parse(raw: &str, profile: &SiteProfile) -> Result<ShareLink, Error> {
        let url = Url::parse(raw.trim())
            .map_err(|e| Error::invalid_url(format!("not a URL: {e}")))?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(Error::invalid_url(format!("unsupported scheme '{other}'"))),
        }

        let host = url
            .host_str()
            .ok_or_else(|| Error::invalid_url("missing host"))?;
        if !profile.hosts.iter().any(|h| h.eq_ignore_ascii_case(host)) {
            return Err(Error::invalid_url(format!("unexpected host '{host}'")));
        }

        let mut segments = url
            .path_segments()
            .ok_or_else(|| Error::invalid_url("missing path"))?;

        let prefix = segments.next().unwrap_or("");
        if !profile.share_path_prefixes.iter().any(|p| p == prefix) {
            return Err(Error::invalid_url(format!(
                "path does not start with a share prefix (got '/{prefix}')"
            )));
        }

        let key = segments.next().unwrap_or("");
        if key.len() < profile.min_key_len || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::invalid_url(format!("bad file key '{key}'")));
        }

        let name = segments.next().unwrap_or("");
        if name.is_empty() {
            return Err(Error::invalid_url("missing filename segment"));
        }

        Ok(ShareLink {
            file_key: key.to_string(),
            name_hint: naming::percent_decode(name),
            url,
        })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl std::fmt::Display for ShareLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}
