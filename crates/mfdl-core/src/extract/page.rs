//! Pattern-based extractor over a `SiteProfile`.

use crate::error::Error;
use crate::naming;
use crate::profile::SiteProfile;

use super::{LinkExtractor, ResolvedTarget};

/// Scans the page for the download-button anchor (falling back to any
/// direct-CDN-shaped URL), the filename element, and the size label.
#[derive(Debug, Clone)]
pub struct PageExtractor {
    profile: SiteProfile,
}

impl PageExtractor {
    pub fn new(profile: SiteProfile) -> Self {
        PageExtractor { profile }
    }

    fn find_direct_url<'a>(&self, html: &'a str) -> Option<&'a str> {
        if let Some(caps) = self.profile.anchor_pattern.captures(html) {
            return caps.name("href").map(|m| m.as_str());
        }
        self.profile
            .direct_link_pattern
            .find(html)
            .map(|m| m.as_str())
    }

    fn find_filename(&self, html: &str, direct_url: &str) -> String {
        self.profile
            .filename_pattern
            .captures(html)
            .and_then(|caps| caps.name("name"))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| naming::filename_from_url(direct_url))
            .unwrap_or_default()
    }

    fn find_size_hint(&self, html: &str) -> Option<u64> {
        let caps = self.profile.size_pattern.captures(html)?;
        let value: f64 = caps.name("num")?.as_str().parse().ok()?;
        let scale = match caps.name("unit")?.as_str() {
            "B" => 1.0,
            "KB" => 1024.0,
            "MB" => 1024.0 * 1024.0,
            "GB" => 1024.0 * 1024.0 * 1024.0,
            "TB" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
            _ => return None,
        };
        Some((value * scale).round() as u64)
    }
}

impl LinkExtractor for PageExtractor {
    fn extract(&self, html: &str) -> Result<ResolvedTarget, Error> {
        if let Some(marker) = self
            .profile
            .removed_markers
            .iter()
            .find(|m| html.contains(m.as_str()))
        {
            tracing::debug!(marker = %marker, "page reports file removed");
            return Err(Error::NotFound);
        }

        let direct_url = self
            .find_direct_url(html)
            .ok_or_else(|| Error::Extraction("download link not found in page".to_string()))?;
        if !direct_url.starts_with("http://") && !direct_url.starts_with("https://") {
            return Err(Error::Extraction(format!(
                "download link has unexpected form: '{direct_url}'"
            )));
        }

        let filename = self.find_filename(html, direct_url);
        let size_hint = self.find_size_hint(html);

        tracing::debug!(direct_url, filename = %filename, size_hint = ?size_hint, "extracted download target");

        Ok(ResolvedTarget {
            direct_url: direct_url.to_string(),
            filename,
            size_hint,
        })
    }
}
