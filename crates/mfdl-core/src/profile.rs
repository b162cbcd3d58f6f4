//! Site profile: every host-coupled pattern in one replaceable unit.
//!
//! The share-page layout is external and unversioned; when the host changes
//! its markup, this is the only file that needs touching. The validator and
//! extractor are both parameterized by a profile, which also lets tests run
//! the full pipeline against a local server.

use regex::Regex;

/// Accepted URL shape and page patterns for one file-hosting site.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    /// Hostnames a share link may use (compared case-insensitively).
    pub hosts: Vec<String>,
    /// First path segment of a share link (`file`, `file_premium`).
    pub share_path_prefixes: Vec<String>,
    /// Minimum length of the alphanumeric file key in the share path.
    pub min_key_len: usize,
    /// Download-button anchor; capture group `href` is the direct URL.
    pub anchor_pattern: Regex,
    /// Fallback: any direct-CDN-shaped URL in the page body.
    pub direct_link_pattern: Regex,
    /// Page element carrying the filename; capture group `name`.
    pub filename_pattern: Regex,
    /// Size label on the download button; capture groups `num` and `unit`.
    pub size_pattern: Regex,
    /// Body substrings indicating the file was removed or the link expired.
    pub removed_markers: Vec<String>,
}

impl SiteProfile {
    /// Profile for mediafire.com share pages.
    pub fn mediafire() -> Self {
        SiteProfile {
            hosts: vec!["www.mediafire.com".to_string(), "mediafire.com".to_string()],
            share_path_prefixes: vec!["file".to_string(), "file_premium".to_string()],
            min_key_len: 11,
            anchor_pattern: re(r#"<a\b[^>]*\bhref="(?P<href>[^"]+)"[^>]*\bid="downloadButton""#),
            direct_link_pattern: re(r#"https://download[0-9]+\.[^"'\s<>]+"#),
            filename_pattern: re(r#"<div class="filename">\s*(?P<name>[^<]+?)\s*</div>"#),
            size_pattern: re(r"Download\s*\(\s*(?P<num>[0-9]+(?:\.[0-9]+)?)\s*(?P<unit>[KMGT]?B)\s*\)"),
            removed_markers: vec![
                "Invalid or Deleted File".to_string(),
                "File Removed for Violation".to_string(),
                "This file has been removed".to_string(),
                "this key is no longer valid".to_string(),
            ],
        }
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("pattern literal")
}
