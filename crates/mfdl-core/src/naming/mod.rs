//! Local filename derivation.
//!
//! Candidates in order of trust: `Content-Disposition` from the direct
//! transfer, the name shown on the share page, the last path segment of the
//! direct URL. Whatever wins is sanitized for Linux filesystems.

mod content_disposition;
mod sanitize;

pub use content_disposition::content_disposition_filename;
pub use sanitize::sanitize_filename;

/// Used when every candidate is empty or degenerate.
const FALLBACK_FILENAME: &str = "download.bin";

/// Picks and sanitizes the local filename for a download.
pub fn derive_filename(
    page_name: Option<&str>,
    content_disposition: Option<&str>,
    direct_url: &str,
) -> String {
    let candidate = content_disposition
        .and_then(content_disposition_filename)
        .or_else(|| page_name.map(str::to_string).filter(|s| !s.trim().is_empty()))
        .or_else(|| filename_from_url(direct_url));

    let sanitized = match candidate {
        Some(raw) => sanitize_filename(&raw),
        None => String::new(),
    };
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        FALLBACK_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Last non-empty path segment of `url`, percent-decoded.
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .next_back()?;
    let decoded = percent_decode(segment);
    if decoded.is_empty() || decoded == "." || decoded == ".." {
        None
    } else {
        Some(decoded)
    }
}

/// Lossy percent-decoding; malformed escapes pass through verbatim.
pub(crate) fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let Some(decoded) = bytes.get(i + 1..i + 3).and_then(hex_pair) {
                out.push(decoded);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(pair: &[u8]) -> Option<u8> {
    let hi = (pair[0] as char).to_digit(16)?;
    let lo = (pair[1] as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_disposition_wins() {
        let name = derive_filename(
            Some("page-name.zip"),
            Some("attachment; filename=\"real-name.tar.gz\""),
            "https://cdn.example.com/other.bin",
        );
        assert_eq!(name, "real-name.tar.gz");
    }

    #[test]
    fn page_name_beats_url_path() {
        let name = derive_filename(Some("shown.pdf"), None, "https://cdn.example.com/path/x.bin");
        assert_eq!(name, "shown.pdf");
    }

    #[test]
    fn url_path_fallback_is_decoded() {
        let name = derive_filename(None, None, "https://cdn.example.com/a/my%20song.mp3");
        assert_eq!(name, "my_song.mp3");
    }

    #[test]
    fn everything_empty_falls_back() {
        assert_eq!(derive_filename(None, None, "https://cdn.example.com/"), "download.bin");
        assert_eq!(derive_filename(Some("   "), None, "https://cdn.example.com"), "download.bin");
    }

    #[test]
    fn filename_from_url_ignores_query() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/f/archive.zip?token=abc").as_deref(),
            Some("archive.zip")
        );
    }

    #[test]
    fn percent_decode_handles_malformed() {
        assert_eq!(percent_decode("caf%C3%A9"), "café");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("bad%zzseq"), "bad%zzseq");
    }
}
