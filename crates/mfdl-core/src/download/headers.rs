//! Response-header parsing for the direct transfer.
//!
//! With redirects followed, the collected lines span every hop; the last
//! value wins, so the final response's headers are the ones kept.

/// Headers the downloader acts on.
#[derive(Debug, Default)]
pub(crate) struct ResponseMeta {
    pub content_length: Option<u64>,
    pub content_disposition: Option<String>,
}

pub(crate) fn parse_header_lines(lines: &[String]) -> ResponseMeta {
    let mut meta = ResponseMeta::default();
    for line in lines {
        let line = line.trim();
        if line.starts_with("HTTP/") {
            // New hop; forget the previous response's headers.
            meta = ResponseMeta::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            if name.trim().eq_ignore_ascii_case("content-length") {
                meta.content_length = value.parse::<u64>().ok();
            } else if name.trim().eq_ignore_ascii_case("content-disposition") {
                meta.content_disposition = Some(value.to_string());
            }
        }
    }
    meta
}

/// Cheap single-line probe used from the header callback to keep the
/// progress total current mid-transfer.
pub(crate) fn content_length_of_line(line: &str) -> Option<u64> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_length_and_disposition() {
        let meta = parse_header_lines(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 10485760",
            "Content-Disposition: attachment; filename=\"name.zip\"",
        ]));
        assert_eq!(meta.content_length, Some(10_485_760));
        assert!(meta.content_disposition.unwrap().contains("name.zip"));
    }

    #[test]
    fn last_hop_wins_across_redirects() {
        let meta = parse_header_lines(&lines(&[
            "HTTP/1.1 302 Found",
            "Content-Length: 0",
            "Location: https://cdn.example.com/f.bin",
            "HTTP/1.1 200 OK",
            "Content-Length: 4096",
        ]));
        assert_eq!(meta.content_length, Some(4096));
        assert!(meta.content_disposition.is_none());
    }

    #[test]
    fn missing_headers_default_to_none() {
        let meta = parse_header_lines(&lines(&["HTTP/1.1 200 OK", "Server: x"]));
        assert_eq!(meta.content_length, None);
        assert!(meta.content_disposition.is_none());
    }

    #[test]
    fn line_probe() {
        assert_eq!(content_length_of_line("Content-Length: 99"), Some(99));
        assert_eq!(content_length_of_line("content-length:99"), Some(99));
        assert_eq!(content_length_of_line("Content-Type: text/html"), None);
        assert_eq!(content_length_of_line("garbage"), None);
    }
}
