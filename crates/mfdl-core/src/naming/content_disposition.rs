//! `Content-Disposition` filename extraction (`filename` and `filename*`).

use super::percent_decode;

/// Returns the filename carried by a `Content-Disposition` header value,
/// or `None` if the header names nothing usable.
///
/// RFC 5987 `filename*=UTF-8''...` takes precedence over plain `filename=`.
pub fn content_disposition_filename(header_value: &str) -> Option<String> {
    let mut plain: Option<String> = None;
    let mut extended: Option<String> = None;

    for (name, value) in params(header_value) {
        if name.eq_ignore_ascii_case("filename*") {
            let rest = value
                .strip_prefix("UTF-8''")
                .or_else(|| value.strip_prefix("utf-8''"));
            if let Some(rest) = rest {
                let decoded = percent_decode(rest);
                if !decoded.is_empty() {
                    extended = Some(decoded);
                }
            }
        } else if name.eq_ignore_ascii_case("filename") {
            let unquoted = unquote(value);
            if !unquoted.is_empty() {
                plain = Some(unquoted);
            }
        }
    }

    extended.or(plain)
}

/// Splits `attachment; a=b; c="d"` into `(name, value)` pairs.
fn params(value: &str) -> impl Iterator<Item = (&str, &str)> {
    value.split(';').filter_map(|part| {
        let (name, v) = part.split_once('=')?;
        Some((name.trim(), v.trim()))
    })
}

/// Strips surrounding quotes and resolves `\"` / `\\` escapes.
fn unquote(value: &str) -> String {
    let inner = match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner,
        None => return value.to_string(),
    };
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            if !matches!(c, '"' | '\\') {
                out.push('\\');
            }
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }
    if escaped {
        out.push('\\');
    }
    out
}
