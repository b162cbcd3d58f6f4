//! Share-page fetching.
//!
//! One GET per share link, no retry: a transient failure surfaces to the
//! driver, which records it and moves on to the next URL.

use curl::easy::Easy;

use crate::error::Error;
use crate::http::{self, HttpOptions};
use crate::share_link::ShareLink;

/// Body and final location of a fetched share page.
#[derive(Debug)]
pub struct FetchedPage {
    /// URL after redirects; direct links are occasionally relative to it.
    pub final_url: String,
    pub status: u32,
    pub body: String,
}

/// GETs the share page. 404/410 map to `NotFound` (file removed or link
/// invalid), any other non-2xx or network failure to `Fetch`.
pub fn fetch_share_page(link: &ShareLink, opts: &HttpOptions) -> Result<FetchedPage, Error> {
    let mut easy = Easy::new();
    configure_page_get(&mut easy, link.as_str(), opts).map_err(fetch_err)?;

    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(fetch_err)?;
        transfer.perform().map_err(fetch_err)?;
    }

    let status = easy.response_code().map_err(fetch_err)?;
    match status {
        404 | 410 => return Err(Error::NotFound),
        200..=299 => {}
        other => return Err(Error::Fetch(format!("share page returned HTTP {other}"))),
    }

    let final_url = easy
        .effective_url()
        .ok()
        .flatten()
        .unwrap_or(link.as_str())
        .to_string();

    tracing::debug!(url = %link, status, bytes = body.len(), "fetched share page");

    Ok(FetchedPage {
        final_url,
        status,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn configure_page_get(easy: &mut Easy, url: &str, opts: &HttpOptions) -> Result<(), curl::Error> {
    http::configure(easy, opts)?;
    easy.url(url)?;
    easy.get(true)?;
    // The share host gzips page bodies; let libcurl inflate them.
    easy.accept_encoding("gzip")?;
    Ok(())
}

fn fetch_err(e: curl::Error) -> Error {
    Error::Fetch(e.to_string())
}
