//! Single HTTP GET through libcurl.
//!
//! Collects the whole body in memory; the course list is one JSON document.
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

use std::time::Duration;

/// Transport knobs. Both timeouts are off by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl FetchedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a GET on `url` with the given header lines.
///
/// Follows redirects. A `cookie` value, when present, is sent as the `Cookie` header.
/// Returns whatever status the server sent; only transport failures are errors.
pub fn get(
    url: &str,
    headers: &[(&str, String)],
    cookie: Option<&str>,
    opts: FetchOptions,
) -> Result<FetchedResponse, curl::Error> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }

    let mut list = curl::easy::List::new();
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if let Some(c) = cookie.map(str::trim).filter(|c| !c.is_empty()) {
        list.append(&format!("Cookie: {}", c))?;
    }
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    tracing::debug!(status, bytes = body.len(), "GET {} finished", url);
    Ok(FetchedResponse { status, body })
}
