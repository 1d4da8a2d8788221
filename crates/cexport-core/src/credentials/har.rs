//! Cookies from a HAR capture of a logged-in browser session.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use url::Url;

use super::parse::{HarEntry, HarHeader, HarLog};
use super::CredentialProvider;

/// Reads the session cookie from a HAR file each time it is asked.
#[derive(Debug, Clone)]
pub struct HarCookies {
    path: PathBuf,
    host: Option<String>,
}

impl HarCookies {
    /// Provider for requests to `base_url`; entries for that host are preferred.
    pub fn new(path: impl Into<PathBuf>, base_url: &str) -> Self {
        let host = Url::parse(base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase));
        Self {
            path: path.into(),
            host,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialProvider for HarCookies {
    fn cookie_header(&self) -> Result<Option<String>> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read HAR file: {}", self.path.display()))?;
        let cookie = cookie_from_har(&bytes, self.host.as_deref())
            .with_context(|| format!("parse HAR JSON: {}", self.path.display()))?;
        match &cookie {
            Some(_) => tracing::debug!("session cookie loaded from {}", self.path.display()),
            None => tracing::warn!("no cookie found in {}", self.path.display()),
        }
        Ok(cookie)
    }
}

/// Picks the session cookie out of raw HAR JSON.
///
/// Takes the latest entry for `host` that carries a cookie; when none match
/// the host (or no host is given), the latest entry with a cookie at all.
/// The `Cookie` request header wins over the structured `cookies` list.
pub fn cookie_from_har(bytes: &[u8], host: Option<&str>) -> Result<Option<String>> {
    let har: HarLog = serde_json::from_slice(bytes)?;
    let entries = har.log.entries;

    let for_host = host.and_then(|h| {
        entries
            .iter()
            .rev()
            .filter(|e| entry_host(e).as_deref() == Some(h))
            .find_map(entry_cookie)
    });

    Ok(for_host.or_else(|| entries.iter().rev().find_map(entry_cookie)))
}

fn entry_host(entry: &HarEntry) -> Option<String> {
    Url::parse(&entry.request.url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
}

fn entry_cookie(entry: &HarEntry) -> Option<String> {
    if let Some(v) = get_header(&entry.request.headers, "Cookie") {
        let v = v.trim();
        if !v.is_empty() {
            return Some(v.to_string());
        }
    }
    if entry.request.cookies.is_empty() {
        return None;
    }
    let joined = entry
        .request
        .cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ");
    Some(joined)
}

fn get_header<'a>(headers: &'a [HarHeader], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}
