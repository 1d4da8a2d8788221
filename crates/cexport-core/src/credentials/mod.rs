//! Session credentials for the private API.
//!
//! The runner asks a [`CredentialProvider`] for a `Cookie` header value and
//! does not know where it comes from (a literal value, a HAR capture of a
//! logged-in browser session, or nothing at all).

mod har;
mod parse;

pub use har::{cookie_from_har, HarCookies};

use anyhow::Result;

/// Supplies the ambient session cookie for a request.
pub trait CredentialProvider: Send + Sync {
    /// Value for the `Cookie` header, or None to send the request anonymously.
    fn cookie_header(&self) -> Result<Option<String>>;
}

impl<T: CredentialProvider + ?Sized> CredentialProvider for Box<T> {
    fn cookie_header(&self) -> Result<Option<String>> {
        (**self).cookie_header()
    }
}

/// Anonymous requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn cookie_header(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// A fixed `Cookie` header value (e.g. copied from the browser's dev tools).
#[derive(Clone)]
pub struct StaticCookie(String);

impl StaticCookie {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

// Cookie values are secrets; keep them out of debug logs.
impl std::fmt::Debug for StaticCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticCookie").field(&"<redacted>").finish()
    }
}

impl CredentialProvider for StaticCookie {
    fn cookie_header(&self) -> Result<Option<String>> {
        let v = self.0.trim();
        Ok(if v.is_empty() { None } else { Some(v.to_string()) })
    }
}
