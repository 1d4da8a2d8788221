//! Failure reasons for an export run.

use thiserror::Error;

/// Transport-level failure class, derived from the curl error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Timeout,
    Connect,
    Resolve,
    Other,
}

impl NetworkErrorKind {
    /// Classify a curl error.
    pub fn classify(e: &curl::Error) -> Self {
        if e.is_operation_timedout() {
            return NetworkErrorKind::Timeout;
        }
        if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
            return NetworkErrorKind::Resolve;
        }
        if e.is_couldnt_connect()
            || e.is_read_error()
            || e.is_recv_error()
            || e.is_send_error()
            || e.is_got_nothing()
        {
            return NetworkErrorKind::Connect;
        }
        NetworkErrorKind::Other
    }
}

/// Everything that can stop an export. None of these are retried.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The server answered with a non-2xx status.
    #[error("HTTP error {status}")]
    Request { status: u32 },

    /// The body was not valid JSON.
    #[error("invalid JSON body: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request never completed (connection refused, DNS, timeout...).
    #[error("network error: {source}")]
    Network {
        kind: NetworkErrorKind,
        #[source]
        source: curl::Error,
    },

    /// The base URL could not be turned into the endpoint URL.
    #[error("invalid base URL {base}: {source}")]
    InvalidUrl {
        base: String,
        #[source]
        source: url::ParseError,
    },

    /// The credential provider failed to produce a cookie.
    #[error("credentials: {0:#}")]
    Credentials(anyhow::Error),

    /// The downloader could not save the artifact.
    #[error("save failed: {0}")]
    Save(#[source] std::io::Error),
}

impl From<curl::Error> for ExportError {
    fn from(source: curl::Error) -> Self {
        ExportError::Network {
            kind: NetworkErrorKind::classify(&source),
            source,
        }
    }
}

impl ExportError {
    /// HTTP status carried by a `Request` error.
    pub fn status(&self) -> Option<u32> {
        match self {
            ExportError::Request { status } => Some(*status),
            _ => None,
        }
    }
}
