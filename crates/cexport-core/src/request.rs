//! The fixed course-list request.
//!
//! Path, query and `Accept` header are constants; only the origin the request
//! is resolved against comes from configuration.

use url::Url;

/// API path of the private course list.
pub const COURSE_LIST_PATH: &str = "/api/private/getCourseList";

/// Page size requested in one shot. There is no pagination fallback.
pub const COURSE_LIST_LIMIT: u64 = 500_000;

/// Offset of the single page.
pub const COURSE_LIST_OFFSET: u64 = 0;

/// `Accept` header sent with the request.
pub const ACCEPT: &str = "application/json, text/plain, */*";

/// Description of the export GET. Constructed fresh for each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    base_url: String,
}

impl ExportRequest {
    /// Request against `base_url` (scheme + host, optionally a port).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn limit(&self) -> u64 {
        COURSE_LIST_LIMIT
    }

    /// Full URL: origin joined with the fixed path and query.
    ///
    /// Any path or query on `base_url` is replaced.
    pub fn url(&self) -> Result<Url, url::ParseError> {
        let base = Url::parse(self.base_url.trim())?;
        let mut url = base.join(COURSE_LIST_PATH)?;
        url.query_pairs_mut()
            .clear()
            .append_pair("limit", &COURSE_LIST_LIMIT.to_string())
            .append_pair("offset", &COURSE_LIST_OFFSET.to_string());
        url.set_fragment(None);
        Ok(url)
    }

    /// Header lines sent on every request, before credentials.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![("Accept", ACCEPT.to_string())]
    }
}
