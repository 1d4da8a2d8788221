//! Fetch-to-save pipeline for the course list.
//!
//! One GET, one status check, parse, pretty print, save through the injected
//! downloader. Every failure ends the run; nothing is retried.

use std::path::PathBuf;
use std::sync::Arc;

use crate::artifact::{DownloadArtifact, ARTIFACT_FILENAME};
use crate::credentials::CredentialProvider;
use crate::downloader::FileDownloader;
use crate::error::ExportError;
use crate::fetch::{self, FetchOptions};
use crate::locator::ObjectUrlRegistry;
use crate::payload;
use crate::request::ExportRequest;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub filename: String,
    pub bytes: u64,
    pub sha256: String,
    /// HTTP status of the response.
    pub status: u32,
    /// Final path when the downloader wrote to disk.
    pub destination: Option<PathBuf>,
    /// Locator the artifact was saved through. Already revoked.
    pub object_url: String,
}

/// Result of [`ExportRunner::run_and_report`].
#[derive(Debug)]
pub enum ExportOutcome {
    Saved(ExportReport),
    Failed(ExportError),
}

impl ExportOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, ExportOutcome::Saved(_))
    }

    /// One-line console notice for this outcome.
    pub fn notice(&self) -> String {
        match self {
            ExportOutcome::Saved(r) => match &r.destination {
                Some(p) => format!("saved {} ({} bytes) to {}", r.filename, r.bytes, p.display()),
                None => format!("saved {} ({} bytes)", r.filename, r.bytes),
            },
            ExportOutcome::Failed(e) => format!("export failed: {}", e),
        }
    }
}

/// Runs the export once per call. Holds no state between runs apart from the
/// locator registry, which is empty again whenever `run` returns.
pub struct ExportRunner<C, D> {
    request: ExportRequest,
    credentials: C,
    downloader: D,
    fetch_options: FetchOptions,
    registry: Arc<ObjectUrlRegistry>,
}

impl<C: CredentialProvider, D: FileDownloader> ExportRunner<C, D> {
    pub fn new(request: ExportRequest, credentials: C, downloader: D) -> Self {
        Self {
            request,
            credentials,
            downloader,
            fetch_options: FetchOptions::default(),
            registry: Arc::new(ObjectUrlRegistry::new()),
        }
    }

    pub fn with_fetch_options(mut self, opts: FetchOptions) -> Self {
        self.fetch_options = opts;
        self
    }

    /// Use a caller-owned registry (lets the caller check revocation).
    pub fn with_registry(mut self, registry: Arc<ObjectUrlRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &Arc<ObjectUrlRegistry> {
        &self.registry
    }

    /// Executes the pipeline and returns the report or the first failure.
    pub fn run(&self) -> Result<ExportReport, ExportError> {
        let url = self
            .request
            .url()
            .map_err(|source| ExportError::InvalidUrl {
                base: self.request.base_url().to_string(),
                source,
            })?;
        let cookie = self
            .credentials
            .cookie_header()
            .map_err(ExportError::Credentials)?;

        tracing::info!(url = %url, with_cookie = cookie.is_some(), "requesting course list");
        let response = fetch::get(
            url.as_str(),
            &self.request.headers(),
            cookie.as_deref(),
            self.fetch_options,
        )?;
        if !response.is_success() {
            return Err(ExportError::Request {
                status: response.status,
            });
        }

        let value = payload::parse(&response.body)?;
        if let Some(n) = payload::record_count(&value) {
            tracing::debug!(records = n, "course list parsed");
            if payload::may_be_truncated(n, self.request.limit()) {
                tracing::warn!(
                    records = n,
                    limit = self.request.limit(),
                    "record count reached the request limit; export may be truncated"
                );
            }
        }
        let text = payload::to_pretty_text(&value)?;
        drop(value);

        let artifact = Arc::new(DownloadArtifact::from_text(text));
        let sha256 = artifact.sha256();

        let object_url = self.registry.create(Arc::clone(&artifact));
        let saved = match object_url.resolve() {
            Some(a) => self.downloader.save(a.content(), a.filename(), a.mime()),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} no longer resolves", object_url.as_str()),
            )),
        };
        let object_url = object_url.revoke();
        let saved = saved.map_err(ExportError::Save)?;

        Ok(ExportReport {
            filename: artifact.filename().to_string(),
            bytes: saved.bytes,
            sha256,
            status: response.status,
            destination: saved.destination,
            object_url,
        })
    }

    /// Runs the pipeline, logs the outcome and hands it back. Never panics on
    /// export failures and never propagates them.
    pub fn run_and_report(&self) -> ExportOutcome {
        match self.run() {
            Ok(report) => {
                tracing::info!(
                    file = %report.filename,
                    bytes = report.bytes,
                    sha256 = %report.sha256,
                    "export saved"
                );
                ExportOutcome::Saved(report)
            }
            Err(e) => {
                tracing::error!("export of {} failed: {}", ARTIFACT_FILENAME, e);
                ExportOutcome::Failed(e)
            }
        }
    }
}
