pub mod config;
pub mod logging;

pub mod analysis;
pub mod artifact;
pub mod checksum;
pub mod credentials;
pub mod downloader;
pub mod error;
pub mod fetch;
pub mod locator;
pub mod payload;
pub mod request;
pub mod runner;

pub use error::{ExportError, NetworkErrorKind};
pub use request::ExportRequest;
pub use runner::{ExportOutcome, ExportReport, ExportRunner};
