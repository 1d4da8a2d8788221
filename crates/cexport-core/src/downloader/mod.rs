//! File save capability.
//!
//! The runner only depends on [`FileDownloader`]; where the bytes end up
//! (a directory, stdout, memory) is the implementation's business.

mod directory;
mod filename;
mod memory;

pub use directory::{temp_path, DirectoryDownloader, TEMP_SUFFIX};
pub use filename::validate_filename;
pub use memory::{MemoryDownloader, SavedRecord};

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Where a save landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// Final path on disk; None for stdout or in-memory saves.
    pub destination: Option<PathBuf>,
    pub bytes: u64,
}

/// Saves `content` under `filename` with the declared `mime` type.
pub trait FileDownloader: Send + Sync {
    fn save(&self, content: &[u8], filename: &str, mime: &str) -> io::Result<SavedFile>;
}

impl<T: FileDownloader + ?Sized> FileDownloader for Arc<T> {
    fn save(&self, content: &[u8], filename: &str, mime: &str) -> io::Result<SavedFile> {
        (**self).save(content, filename, mime)
    }
}

impl<T: FileDownloader + ?Sized> FileDownloader for Box<T> {
    fn save(&self, content: &[u8], filename: &str, mime: &str) -> io::Result<SavedFile> {
        (**self).save(content, filename, mime)
    }
}

/// Writes the content to stdout, ignoring the filename.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutDownloader;

impl FileDownloader for StdoutDownloader {
    fn save(&self, content: &[u8], filename: &str, _mime: &str) -> io::Result<SavedFile> {
        let saved = write_content(&mut io::stdout().lock(), content)?;
        tracing::debug!(filename, bytes = saved.bytes, "artifact written to stdout");
        Ok(saved)
    }
}

/// Writes `content` unchanged and flushes. No trailing newline is added.
fn write_content(out: &mut impl Write, content: &[u8]) -> io::Result<SavedFile> {
    out.write_all(content)?;
    out.flush()?;
    Ok(SavedFile {
        destination: None,
        bytes: content.len() as u64,
    })
}
