//! In-memory downloader: keeps every save for inspection.

use std::io;
use std::sync::{Mutex, MutexGuard};

use super::{FileDownloader, SavedFile};

/// One recorded save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRecord {
    pub filename: String,
    pub mime: String,
    pub content: Vec<u8>,
}

/// Records saves instead of writing them anywhere. Can be told to fail.
#[derive(Debug, Default)]
pub struct MemoryDownloader {
    saves: Mutex<Vec<SavedRecord>>,
    fail_with: Option<io::ErrorKind>,
}

impl MemoryDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// A downloader whose every save fails with `kind`.
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            saves: Mutex::new(Vec::new()),
            fail_with: Some(kind),
        }
    }

    /// Saves recorded so far, oldest first.
    pub fn saves(&self) -> Vec<SavedRecord> {
        self.records().clone()
    }

    pub fn last(&self) -> Option<SavedRecord> {
        self.records().last().cloned()
    }

    fn records(&self) -> MutexGuard<'_, Vec<SavedRecord>> {
        self.saves.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileDownloader for MemoryDownloader {
    fn save(&self, content: &[u8], filename: &str, mime: &str) -> io::Result<SavedFile> {
        if let Some(kind) = self.fail_with {
            return Err(io::Error::new(kind, format!("refusing to save {}", filename)));
        }
        self.records().push(SavedRecord {
            filename: filename.to_string(),
            mime: mime.to_string(),
            content: content.to_vec(),
        });
        Ok(SavedFile {
            destination: None,
            bytes: content.len() as u64,
        })
    }
}
