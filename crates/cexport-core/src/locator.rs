//! Transient resource locators for artifacts.
//!
//! An [`ObjectUrl`] addresses an artifact held by an [`ObjectUrlRegistry`]
//! until it is revoked. Revocation happens explicitly or on drop, so a
//! locator never outlives the run that created it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::artifact::DownloadArtifact;

const SCHEME_PREFIX: &str = "blob:cexport/";

/// In-memory table of live locators.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    next_id: AtomicU64,
    live: Mutex<HashMap<String, Arc<DownloadArtifact>>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `artifact` and return a locator for it.
    pub fn create(&self, artifact: Arc<DownloadArtifact>) -> ObjectUrl<'_> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("{}{:016x}", SCHEME_PREFIX, id);
        self.table().insert(url.clone(), artifact);
        tracing::debug!(%url, "object url created");
        ObjectUrl {
            registry: self,
            url,
        }
    }

    /// Artifact behind `url`, or None once revoked.
    pub fn resolve(&self, url: &str) -> Option<Arc<DownloadArtifact>> {
        self.table().get(url).cloned()
    }

    /// Number of locators not yet revoked.
    pub fn live_count(&self) -> usize {
        self.table().len()
    }

    fn revoke(&self, url: &str) -> bool {
        let removed = self.table().remove(url).is_some();
        if removed {
            tracing::debug!(%url, "object url revoked");
        }
        removed
    }

    // A panic while holding the lock leaves the map usable; keep going.
    fn table(&self) -> MutexGuard<'_, HashMap<String, Arc<DownloadArtifact>>> {
        self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Live locator. Revoked when dropped.
#[derive(Debug)]
pub struct ObjectUrl<'r> {
    registry: &'r ObjectUrlRegistry,
    url: String,
}

impl ObjectUrl<'_> {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Artifact behind this locator.
    pub fn resolve(&self) -> Option<Arc<DownloadArtifact>> {
        self.registry.resolve(&self.url)
    }

    /// Revoke now and hand back the (dead) URL string.
    pub fn revoke(self) -> String {
        self.registry.revoke(&self.url);
        self.url.clone()
    }
}

impl Drop for ObjectUrl<'_> {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
    }
}
