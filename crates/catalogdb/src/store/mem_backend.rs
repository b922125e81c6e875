use super::backend::StorageBackend;
use crate::error::{Result, StoreError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// In-memory storage backend for testing.
///
/// Uses a `Mutex` rather than `RefCell` so a `DocumentStore<MemBackend>` can
/// be shared across threads like the filesystem-backed one.
#[derive(Debug, Default)]
pub struct MemBackend {
    files: Mutex<HashMap<PathBuf, String>>,
    simulate_write_error: AtomicBool,
    operations: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Test helper to place raw content (valid JSON or not) at a path.
    pub fn put_raw(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), content.into());
    }

    /// Test helper returning the raw content at a path without counting as an operation.
    pub fn raw(&self, path: &Path) -> Option<String> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Number of read/write calls made through the backend.
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }
}

impl StorageBackend for MemBackend {
    fn read_raw(&self, path: &Path) -> Result<Option<String>> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(files.get(path).cloned())
    }

    fn write_raw(&self, path: &Path, content: &str) -> Result<()> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("Simulated write error")));
        }
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
