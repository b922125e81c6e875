use super::backend::StorageBackend;
use crate::error::{Result, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::trace;
use uuid::Uuid;

/// Filesystem backend: one plain JSON file per collection path.
#[derive(Debug, Default, Clone)]
pub struct FsBackend;

impl FsBackend {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(StoreError::Io)?;
            }
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_raw(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => {
                trace!(path = %path.display(), bytes = content.len(), "read collection file");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn write_raw(&self, path: &Path, content: &str) -> Result<()> {
        self.ensure_parent(path)?;

        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                StoreError::InvalidInput(format!("not a file path: {}", path.display()))
            })?;

        // Atomic Write
        let tmp_path = path.with_file_name(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(StoreError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io(e));
        }

        trace!(path = %path.display(), bytes = content.len(), "replaced collection file");
        Ok(())
    }
}
