use crate::error::Result;
use std::path::Path;

/// Abstract interface for raw collection-file I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while DocumentStore handles the "what" (ids, validation, rewrite rules).
pub trait StorageBackend {
    /// Read the raw contents of a collection file.
    /// Returns Ok(None) if the file does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_raw(&self, path: &Path) -> Result<Option<String>>;

    /// Replace the contents of a collection file.
    /// MUST be atomic (e.g. write to tmp then rename) so readers never observe
    /// a half-written file.
    fn write_raw(&self, path: &Path, content: &str) -> Result<()>;
}
