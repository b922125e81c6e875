use crate::api::{CatalogApi, CatalogPaths};
use crate::ids::IdAllocator;
use crate::store::doc_store::DocumentStore;
use crate::store::fs_backend::FsBackend;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub api: CatalogApi<DocumentStore<FsBackend>>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let api = CatalogApi::new(
            DocumentStore::with_backend(FsBackend::new()),
            CatalogPaths::new(root.clone()),
            Arc::new(IdAllocator::new()),
        );
        Self {
            _temp_dir: temp_dir,
            api,
            root,
        }
    }
}
