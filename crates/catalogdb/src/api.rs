//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for callers (the CLI, a web service, tests), and it owns the
//! things every operation shares:
//!
//! - the store,
//! - the collection paths ([`CatalogPaths`]), fixed for the facade's lifetime,
//! - the [`IdAllocator`] that tags each operation with a correlation token.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: it returns [`Outcome`]s, not strings
//!
//! ## Generic Over DataStore
//!
//! `CatalogApi<S: DataStore>` is generic over the store:
//! - Production: `CatalogApi<DocumentStore<FsBackend>>` (see [`CatalogApi::open`])
//! - Testing: `CatalogApi<DocumentStore<MemBackend>>`

use crate::commands::{self, Outcome};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::ids::IdAllocator;
use crate::model::{Collection, Entity, RecordId};
use crate::store::doc_store::DocumentStore;
use crate::store::fs_backend::FsBackend;
use crate::store::DataStore;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info_span};

/// Where each collection file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub root: PathBuf,
}

impl CatalogPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn collection(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }
}

pub struct CatalogApi<S: DataStore> {
    store: S,
    paths: CatalogPaths,
    allocator: Arc<IdAllocator>,
}

impl CatalogApi<DocumentStore<FsBackend>> {
    /// Filesystem-backed facade built from configuration.
    pub fn open(config: &CatalogConfig) -> Result<Self> {
        let root = config.data_dir()?;
        let root = std::path::absolute(&root).unwrap_or(root);
        debug!(root = %root.display(), "opening catalog");

        let store =
            DocumentStore::with_backend(FsBackend::new()).with_max_id_attempts(config.max_id_attempts);
        Ok(Self::new(
            store,
            CatalogPaths::new(root),
            Arc::new(IdAllocator::with_max_attempts(config.max_id_attempts)),
        ))
    }
}

impl<S: DataStore> CatalogApi<S> {
    pub fn new(store: S, paths: CatalogPaths, allocator: Arc<IdAllocator>) -> Self {
        Self {
            store,
            paths,
            allocator,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn paths(&self) -> &CatalogPaths {
        &self.paths
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.paths.collection(collection)
    }

    /// Run `f` inside a span tagged with a fresh operation token.
    fn traced<F>(&self, op: &'static str, collection: Collection, f: F) -> Outcome
    where
        F: FnOnce(&S, &Path) -> Outcome,
    {
        let token = match self.allocator.token() {
            Ok(token) => token,
            Err(e) => return Outcome::from(e),
        };
        let span = info_span!("op", %token, op, %collection);
        let _entered = span.enter();

        let outcome = f(&self.store, &self.path(collection));
        debug!(status = ?outcome.status, "{}", outcome.message);
        outcome
    }

    pub fn create(&self, collection: Collection, record: Value) -> Outcome {
        self.traced("create", collection, |store, path| {
            commands::create::run_value(store, path, record)
        })
    }

    pub fn create_entity<E: Entity>(&self, entity: &E) -> Outcome {
        match entity.to_record() {
            Ok(record) => self.traced("create", E::COLLECTION, |store, path| {
                commands::create::run(store, path, record)
            }),
            Err(e) => Outcome::from(e),
        }
    }

    pub fn import(&self, collection: Collection, records: Value) -> Outcome {
        self.traced("import", collection, |store, path| {
            commands::import::run_value(store, path, records)
        })
    }

    pub fn list(&self, collection: Collection) -> Outcome {
        self.traced("list", collection, |store, path| {
            commands::list::run(store, path, collection)
        })
    }

    pub fn get(&self, collection: Collection, id: RecordId) -> Outcome {
        self.traced("get", collection, |store, path| {
            commands::get::run(store, path, collection, id)
        })
    }

    pub fn update(&self, collection: Collection, id: RecordId, field: &str, value: Value) -> Outcome {
        self.traced("update", collection, |store, path| {
            commands::update::run(store, path, id, field, value)
        })
    }

    pub fn delete(&self, collection: Collection, id: RecordId) -> Outcome {
        self.traced("delete", collection, |store, path| {
            commands::delete::run(store, path, id)
        })
    }

    /// Single delete by the raw id a caller sent, matched as stored.
    pub fn delete_value(&self, collection: Collection, id: &Value) -> Outcome {
        self.traced("delete", collection, |store, path| {
            commands::delete::run_value(store, path, id)
        })
    }

    /// Batch delete from a raw request payload (`None` when the caller sent no ids).
    pub fn delete_many(&self, collection: Collection, ids: Option<&Value>) -> Outcome {
        self.traced("delete_many", collection, |store, path| {
            commands::delete::run_many(store, path, collection, ids)
        })
    }

    pub fn delete_ids(&self, collection: Collection, ids: &[RecordId]) -> Outcome {
        self.traced("delete_many", collection, |store, path| {
            commands::delete::run_many_ids(store, path, collection, ids)
        })
    }
}
