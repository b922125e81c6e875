//! # Storage Layer
//!
//! This module defines the flat-file document store. The [`DataStore`] trait
//! is the seam the command layer programs against; [`doc_store::DocumentStore`]
//! is its implementation, generic over a raw I/O [`backend::StorageBackend`].
//!
//! ## The File Is the Truth
//!
//! Every collection lives in exactly one JSON file holding a top-level array
//! of records. Nothing is cached: each operation reads the file, and each
//! mutating operation rewrites it in full.
//!
//! ```text
//! [
//!   { "id": 1000000001, "name": "Laptop", ... },
//!   { "id": 4821937465, "name": "Phone", ... }
//! ]
//! ```
//!
//! Array order is insertion order. Removing a record rewrites the file with
//! the survivors in their original order.
//!
//! ## Reads
//!
//! - Missing file: empty collection (not an error).
//! - Non-array payload: empty collection, logged as a warning.
//! - Unparseable JSON or an I/O failure: an error. Corruption is never
//!   reported as "no data".
//!
//! ## Writes
//!
//! A write appends a [`Batch`]. Records without an `id` (or with `null`) get a
//! fresh 10-digit id; records with an `id` must carry a valid, unused one.
//! Validation covers the whole batch before anything touches disk, so a single
//! bad id rejects the batch and leaves the file byte-for-byte unchanged.
//!
//! ## Concurrency
//!
//! Mutating operations hold a [`coordinator::PathGuard`] for their whole
//! read-modify-write cycle, so concurrent writers sharing one store never
//! lose each other's updates. Backends replace files atomically, so reads do
//! not need the guard.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production backend, temp file + rename.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.

use crate::error::{Result, StoreError};
use crate::model::{Record, RecordId};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

pub mod backend;
pub mod coordinator;
pub mod doc_store;
pub mod fs_backend;
pub mod mem_backend;

/// Records to append in one write call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch(pub Vec<Record>);

impl Batch {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Accepts a single JSON object or an array of objects.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(record) => Ok(Batch(vec![record])),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(record) => Ok(record),
                    other => Err(StoreError::InvalidInput(format!(
                        "entry {} is not an object: {}",
                        i, other
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Batch),
            other => Err(StoreError::InvalidInput(format!(
                "expected an object or an array of objects, got {}",
                other
            ))),
        }
    }
}

impl From<Record> for Batch {
    fn from(record: Record) -> Self {
        Batch(vec![record])
    }
}

impl From<Vec<Record>> for Batch {
    fn from(records: Vec<Record>) -> Self {
        Batch(records)
    }
}

/// What a successful write appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub written: usize,
    pub ids: Vec<RecordId>,
}

/// Abstract interface for collection-file storage.
///
/// Each method addresses one collection file by path. Implementations must
/// keep ids unique per file and must reject a batch without side effects when
/// any of its ids is invalid or taken.
pub trait DataStore {
    /// Load every record of a collection, in file order.
    fn read(&self, path: &Path) -> Result<Vec<Record>>;

    /// Append a batch, assigning ids where missing.
    fn write(&self, path: &Path, batch: Batch) -> Result<WriteReport>;

    /// Delete the record whose `id` equals `id`, returning it.
    ///
    /// The match is on the stored JSON value, so records written with ids
    /// outside the generated range can still be removed.
    fn remove(&self, path: &Path, id: &Value) -> Result<Record>;

    /// Set one field of the record with `id`, returning the updated record.
    fn update(&self, path: &Path, id: RecordId, field: &str, value: Value) -> Result<Record>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn batch_from_single_object() {
        let batch = Batch::from_value(json!({ "name": "a" })).unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn batch_from_array_keeps_order() {
        let batch = Batch::from_value(json!([{ "n": 1 }, { "n": 2 }])).unwrap();
        assert_eq!(batch.0[0]["n"], json!(1));
        assert_eq!(batch.0[1]["n"], json!(2));
    }

    #[test]
    fn batch_rejects_scalars_and_mixed_arrays() {
        assert!(matches!(
            Batch::from_value(json!("x")),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(matches!(
            Batch::from_value(json!([{ "n": 1 }, 7])),
            Err(StoreError::InvalidInput(_))
        ));
    }
}
