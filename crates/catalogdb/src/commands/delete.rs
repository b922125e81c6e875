use crate::commands::{DeleteEntry, Outcome};
use crate::error::StoreError;
use crate::model::{Collection, RecordId};
use crate::store::DataStore;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

pub fn run<S: DataStore>(store: &S, path: &Path, id: RecordId) -> Outcome {
    run_value(store, path, &id.into())
}

/// Remove by the raw id value a caller sent. No range check: whatever the
/// file holds under `id` can be removed.
pub fn run_value<S: DataStore>(store: &S, path: &Path, id: &Value) -> Outcome {
    match store.remove(path, id) {
        Ok(_) => Outcome::success(format!("Item with id {} successfully removed", id)),
        Err(StoreError::FileNotFound(_)) => Outcome::not_found("File not found", Some(id.clone())),
        Err(e) => Outcome::from(e),
    }
}

/// Batch delete.
///
/// `ids` must be a non-empty JSON array; anything else is rejected before any
/// file is touched. Each entry is then removed in order, one `remove` call at
/// a time, and gets its own entry in `results`. Misses do not fail the batch:
/// the aggregate status is always success.
pub fn run_many<S: DataStore>(
    store: &S,
    path: &Path,
    collection: Collection,
    ids: Option<&Value>,
) -> Outcome {
    let ids = match ids {
        Some(Value::Array(ids)) if !ids.is_empty() => ids,
        _ => return Outcome::invalid_input("ids must be a non-empty array"),
    };

    let results: Vec<DeleteEntry> = ids
        .iter()
        .map(|raw| DeleteEntry {
            id: raw.clone(),
            result: run_value(store, path, raw),
        })
        .collect();

    let removed = results.iter().filter(|e| e.result.is_success()).count();
    debug!(%collection, requested = ids.len(), removed, "batch delete");

    Outcome::success(format!("Attempted to delete {} {}", ids.len(), collection))
        .with_results(results)
}

/// Typed variant of [`run_many`].
pub fn run_many_ids<S: DataStore>(
    store: &S,
    path: &Path,
    collection: Collection,
    ids: &[RecordId],
) -> Outcome {
    let ids = Value::Array(ids.iter().map(|id| Value::from(*id)).collect());
    run_many(store, path, collection, Some(&ids))
}
