use crate::commands::Outcome;
use crate::model::{record_id, Collection, RecordId};
use crate::store::DataStore;
use std::path::Path;

/// Linear search over the whole collection.
pub fn run<S: DataStore>(store: &S, path: &Path, collection: Collection, id: RecordId) -> Outcome {
    let records = match store.read(path) {
        Ok(records) => records,
        Err(e) => return Outcome::from(e),
    };

    match records.into_iter().find(|r| record_id(r) == Some(id)) {
        Some(record) => Outcome::success(format!("Found {} {}", collection, id))
            .with_records(vec![record]),
        None => Outcome::not_found(
            format!("Item with id {} not found", id),
            Some(id.into()),
        ),
    }
}
