use crate::commands::Outcome;
use crate::store::{Batch, DataStore};
use serde_json::Value;
use std::path::Path;

/// Append a batch whose records may already carry ids (restore/import).
pub fn run<S: DataStore>(store: &S, path: &Path, batch: Batch) -> Outcome {
    if batch.is_empty() {
        return Outcome::invalid_input("nothing to import");
    }
    match store.write(path, batch) {
        Ok(report) => Outcome::success(format!(
            "Data successfully written ({} records)",
            report.written
        ))
        .with_ids(report.ids),
        Err(e) => Outcome::from(e),
    }
}

pub fn run_value<S: DataStore>(store: &S, path: &Path, value: Value) -> Outcome {
    match Batch::from_value(value) {
        Ok(batch) => run(store, path, batch),
        Err(e) => Outcome::from(e),
    }
}
