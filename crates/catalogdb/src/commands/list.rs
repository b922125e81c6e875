use crate::commands::Outcome;
use crate::model::Collection;
use crate::store::DataStore;
use std::path::Path;

pub fn run<S: DataStore>(store: &S, path: &Path, collection: Collection) -> Outcome {
    match store.read(path) {
        Ok(records) => Outcome::success(format!("Found {} {}", records.len(), collection))
            .with_records(records),
        Err(e) => Outcome::from(e),
    }
}
