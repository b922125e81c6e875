use crate::commands::Outcome;
use crate::model::{Record, ID_FIELD};
use crate::store::DataStore;
use serde_json::Value;
use std::path::Path;

pub fn run<S: DataStore>(store: &S, path: &Path, record: Record) -> Outcome {
    if record.get(ID_FIELD).is_some_and(|v| !v.is_null()) {
        return Outcome::invalid_input("new records must not carry an id; use import to supply ids");
    }

    match store.write(path, record.into()) {
        Ok(report) => Outcome::success("Data successfully written").with_ids(report.ids),
        Err(e) => Outcome::from(e),
    }
}

/// Convenience for callers holding a JSON value rather than a `Record`.
pub fn run_value<S: DataStore>(store: &S, path: &Path, value: Value) -> Outcome {
    match value {
        Value::Object(record) => run(store, path, record),
        other => Outcome::invalid_input(format!("expected an object, got {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{list, Status};
    use crate::model::record_id;
    use crate::store::doc_store::DocumentStore;
    use crate::store::mem_backend::MemBackend;
    use serde_json::json;
    use std::path::PathBuf;

    fn setup() -> (DocumentStore<MemBackend>, PathBuf) {
        (
            DocumentStore::with_backend(MemBackend::new()),
            PathBuf::from("/data/user.data.json"),
        )
    }

    #[test]
    fn creates_record_with_generated_id() {
        let (store, path) = setup();
        let outcome = run_value(&store, &path, json!({ "name": "Ada" }));

        assert!(outcome.is_success());
        assert_eq!(outcome.message, "Data successfully written");
        assert_eq!(outcome.ids.len(), 1);

        let listed = list::run(&store, &path, crate::model::Collection::User);
        assert_eq!(record_id(&listed.records[0]), Some(outcome.ids[0]));
    }

    #[test]
    fn rejects_supplied_id() {
        let (store, path) = setup();
        let outcome = run_value(&store, &path, json!({ "id": 1000000001, "name": "Ada" }));
        assert_eq!(outcome.status, Status::InvalidInput);
        assert_eq!(store.backend().operations(), 0);
    }

    #[test]
    fn null_id_counts_as_absent() {
        let (store, path) = setup();
        let outcome = run_value(&store, &path, json!({ "id": null, "name": "Ada" }));
        assert!(outcome.is_success());
    }

    #[test]
    fn rejects_non_object() {
        let (store, path) = setup();
        let outcome = run_value(&store, &path, json!([1, 2]));
        assert_eq!(outcome.status, Status::InvalidInput);
    }

    #[test]
    fn write_failure_becomes_io_outcome() {
        let (store, path) = setup();
        store.backend().set_simulate_write_error(true);
        let outcome = run_value(&store, &path, json!({ "name": "Ada" }));
        assert_eq!(outcome.status, Status::IoFailure);
        assert_eq!(outcome.code, 500);
        assert!(outcome.error.is_some());
    }
}
