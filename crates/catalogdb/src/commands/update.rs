use crate::commands::Outcome;
use crate::model::RecordId;
use crate::store::DataStore;
use serde_json::Value;
use std::path::Path;

pub fn run<S: DataStore>(store: &S, path: &Path, id: RecordId, field: &str, value: Value) -> Outcome {
    match store.update(path, id, field, value) {
        Ok(record) => Outcome::success(format!("Item with id {} successfully updated", id))
            .with_records(vec![record]),
        Err(e) => Outcome::from(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Status;
    use crate::store::doc_store::DocumentStore;
    use crate::store::mem_backend::MemBackend;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn updates_field() {
        let store = DocumentStore::with_backend(MemBackend::new());
        let path = PathBuf::from("/data/p.json");
        store
            .backend()
            .put_raw(path.clone(), r#"[{"id": 1000000001, "price": 10}]"#);

        let id = RecordId::new(1000000001).unwrap();
        let outcome = run(&store, &path, id, "price", json!(12.5));
        assert!(outcome.is_success());
        assert_eq!(outcome.records[0]["price"], json!(12.5));
    }

    #[test]
    fn missing_file_is_not_found() {
        let store = DocumentStore::with_backend(MemBackend::new());
        let id = RecordId::new(1000000001).unwrap();
        let outcome = run(&store, &PathBuf::from("/data/p.json"), id, "price", json!(1));
        assert_eq!(outcome.status, Status::NotFound);
    }

    #[test]
    fn id_field_is_immutable() {
        let store = DocumentStore::with_backend(MemBackend::new());
        let id = RecordId::new(1000000001).unwrap();
        let outcome = run(&store, &PathBuf::from("/data/p.json"), id, "id", json!(1));
        assert_eq!(outcome.status, Status::InvalidInput);
    }
}
