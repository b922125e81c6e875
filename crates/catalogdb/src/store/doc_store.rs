use super::backend::StorageBackend;
use super::coordinator::FileCoordinator;
use super::{Batch, DataStore, WriteReport};
use crate::error::{Result, StoreError};
use crate::ids::{self, DEFAULT_MAX_ATTEMPTS};
use crate::model::{record_id, Record, RecordId, ID_FIELD};
use serde::de::Error as _;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

pub struct DocumentStore<B: StorageBackend> {
    backend: B,
    coordinator: FileCoordinator,
    max_id_attempts: usize,
}

impl<B: StorageBackend> DocumentStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            coordinator: FileCoordinator::new(),
            max_id_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Cap on id draws per generated record before giving up.
    pub fn with_max_id_attempts(mut self, attempts: usize) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load and parse a collection file.
    /// Ok(None) means the file does not exist.
    fn load(&self, path: &Path) -> Result<Option<Vec<Record>>> {
        let Some(raw) = self.backend.read_raw(path)? else {
            return Ok(None);
        };

        let items = match serde_json::from_str::<Value>(&raw)? {
            Value::Array(items) => items,
            other => {
                warn!(
                    path = %path.display(),
                    kind = json_kind(&other),
                    "collection file is not an array; treating as empty"
                );
                return Ok(Some(Vec::new()));
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(StoreError::Malformed(serde_json::Error::custom(format!(
                    "element {} of {} is a {}, expected an object",
                    i,
                    path.display(),
                    json_kind(&other)
                )))),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    fn save(&self, path: &Path, records: &[Record]) -> Result<()> {
        let content = serde_json::to_string_pretty(records)?;
        self.backend.write_raw(path, &content)
    }

    /// Give every record in `batch` a valid, unique id, or fail without
    /// touching anything on disk.
    fn assign_ids(&self, used: &mut HashSet<RecordId>, batch: Vec<Record>) -> Result<Vec<Record>> {
        let mut rng = rand::thread_rng();
        let mut out = Vec::with_capacity(batch.len());

        for record in batch {
            match record.get(ID_FIELD) {
                None | Some(Value::Null) => {
                    let id = ids::generate_numeric(&mut rng, used, self.max_id_attempts)?;
                    used.insert(id);
                    out.push(with_id_first(id, record));
                }
                Some(raw) => {
                    let id = RecordId::from_value(raw)
                        .ok_or_else(|| StoreError::InvalidIdentifier(raw.clone()))?;
                    if !used.insert(id) {
                        return Err(StoreError::DuplicateIdentifier(id));
                    }
                    out.push(record);
                }
            }
        }
        Ok(out)
    }
}

impl<B: StorageBackend> DataStore for DocumentStore<B> {
    fn read(&self, path: &Path) -> Result<Vec<Record>> {
        let records = self.load(path)?.unwrap_or_default();
        debug!(path = %path.display(), count = records.len(), "read collection");
        Ok(records)
    }

    fn write(&self, path: &Path, batch: Batch) -> Result<WriteReport> {
        if batch.is_empty() {
            return Ok(WriteReport::default());
        }

        let _guard = self.coordinator.lock(path);

        let mut records = self.load(path)?.unwrap_or_default();
        let mut used: HashSet<RecordId> = records.iter().filter_map(record_id).collect();

        let incoming = self.assign_ids(&mut used, batch.0).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "rejected batch");
        })?;

        let ids: Vec<RecordId> = incoming.iter().filter_map(record_id).collect();
        records.extend(incoming);
        self.save(path, &records)?;

        debug!(
            path = %path.display(),
            written = ids.len(),
            total = records.len(),
            "appended records"
        );
        Ok(WriteReport {
            written: ids.len(),
            ids,
        })
    }

    fn remove(&self, path: &Path, id: &Value) -> Result<Record> {
        let _guard = self.coordinator.lock(path);

        let records = self
            .load(path)?
            .ok_or_else(|| StoreError::FileNotFound(path.to_path_buf()))?;

        let (removed, survivors): (Vec<Record>, Vec<Record>) = records
            .into_iter()
            .partition(|r| r.get(ID_FIELD) == Some(id));

        let Some(record) = removed.into_iter().next() else {
            return Err(StoreError::RecordNotFound(id.clone()));
        };

        self.save(path, &survivors)?;
        debug!(path = %path.display(), %id, remaining = survivors.len(), "removed record");
        Ok(record)
    }

    fn update(&self, path: &Path, id: RecordId, field: &str, value: Value) -> Result<Record> {
        if field == ID_FIELD {
            return Err(StoreError::InvalidInput(
                "the id field cannot be updated".to_string(),
            ));
        }
        if field.is_empty() {
            return Err(StoreError::InvalidInput("field name is empty".to_string()));
        }

        let _guard = self.coordinator.lock(path);

        let mut records = self
            .load(path)?
            .ok_or_else(|| StoreError::FileNotFound(path.to_path_buf()))?;

        let record = records
            .iter_mut()
            .find(|r| record_id(r) == Some(id))
            .ok_or_else(|| StoreError::RecordNotFound(id.into()))?;
        record.insert(field.to_string(), value);
        let updated = record.clone();

        self.save(path, &records)?;
        debug!(path = %path.display(), %id, field, "updated record");
        Ok(updated)
    }
}

/// Rebuild `record` with `id` as its first field, dropping any null `id`.
fn with_id_first(id: RecordId, record: Record) -> Record {
    let mut out = Record::with_capacity(record.len() + 1);
    out.insert(ID_FIELD.to_string(), id.into());
    out.extend(record.into_iter().filter(|(k, _)| k != ID_FIELD));
    out
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
