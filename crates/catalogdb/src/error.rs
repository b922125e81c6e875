use crate::model::RecordId;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Item with id {0} not found")]
    RecordNotFound(Value),

    #[error("Invalid id: {0}. ID must be a 10-digit number")]
    InvalidIdentifier(Value),

    #[error("Duplicate id: {0} already exists")]
    DuplicateIdentifier(RecordId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No free identifier after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed collection file: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Coarse classification of a [`StoreError`], stable enough for callers to
/// branch on (or map to HTTP status codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidIdentifier,
    DuplicateIdentifier,
    InvalidInput,
    ResourceExhausted,
    IoFailure,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::FileNotFound(_) | StoreError::RecordNotFound(_) => ErrorKind::NotFound,
            StoreError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            StoreError::DuplicateIdentifier(_) => ErrorKind::DuplicateIdentifier,
            StoreError::InvalidInput(_) => ErrorKind::InvalidInput,
            StoreError::IdSpaceExhausted { .. } => ErrorKind::ResourceExhausted,
            StoreError::Io(_) | StoreError::Malformed(_) | StoreError::Config(_) => {
                ErrorKind::IoFailure
            }
        }
    }

    /// The caller-supplied value the error is about, when there is one.
    pub fn offending_value(&self) -> Option<Value> {
        match self {
            StoreError::InvalidIdentifier(v) | StoreError::RecordNotFound(v) => Some(v.clone()),
            StoreError::DuplicateIdentifier(id) => Some(Value::from(*id)),
            _ => None,
        }
    }
}

impl From<confique::Error> for StoreError {
    fn from(err: confique::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_group_not_found_variants() {
        let id = RecordId::new(1000000001).unwrap();
        assert_eq!(StoreError::RecordNotFound(id.into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            StoreError::FileNotFound(PathBuf::from("/nope")).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn io_and_parse_failures_are_io_kind() {
        let io = StoreError::from(std::io::Error::other("disk"));
        assert_eq!(io.kind(), ErrorKind::IoFailure);

        let parse = serde_json::from_str::<Value>("{not json").unwrap_err();
        assert_eq!(StoreError::from(parse).kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = StoreError::InvalidIdentifier(json!(42));
        assert_eq!(err.to_string(), "Invalid id: 42. ID must be a 10-digit number");
        assert_eq!(err.offending_value(), Some(json!(42)));

        let dup = StoreError::DuplicateIdentifier(RecordId::new(1234567890).unwrap());
        assert_eq!(dup.to_string(), "Duplicate id: 1234567890 already exists");
    }
}
