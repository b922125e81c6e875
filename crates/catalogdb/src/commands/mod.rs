//! # Command Layer
//!
//! One submodule per collection operation. Commands are the collaborators of
//! the store: they call it through [`DataStore`], and turn whatever comes back
//! into an [`Outcome`].
//!
//! ## Role and Responsibilities
//!
//! - Decide which store call(s) an operation needs
//! - Validate caller arguments the store does not see (e.g. batch-delete lists)
//! - Convert every error into a tagged `Outcome`, so callers never handle raw
//!   `StoreError`s
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout/stderr, no exit codes
//! - **Transport mapping**: `Outcome::code` carries an HTTP-style number, but
//!   choosing to use it is the caller's business
//!
//! ## Outcome Shape
//!
//! ```text
//! { "status": "not_found", "code": 404, "message": "Item with id 1000000001 not found",
//!   "error": { "kind": "not_found", "detail": "...", "value": 1000000001 } }
//! ```
//!
//! Payload fields (`records`, `ids`, `results`) are present only when set.
//!
//! ## Command Modules
//!
//! - [`create`]: Store one new record (id assigned by the store)
//! - [`import`]: Store a batch whose records may carry ids
//! - [`list`]: Read a whole collection
//! - [`get`]: Find one record by id
//! - [`update`]: Set one field on a record
//! - [`delete`]: Remove one record, or many (batch delete)

use crate::error::{ErrorKind, StoreError};
use crate::model::{Record, RecordId};
use serde::Serialize;
use serde_json::Value;

pub mod create;
pub mod delete;
pub mod get;
pub mod import;
pub mod list;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    InvalidInput,
    InvalidIdentifier,
    DuplicateIdentifier,
    NotFound,
    ResourceExhausted,
    IoFailure,
}

impl Status {
    /// HTTP-style status code for transports that want one.
    pub fn code(self) -> u16 {
        match self {
            Status::Success => 200,
            Status::InvalidInput | Status::InvalidIdentifier => 400,
            Status::NotFound => 404,
            Status::DuplicateIdentifier => 409,
            Status::IoFailure => 500,
            Status::ResourceExhausted => 503,
        }
    }
}

impl From<ErrorKind> for Status {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => Status::NotFound,
            ErrorKind::InvalidIdentifier => Status::InvalidIdentifier,
            ErrorKind::DuplicateIdentifier => Status::DuplicateIdentifier,
            ErrorKind::InvalidInput => Status::InvalidInput,
            ErrorKind::ResourceExhausted => Status::ResourceExhausted,
            ErrorKind::IoFailure => Status::IoFailure,
        }
    }
}

/// Machine-inspectable failure detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Per-id entry of a batch delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteEntry {
    pub id: Value,
    pub result: Outcome,
}

/// The tagged result every command returns.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub status: Status,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Record>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<RecordId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<DeleteEntry>,
}

impl Outcome {
    fn with_status(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            code: status.code(),
            message: message.into(),
            error: None,
            records: Vec::new(),
            ids: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_status(Status::Success, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        let message = message.into();
        let mut outcome = Self::with_status(Status::InvalidInput, message.clone());
        outcome.error = Some(ErrorDetail {
            kind: ErrorKind::InvalidInput,
            detail: message,
            value: None,
        });
        outcome
    }

    pub fn not_found(message: impl Into<String>, value: Option<Value>) -> Self {
        let message = message.into();
        let mut outcome = Self::with_status(Status::NotFound, message.clone());
        outcome.error = Some(ErrorDetail {
            kind: ErrorKind::NotFound,
            detail: message,
            value,
        });
        outcome
    }

    pub fn from_error(err: &StoreError) -> Self {
        let kind = err.kind();
        let mut outcome = Self::with_status(kind.into(), err.to_string());
        outcome.error = Some(ErrorDetail {
            kind,
            detail: err.to_string(),
            value: err.offending_value(),
        });
        outcome
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    pub fn with_ids(mut self, ids: Vec<RecordId>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_results(mut self, results: Vec<DeleteEntry>) -> Self {
        self.results = results;
        self
    }
}

impl From<StoreError> for Outcome {
    fn from(err: StoreError) -> Self {
        Outcome::from_error(&err)
    }
}
