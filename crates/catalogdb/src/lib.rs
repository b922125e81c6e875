//! # catalogdb
//!
//! A flat-file JSON document store for a small catalog application (users,
//! products, categories).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Fixed path per collection                                │
//! │  - Tags each operation with a token (ids::IdAllocator)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*)                                 │
//! │  - create / import / list / get / update / delete           │
//! │  - Converts every error into a tagged `Outcome`             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/*)                                            │
//! │  - read / write / remove / update on one JSON array file    │
//! │  - id assignment and validation, per-path exclusive access  │
//! │  - StorageBackend: filesystem or in-memory                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use catalogdb::api::CatalogApi;
//! use catalogdb::config::CatalogConfig;
//! use catalogdb::model::{Collection, Product};
//!
//! let api = CatalogApi::open(&CatalogConfig::default())?;
//! let created = api.create_entity(&Product {
//!     name: "Laptop".into(),
//!     price: 1500.0,
//!     ..Default::default()
//! });
//! let listed = api.list(Collection::Product);
//! assert!(listed.records.len() >= created.ids.len());
//! # Ok::<(), catalogdb::error::StoreError>(())
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod store;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
