//! # Domain Model: Records, Identifiers and Collections
//!
//! The store itself only knows about [`Record`]s: JSON objects with an `id`
//! field. Everything else in a record is opaque to it.
//!
//! ## Identifiers
//!
//! A [`RecordId`] is a 10-digit integer in `[1_000_000_000, 9_999_999_999]`.
//! It is unique within one collection file and never changes once assigned.
//! Construction goes through [`RecordId::new`] (or `TryFrom<u64>` when
//! deserializing), so an out-of-range id cannot exist as a `RecordId` value.
//!
//! ## Collections
//!
//! Each [`Collection`] maps to one JSON array file:
//!
//! ```text
//! <data_dir>/
//! ├── user.data.json
//! ├── product.data.json
//! └── category.data.json
//! ```
//!
//! ## Entities
//!
//! [`User`], [`Product`] and [`Category`] are typed drafts used by callers
//! that want structure on top of the opaque records. Associations between
//! them are plain [`RecordId`] references (e.g. `Product::category_ids`);
//! linking a product to a category means storing the id on each side, never
//! embedding one object in another.

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A persisted document. Field order is preserved on disk.
pub type Record = Map<String, Value>;

/// Name of the identity field carried by every persisted record.
pub const ID_FIELD: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RecordId(u64);

impl RecordId {
    pub const MIN: u64 = 1_000_000_000;
    pub const MAX: u64 = 9_999_999_999;

    pub fn new(value: u64) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Interprets a JSON value as an identifier.
    ///
    /// Only JSON integers inside the valid range qualify: strings, floats,
    /// negatives and out-of-range numbers all yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_u64().and_then(Self::new)
    }
}

impl TryFrom<u64> for RecordId {
    type Error = String;

    fn try_from(value: u64) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{} is not a 10-digit id", value))
    }
}

impl From<RecordId> for u64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        Value::from(id.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| StoreError::InvalidIdentifier(Value::String(s.to_string())))
    }
}

/// Returns the record's id if it holds a valid one.
pub fn record_id(record: &Record) -> Option<RecordId> {
    record.get(ID_FIELD).and_then(RecordId::from_value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    User,
    Product,
    Category,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::User, Collection::Product, Collection::Category];

    pub fn file_name(self) -> &'static str {
        match self {
            Collection::User => "user.data.json",
            Collection::Product => "product.data.json",
            Collection::Category => "category.data.json",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Collection::User => "users",
            Collection::Product => "products",
            Collection::Category => "categories",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// A typed draft that can be stored in its collection.
pub trait Entity: Serialize {
    const COLLECTION: Collection;

    /// Converts the draft to a record. Drafts carry no `id`; the store
    /// assigns one on write.
    fn to_record(&self) -> Result<Record> {
        match serde_json::to_value(self).map_err(StoreError::Malformed)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::InvalidInput(format!(
                "{} entity did not serialize to an object: {}",
                Self::COLLECTION,
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub product_id: RecordId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub basket: Vec<BasketItem>,
}

impl User {
    /// Adds `quantity` of a product, merging with an existing basket line.
    pub fn add_to_basket(&mut self, product_id: RecordId, quantity: u32) {
        match self.basket.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.basket.push(BasketItem {
                product_id,
                quantity,
            }),
        }
    }
}

impl Entity for User {
    const COLLECTION: Collection = Collection::User;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    #[serde(default)]
    pub category_ids: Vec<RecordId>,
}

impl Product {
    pub fn add_category(&mut self, category_id: RecordId) {
        if !self.category_ids.contains(&category_id) {
            self.category_ids.push(category_id);
        }
    }
}

impl Entity for Product {
    const COLLECTION: Collection = Collection::Product;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_ids: Vec<RecordId>,
}

impl Category {
    pub fn add_product(&mut self, product_id: RecordId) {
        if !self.product_ids.contains(&product_id) {
            self.product_ids.push(product_id);
        }
    }
}

impl Entity for Category {
    const COLLECTION: Collection = Collection::Category;
}
