//! # CLI Behavior
//!
//! This is **one possible client** for catalogdb, not the store itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! ## Usage
//!
//! ```text
//! catalog products add --field name=Laptop --field price=1500
//! catalog products add --json '{"name": "Phone", "stock": 3}'
//! catalog products list
//! catalog products get 1234567890
//! catalog products set 1234567890 stock 49
//! catalog products rm 1234567890 2345678901
//! catalog products import backup.json
//! ```
//!
//! `--field` values are parsed as JSON when they can be (`price=1500` stores a
//! number, `tags=["a"]` an array) and stored as strings otherwise.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Config, logging, and dispatch to the API
//! - `render`: Outcome formatting

mod commands;
mod render;
pub mod setup;

pub use commands::run;
