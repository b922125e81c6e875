//! # catalog CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and turns its result into an exit code.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/catalog/src/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config + logging setup, dispatch (commands.rs)           │
//! │  - Outcome rendering as JSON (render.rs)                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  catalogdb::api::CatalogApi                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command prints one outcome as pretty JSON on stdout. Logs go to
//! stderr. The exit code is 0 when the outcome is a success and 1 otherwise.

mod cli;

fn main() {
    match cli::run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
