//! # Configuration
//!
//! Catalog configuration is managed by [`confique`], which handles layered loading
//! from a TOML file, environment variables, and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Programmatic overrides**: e.g. the CLI's `--data-dir` flag.
//! 2. **Environment variables**: `CATALOG_DATA_DIR`, `CATALOG_MAX_ID_ATTEMPTS`.
//! 3. **Config file**: `--config <file>`, or `catalog.toml` in the OS config
//!    directory (via the `directories` crate).
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data directory | Where the collection files live |
//! | `max_id_attempts` | `10000` | Id draws per record before failing |

use crate::error::{Result, StoreError};
use crate::ids::DEFAULT_MAX_ATTEMPTS;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "catalog.toml";

/// Configuration for catalogdb, stored in `catalog.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding the collection files. Falls back to the OS data directory.
    #[config(env = "CATALOG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// How many identifier draws to attempt per record before giving up.
    #[config(env = "CATALOG_MAX_ID_ATTEMPTS", default = 10000)]
    pub max_id_attempts: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_id_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "catalog")
}

impl CatalogConfig {
    /// Load from the environment and an explicit file (which may be absent).
    pub fn load_from(file: &Path) -> Result<Self> {
        let config = Self::builder().env().file(file).load()?;
        Ok(config)
    }

    /// Load from the environment and the default config file location.
    pub fn load() -> Result<Self> {
        match Self::default_config_file() {
            Some(file) => Self::load_from(&file),
            None => Ok(Self::builder().env().load()?),
        }
    }

    pub fn default_config_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// The configured data directory, or the OS default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| StoreError::Config("could not determine a data directory".to_string()))
    }
}
