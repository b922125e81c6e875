use catalogdb::model::Collection;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog", bin_name = "catalog", version)]
#[command(about = "Flat-file JSON store for users, products and categories", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the collection files
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to catalog.toml in the OS config directory)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with the user collection
    #[command(alias = "user")]
    Users {
        #[command(subcommand)]
        action: Action,
    },

    /// Work with the product collection
    #[command(alias = "product")]
    Products {
        #[command(subcommand)]
        action: Action,
    },

    /// Work with the category collection
    #[command(alias = "category")]
    Categories {
        #[command(subcommand)]
        action: Action,
    },
}

impl Commands {
    pub fn split(self) -> (Collection, Action) {
        match self {
            Commands::Users { action } => (Collection::User, action),
            Commands::Products { action } => (Collection::Product, action),
            Commands::Categories { action } => (Collection::Category, action),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Add a record; the store assigns its id
    #[command(alias = "create")]
    Add {
        /// Field as KEY=VALUE (repeatable)
        #[arg(long = "field", short = 'f', value_name = "KEY=VALUE")]
        fields: Vec<String>,

        /// Whole record as a JSON object
        #[arg(long, conflicts_with = "fields")]
        json: Option<String>,
    },

    /// List every record
    #[command(alias = "ls")]
    List,

    /// Show one record
    Get {
        /// Record id (10 digits)
        id: String,
    },

    /// Set one field of a record
    #[command(alias = "update")]
    Set {
        /// Record id (10 digits)
        id: String,
        /// Field name
        field: String,
        /// New value (JSON, or a plain string)
        value: String,
    },

    /// Remove one or more records
    #[command(alias = "delete")]
    Rm {
        /// Record ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Append records from a JSON file (object or array); ids are kept
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
}
