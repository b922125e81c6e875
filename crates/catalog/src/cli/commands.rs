use super::render::render_outcome;
use super::setup::{Action, Cli};
use anyhow::{Context, Result};
use catalogdb::api::CatalogApi;
use catalogdb::commands::Outcome;
use catalogdb::config::CatalogConfig;
use catalogdb::error::StoreError;
use catalogdb::model::{Record, RecordId};
use catalogdb::store::DataStore;
use clap::Parser;
use serde_json::Value;
use std::fs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Parse arguments, run one command, print its outcome.
/// Returns whether the outcome was a success.
pub fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(file) => CatalogConfig::load_from(file)?,
        None => CatalogConfig::load()?,
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    debug!(?config, "resolved configuration");

    let api = CatalogApi::open(&config)?;
    let (collection, action) = cli.command.split();
    let outcome = dispatch(&api, collection, action)?;

    println!("{}", render_outcome(&outcome)?);
    Ok(outcome.is_success())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn dispatch<S: DataStore>(
    api: &CatalogApi<S>,
    collection: catalogdb::model::Collection,
    action: Action,
) -> Result<Outcome> {
    let outcome = match action {
        Action::Add { fields, json } => {
            let record = match json {
                Some(raw) => serde_json::from_str::<Value>(&raw)
                    .map_err(|e| StoreError::InvalidInput(format!("--json: {}", e))),
                None => parse_fields(&fields).map(Value::Object),
            };
            match record {
                Ok(record) => api.create(collection, record),
                Err(e) => Outcome::from(e),
            }
        }
        Action::List => api.list(collection),
        Action::Get { id } => match id.parse::<RecordId>() {
            Ok(id) => api.get(collection, id),
            Err(e) => Outcome::from(e),
        },
        Action::Set { id, field, value } => match id.parse::<RecordId>() {
            Ok(id) => api.update(collection, id, &field, parse_value(&value)),
            Err(e) => Outcome::from(e),
        },
        Action::Rm { ids } if ids.len() == 1 => api.delete_value(collection, &id_value(&ids[0])),
        Action::Rm { ids } => {
            let ids = Value::Array(ids.iter().map(String::as_str).map(id_value).collect());
            api.delete_many(collection, Some(&ids))
        }
        Action::Import { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            match serde_json::from_str::<Value>(&raw) {
                Ok(records) => api.import(collection, records),
                Err(e) => Outcome::from(StoreError::InvalidInput(format!(
                    "{} is not valid JSON: {}",
                    file.display(),
                    e
                ))),
            }
        }
    };
    Ok(outcome)
}

/// `KEY=VALUE` pairs into a record, values parsed with [`parse_value`].
fn parse_fields(fields: &[String]) -> std::result::Result<Record, StoreError> {
    let mut record = Record::new();
    for field in fields {
        let (key, value) = field
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| {
                StoreError::InvalidInput(format!("expected KEY=VALUE, got '{}'", field))
            })?;
        record.insert(key.trim().to_string(), parse_value(value));
    }
    Ok(record)
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Ids to delete stay numeric when they look numeric, so they match the
/// numbers stored in the file.
fn id_value(raw: &str) -> Value {
    raw.trim()
        .parse::<u64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(raw.to_string()))
}
