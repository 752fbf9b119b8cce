//! Command-line driver: validate and store product records read from JSON
//! files, printing one outcome per record.

use std::path::Path;

use anyhow::{Context, bail};
use serde::Serialize;
use serde_json::Value as JsonValue;

use catalog_infra::{ProductService, ProductStore, SaveError};
use catalog_products::{FieldReport, Product, ProductDraft};

/// One input record: a draft, or the reason it could not be read as one.
pub type Record = Result<ProductDraft, serde_json::Error>;

/// Parse a JSON document holding either one product draft or an array of them.
///
/// Only a document that is not JSON, or whose top level is neither an object
/// nor an array, fails as a whole. A malformed array element fails on its own.
pub fn parse_drafts(text: &str) -> anyhow::Result<Vec<Record>> {
    let value: JsonValue = serde_json::from_str(text).context("input is not valid JSON")?;
    match value {
        JsonValue::Array(items) => Ok(items.into_iter().map(serde_json::from_value).collect()),
        JsonValue::Object(_) => Ok(vec![serde_json::from_value(value)]),
        _ => bail!("expected a product object or an array of product objects"),
    }
}

pub fn read_drafts(path: &Path) -> anyhow::Result<Vec<Record>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_drafts(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Printable result of saving one record.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Accepted { product: Product },
    Rejected { errors: Vec<FieldReport> },
    Failed { error: String },
}

impl From<Result<Product, SaveError>> for Outcome {
    fn from(result: Result<Product, SaveError>) -> Self {
        match result {
            Ok(product) => Outcome::Accepted { product },
            Err(SaveError::Rejected(errors)) => Outcome::Rejected {
                errors: errors.to_report(),
            },
            Err(err) => Outcome::Failed {
                error: err.to_string(),
            },
        }
    }
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    /// Input that never got as far as validation.
    pub fn failed(error: impl core::fmt::Display) -> Self {
        Outcome::Failed {
            error: error.to_string(),
        }
    }
}

/// Pre-load an existing collection. Seed records that fail are logged and
/// skipped; returns how many were stored.
pub fn seed<S: ProductStore>(service: &ProductService<S>, records: &[Record]) -> usize {
    let mut stored = 0;
    for (i, record) in records.iter().enumerate() {
        match record {
            Ok(draft) => match service.save(draft) {
                Ok(_) => stored += 1,
                Err(err) => tracing::warn!(record = i, error = %err, "seed record skipped"),
            },
            Err(err) => tracing::warn!(record = i, error = %err, "malformed seed record skipped"),
        }
    }
    stored
}

/// Save every record in order, one outcome each.
pub fn process<S: ProductStore>(service: &ProductService<S>, records: &[Record]) -> Vec<Outcome> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| match record {
            Ok(draft) => Outcome::from(service.save(draft)),
            Err(err) => {
                tracing::warn!(record = i, error = %err, "malformed record");
                Outcome::failed(format_args!("record {i} is malformed: {err}"))
            }
        })
        .collect()
}
