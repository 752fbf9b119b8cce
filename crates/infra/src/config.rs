//! Configuration loading and representation.

use std::path::PathBuf;

use thiserror::Error;

use catalog_observability::{LogFormat, ObservabilityConfig};

pub const LOG_FORMAT_VAR: &str = "CATALOG_LOG_FORMAT";
pub const SEED_FILE_VAR: &str = "CATALOG_SEED_FILE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Process settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogConfig {
    pub log_format: LogFormat,
    /// JSON array of product drafts loaded into the store before any input.
    pub seed_file: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; unset and empty values use defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|e| ConfigError::Invalid {
                var: LOG_FORMAT_VAR,
                reason: e.to_string(),
            })?,
            None => LogFormat::default(),
        };

        let seed_file = get(SEED_FILE_VAR).map(PathBuf::from);

        Ok(Self {
            log_format,
            seed_file,
        })
    }

    pub fn observability(&self) -> ObservabilityConfig {
        ObservabilityConfig {
            format: self.log_format,
            ..ObservabilityConfig::default()
        }
    }
}
