//! Error definitions for the config store.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::validation::ValidationError;
use crate::transport::TransportError;

/// Errors that can occur while resolving, fetching or persisting configs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File name and source root do not combine into a valid URL.
    #[error("Cannot resolve '{file}' against source '{source_root}': {source}")]
    InvalidUrl {
        file: String,
        source_root: String,
        #[source]
        source: url::ParseError,
    },

    /// Transport failure surfaced to the caller.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Remote body was text but not valid JSON.
    #[error("Malformed JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Local cache file could not be read.
    #[error("Failed to read local copy {}: {source}", path.display())]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Local cache file is not valid JSON.
    #[error("Local copy {} is not valid JSON: {source}", path.display())]
    LocalParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Local cache file could not be written.
    #[error("Failed to write local copy {}: {source}", path.display())]
    LocalWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content could not be serialized or deserialized into a typed value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Settings file could not be loaded.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors raised while loading the store settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for config store operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
