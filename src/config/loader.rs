//! Settings loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::StoreConfig;
use crate::config::validation::validate_config;
use crate::error::SettingsError;

/// Load and validate settings from a TOML file.
pub fn load_config(path: &Path) -> Result<StoreConfig, SettingsError> {
    let content = fs::read_to_string(path)?;
    let config: StoreConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(SettingsError::Validation)?;

    tracing::debug!(path = %path.display(), "Settings loaded");
    Ok(config)
}
