//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the source root is an absolute URL with a supported scheme
//! - Validate value ranges (timeouts > 0, intervals > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: StoreConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::StoreConfig;

const SUPPORTED_SCHEMES: &[&str] = &["http", "https"];

/// A single semantic problem in the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate settings, collecting every problem found.
pub fn validate_config(config: &StoreConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.source_root.is_empty() {
        match url::Url::parse(&config.source_root) {
            Ok(url) if !SUPPORTED_SCHEMES.contains(&url.scheme()) => {
                errors.push(ValidationError::new(
                    "source_root",
                    format!("unsupported scheme '{}'", url.scheme()),
                ));
            }
            Ok(_) => {}
            Err(e) => {
                errors.push(ValidationError::new(
                    "source_root",
                    format!("not an absolute URL ({})", e),
                ));
            }
        }
    }

    if config.http.timeout_secs == 0 {
        errors.push(ValidationError::new("http.timeout_secs", "must be greater than zero"));
    }

    if config.http.user_agent.trim().is_empty() {
        errors.push(ValidationError::new("http.user_agent", "must not be empty"));
    }

    if config.refresh.enabled && config.refresh.interval_secs == 0 {
        errors.push(ValidationError::new(
            "refresh.interval_secs",
            "must be greater than zero",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address '{}'", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
