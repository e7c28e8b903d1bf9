//! Settings schema definitions.
//!
//! This module defines the settings structure for the config store.
//! All types derive Serde traits for deserialization from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root settings for the config store.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Default source root that relative file names are resolved against.
    /// Empty means file names must already be absolute URLs.
    pub source_root: String,

    /// Local cache root. When unset, local read/write is skipped entirely.
    pub local_root: Option<PathBuf>,

    /// Propagate transport and local I/O failures instead of absorbing them.
    pub debug: bool,

    /// Outbound HTTP settings.
    pub http: HttpConfig,

    /// Background refresh settings.
    pub refresh: RefreshConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Value of the `User-Agent` header sent with every fetch.
    pub user_agent: String,

    /// Total request timeout in seconds.
    pub timeout_secs: u64,

    /// Honour proxy settings from the environment (`HTTP_PROXY` and friends).
    pub system_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "remote-config".to_string(),
            timeout_secs: 10,
            system_proxy: true,
        }
    }
}

/// Periodic refresh of every known entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Enable the background refresher.
    pub enabled: bool,

    /// Interval between refresh cycles in seconds.
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 300,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
