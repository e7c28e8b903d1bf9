//! Registry of remote JSON configuration documents.
//!
//! Documents are addressed by a file name resolved against a source root,
//! fetched over HTTP, optionally mirrored to a local cache directory, and
//! shared as one [`ConfigEntry`] per resolved URL.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod merge;
pub mod observability;
pub mod storage;
pub mod store;
pub mod transport;

pub use config::StoreConfig;
pub use error::{ConfigError, ConfigResult};
pub use store::{ConfigEntry, ConfigStore};
