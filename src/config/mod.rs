//! Store settings subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → StoreConfig (validated, immutable)
//!     → handed to ConfigStore::builder
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once the store is built
//! - All fields have defaults to allow minimal files
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::load_config;
pub use schema::{HttpConfig, ObservabilityConfig, RefreshConfig, StoreConfig};
