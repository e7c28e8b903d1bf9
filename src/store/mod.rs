//! Config store subsystem.
//!
//! # Data Flow
//! ```text
//! ConfigStore::get(file)
//!     → resolve.rs (file + source root → URL, the registry key)
//!     → registry.rs (existing entry? return it)
//!     → entry.rs (new entry: local seed → remote fetch → parse → swap → persist)
//!
//! Refresh:
//!     ConfigStore::invalidate_all / refresh.rs on a timer
//!     → ConfigEntry::invalidate on every entry, concurrently
//! ```
//!
//! # Design Decisions
//! - One entry per resolved URL for the lifetime of the store
//! - The registry slot is claimed before any I/O starts
//! - Content is swapped atomically; concurrent refreshes are last-write-wins
//! - Capabilities (transport, storage, merge) are injected via the builder

pub mod entry;
pub mod refresh;
pub mod registry;
pub mod resolve;

#[cfg(test)]
pub(crate) mod testing;

use std::path::PathBuf;
use std::sync::Arc;

use crate::merge::Merger;
use crate::storage::Storage;
use crate::transport::Transport;

pub use entry::ConfigEntry;
pub use refresh::Refresher;
pub use registry::{ConfigStore, ConfigStoreBuilder};
pub use resolve::resolve_url;

/// Capabilities and settings shared by the store and all of its entries.
pub(crate) struct StoreContext {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) merger: Arc<dyn Merger>,
    pub(crate) local_root: Option<PathBuf>,
    pub(crate) debug: bool,
}
