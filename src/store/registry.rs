//! Registry of cached documents keyed by resolved URL.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::join_all;

use crate::config::StoreConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{DeepMerge, Merger};
use crate::observability::metrics;
use crate::storage::{LocalStorage, Storage};
use crate::store::entry::ConfigEntry;
use crate::store::resolve::resolve_url;
use crate::store::StoreContext;
use crate::transport::{HttpTransport, Transport};

/// Owns one [`ConfigEntry`] per resolved URL for the lifetime of the store.
pub struct ConfigStore {
    entries: DashMap<String, Arc<ConfigEntry>>,
    default_source: String,
    context: Arc<StoreContext>,
}

impl ConfigStore {
    /// Build a store with the HTTP transport, filesystem storage and deep merge.
    pub fn new(config: StoreConfig) -> ConfigResult<Self> {
        Self::builder(config).build()
    }

    /// Start building a store, optionally swapping in other capabilities.
    pub fn builder(config: StoreConfig) -> ConfigStoreBuilder {
        ConfigStoreBuilder {
            config,
            transport: None,
            storage: None,
            merger: None,
        }
    }

    /// Get the entry for `file` under the default source root.
    pub async fn get(&self, file: &str) -> ConfigResult<Arc<ConfigEntry>> {
        self.get_from(file, &self.default_source).await
    }

    /// Get the entry for `file` under `source_root`, creating and loading it
    /// on first request.
    ///
    /// An existing entry is returned as is, without a refresh. A new entry is
    /// registered before any I/O starts, seeded from the local copy when local
    /// caching is enabled, then refreshed from the remote. Whether that refresh
    /// updated anything does not matter to the caller; only errors do.
    pub async fn get_from(&self, file: &str, source_root: &str) -> ConfigResult<Arc<ConfigEntry>> {
        let url = resolve_url(file, source_root)?;

        let entry = match self.entries.entry(url.to_string()) {
            Entry::Occupied(slot) => return Ok(slot.get().clone()),
            Entry::Vacant(slot) => {
                let entry = Arc::new(ConfigEntry::new(
                    file,
                    source_root,
                    url,
                    self.context.clone(),
                ));
                slot.insert(entry.clone());
                entry
            }
        };

        metrics::record_entries(self.entries.len());
        tracing::info!(url = %entry.url(), "Config entry registered");

        if self.context.local_root.is_some() {
            entry.read_local_file().await?;
        }

        let updated = entry.invalidate().await?;
        tracing::debug!(url = %entry.url(), updated, "Initial load finished");

        Ok(entry)
    }

    /// Existing entry for `file` under `source_root`, without creating or
    /// fetching anything.
    pub fn lookup(&self, file: &str, source_root: &str) -> Option<Arc<ConfigEntry>> {
        let url = resolve_url(file, source_root).ok()?;
        self.entries.get(url.as_str()).map(|r| r.value().clone())
    }

    /// Refresh every registered entry concurrently.
    ///
    /// All refreshes run to completion. Returns `Ok(true)` only if every entry
    /// was updated; if any refresh failed with an error, the first such error
    /// is returned instead.
    pub async fn invalidate_all(&self) -> ConfigResult<bool> {
        let entries: Vec<Arc<ConfigEntry>> =
            self.entries.iter().map(|r| r.value().clone()).collect();

        let results = join_all(entries.iter().map(|entry| entry.invalidate())).await;

        let mut all_updated = true;
        let mut first_error: Option<ConfigError> = None;
        for (entry, result) in entries.iter().zip(results) {
            match result {
                Ok(updated) => all_updated &= updated,
                Err(e) => {
                    tracing::warn!(url = %entry.url(), error = %e, "Refresh failed");
                    all_updated = false;
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        tracing::info!(entries = entries.len(), all_updated, "Invalidated all entries");
        Ok(all_updated)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolved URLs of all registered entries, sorted.
    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.entries.iter().map(|r| r.key().clone()).collect();
        urls.sort();
        urls
    }

    pub fn default_source(&self) -> &str {
        &self.default_source
    }

    pub fn is_debug(&self) -> bool {
        self.context.debug
    }
}

/// Builder for [`ConfigStore`] with injectable capabilities.
pub struct ConfigStoreBuilder {
    config: StoreConfig,
    transport: Option<Arc<dyn Transport>>,
    storage: Option<Arc<dyn Storage>>,
    merger: Option<Arc<dyn Merger>>,
}

impl ConfigStoreBuilder {
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn merger(mut self, merger: Arc<dyn Merger>) -> Self {
        self.merger = Some(merger);
        self
    }

    pub fn local_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.local_root = Some(root.into());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    pub fn build(self) -> ConfigResult<ConfigStore> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config.http).map_err(ConfigError::Client)?),
        };
        let storage: Arc<dyn Storage> = match self.storage {
            Some(storage) => storage,
            None => Arc::new(LocalStorage),
        };
        let merger: Arc<dyn Merger> = match self.merger {
            Some(merger) => merger,
            None => Arc::new(DeepMerge),
        };

        let context = StoreContext {
            transport,
            storage,
            merger,
            local_root: self.config.local_root,
            debug: self.config.debug,
        };

        tracing::debug!(
            source_root = %self.config.source_root,
            local_cache = context.local_root.is_some(),
            debug = context.debug,
            "Config store created"
        );

        Ok(ConfigStore {
            entries: DashMap::new(),
            default_source: self.config.source_root,
            context: Arc::new(context),
        })
    }
}
