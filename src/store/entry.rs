//! A single cached remote document.
//!
//! # State Machine
//! ```text
//! Uninitialized ({}) ──local seed──▶ LocallyLoaded
//!        │                                │
//!        └──────────invalidate────────────┴──▶ RemotelyLoaded (2xx + parseable)
//!                                                  │
//!                                                  └──invalidate──▶ ...
//! ```
//! A failed or non-2xx refresh leaves the entry in whatever state it was.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::observability::metrics::{self, FetchOutcome};
use crate::store::resolve::local_relative_path;
use crate::store::StoreContext;
use crate::transport::ResponseBody;

/// One remote configuration document and its current in-memory content.
///
/// Entries are owned by [`ConfigStore`](crate::store::ConfigStore) and handed
/// out as `Arc<ConfigEntry>`. Content is replaced wholesale; readers always
/// see a complete document.
pub struct ConfigEntry {
    source_root: String,
    file_path: String,
    url: Url,
    content: ArcSwap<Value>,
    context: Arc<StoreContext>,
}

impl ConfigEntry {
    pub(crate) fn new(
        file_path: &str,
        source_root: &str,
        url: Url,
        context: Arc<StoreContext>,
    ) -> Self {
        Self {
            source_root: source_root.to_string(),
            file_path: file_path.to_string(),
            url,
            content: ArcSwap::from_pointee(Value::Object(Map::new())),
            context,
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn source_root(&self) -> &str {
        &self.source_root
    }

    /// Resolved URL; also the registry key.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Snapshot of the current content.
    pub fn content(&self) -> Arc<Value> {
        self.content.load_full()
    }

    /// Deserialize the current content into a typed value.
    pub fn content_as<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        let snapshot = self.content();
        Ok(T::deserialize(snapshot.as_ref())?)
    }

    /// Look up a value by JSON pointer (`/db/port`).
    pub fn pointer(&self, pointer: &str) -> Option<Value> {
        self.content().pointer(pointer).cloned()
    }

    /// Current content with `overlay` deep-merged on top. Never touches the
    /// stored content.
    pub fn merged_with(&self, overlay: &Value) -> Value {
        self.context.merger.merge(&self.content(), overlay)
    }

    /// Location of the local copy, when local caching is enabled.
    pub fn local_path(&self) -> Option<PathBuf> {
        self.context
            .local_root
            .as_ref()
            .map(|root| root.join(local_relative_path(&self.file_path)))
    }

    /// Fetch the document again and replace the content on success.
    ///
    /// Returns `Ok(false)` when the server answers outside 2xx, when the body
    /// is of an unsupported kind, or when the remote is unavailable and debug
    /// mode is off. Malformed JSON is always an error.
    pub async fn invalidate(&self) -> ConfigResult<bool> {
        let start = Instant::now();

        let response = match self.context.transport.fetch(&self.url).await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_fetch(FetchOutcome::Unavailable, start);
                if self.context.debug || !e.is_remote_unavailable() {
                    return Err(e.into());
                }
                tracing::warn!(
                    url = %self.url,
                    error = %e,
                    "Remote unavailable, keeping current content"
                );
                return Ok(false);
            }
        };

        if !response.is_success() {
            metrics::record_fetch(FetchOutcome::NotModified, start);
            tracing::debug!(
                url = %self.url,
                status = response.status,
                "Fetch returned non-success status"
            );
            return Ok(false);
        }

        let value = match response.body {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => serde_json::from_str(&text).map_err(|source| {
                metrics::record_fetch(FetchOutcome::Error, start);
                ConfigError::Parse {
                    url: self.url.to_string(),
                    source,
                }
            })?,
            other => {
                metrics::record_fetch(FetchOutcome::Unsupported, start);
                tracing::warn!(
                    url = %self.url,
                    kind = other.kind(),
                    "Don't know what to do with response body"
                );
                return Ok(false);
            }
        };

        self.content.store(Arc::new(value));
        metrics::record_fetch(FetchOutcome::Updated, start);
        tracing::debug!(url = %self.url, status = response.status, "Config refreshed");

        self.write_local_file().await?;
        Ok(true)
    }

    /// Seed the content from the local copy. A missing or unreadable copy
    /// leaves the content untouched unless debug mode is on.
    pub async fn read_local_file(&self) -> ConfigResult<()> {
        let Some(path) = self.local_path() else {
            return Ok(());
        };

        match self.load_local(&path).await {
            Ok(value) => {
                self.content.store(Arc::new(value));
                metrics::record_local_io("read", true);
                tracing::debug!(path = %path.display(), "Seeded from local copy");
                Ok(())
            }
            Err(e) => {
                metrics::record_local_io("read", false);
                if self.context.debug {
                    return Err(e);
                }
                tracing::debug!(error = %e, "No usable local copy");
                Ok(())
            }
        }
    }

    /// Persist the current content, pretty-printed, to the local copy.
    pub async fn write_local_file(&self) -> ConfigResult<()> {
        let Some(path) = self.local_path() else {
            return Ok(());
        };

        let result = self.persist(&path).await;
        metrics::record_local_io("write", result.is_ok());

        match result {
            Ok(()) => Ok(()),
            Err(e) if self.context.debug => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to update local copy");
                Ok(())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn replace_content(&self, value: Value) {
        self.content.store(Arc::new(value));
    }

    async fn load_local(&self, path: &Path) -> ConfigResult<Value> {
        let text = self
            .context
            .storage
            .read_text(path)
            .await
            .map_err(|source| ConfigError::LocalRead {
                path: path.to_path_buf(),
                source,
            })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::LocalParse {
            path: path.to_path_buf(),
            source,
        })
    }

    async fn persist(&self, path: &Path) -> ConfigResult<()> {
        let text = serde_json::to_string_pretty(self.content().as_ref())?;
        self.context
            .storage
            .write_text(path, &text)
            .await
            .map_err(|source| ConfigError::LocalWrite {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl std::fmt::Debug for ConfigEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigEntry")
            .field("url", &self.url.as_str())
            .field("content", &self.content())
            .finish()
    }
}
