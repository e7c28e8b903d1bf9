//! Filesystem-backed storage.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::fs;

use crate::storage::Storage;

/// Reads and writes through `tokio::fs`, creating parent directories on write.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[async_trait]
impl Storage for LocalStorage {
    async fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path).await
    }

    async fn write_text(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, contents).await
    }
}
