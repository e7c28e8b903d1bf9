//! Local storage capability for cached copies of remote documents.

pub mod local;

use async_trait::async_trait;
use std::io;
use std::path::Path;

pub use local::LocalStorage;

/// Capability to read and write UTF-8 text files.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn read_text(&self, path: &Path) -> io::Result<String>;

    async fn write_text(&self, path: &Path, contents: &str) -> io::Result<()>;
}
