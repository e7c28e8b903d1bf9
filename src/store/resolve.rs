//! Resolution of file names against a source root.

use std::path::{Component, Path, PathBuf};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Combine a file name and a source root into the canonical document URL.
///
/// The source root is treated as a directory whether or not it ends in `/`,
/// and leading slashes on the file name are ignored, so `("a/b.json",
/// "https://h/r")` and `("/a/b.json", "https://h/r/")` resolve identically.
/// With an empty source root the file name must itself be an absolute URL.
pub fn resolve_url(file: &str, source_root: &str) -> ConfigResult<Url> {
    let invalid = |source| ConfigError::InvalidUrl {
        file: file.to_string(),
        source_root: source_root.to_string(),
        source,
    };

    if source_root.is_empty() {
        return Url::parse(file).map_err(invalid);
    }

    let base = if source_root.ends_with('/') {
        Url::parse(source_root)
    } else {
        Url::parse(&format!("{}/", source_root))
    }
    .map_err(invalid)?;

    base.join(file.trim_start_matches('/')).map_err(invalid)
}

/// Path of the local copy of `file`, relative to the local cache root.
///
/// Absolute URLs are mapped to `host/path`. `.` and `..` segments are resolved
/// the way URL joining resolves them, and `..` never climbs above the root, so
/// the result always lands inside the cache root.
pub fn local_relative_path(file: &str) -> PathBuf {
    let raw = match Url::parse(file) {
        Ok(url) => format!("{}/{}", url.host_str().unwrap_or_default(), url.path()),
        Err(_) => file.to_string(),
    };

    let mut relative = PathBuf::new();
    for component in Path::new(&raw).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::ParentDir => {
                relative.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    relative
}
