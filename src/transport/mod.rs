//! Transport capability used to fetch remote documents.
//!
//! # Data Flow
//! ```text
//! ConfigEntry::invalidate
//!     → Transport::fetch(url)
//!     → FetchResponse { status, body }
//!     → body classified as Json / Text / Binary
//! ```
//!
//! # Design Decisions
//! - Non-2xx responses are returned as data, not errors; the entry decides
//! - Errors distinguish "had a response" from "never got one" so callers can
//!   tell a normal remote outage from a programming mistake
//! - No retries and no timeouts beyond what the implementation applies

pub mod http;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use url::Url;

pub use http::HttpTransport;

/// Body of a fetch response, as far as the transport could decode it.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Transport already decoded structured data.
    Json(Value),
    /// Raw text still to be parsed.
    Text(String),
    /// Anything else (non-UTF-8 payloads).
    Binary(Vec<u8>),
}

impl ResponseBody {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseBody::Json(_) => "json",
            ResponseBody::Text(_) => "text",
            ResponseBody::Binary(_) => "binary",
        }
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl FetchResponse {
    pub fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }

    /// True for statuses in 200..=299.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors that can occur while fetching a document.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Server answered, but the transport surfaced the status as an error.
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    /// Connection failed or timed out before any response arrived.
    #[error("No response from {url}: {reason}")]
    NoResponse { url: String, reason: String },

    /// Response arrived but its body could not be read.
    #[error("Failed to read body from {url}: {reason}")]
    Body { url: String, reason: String },

    /// Request could not be built or sent at all.
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },
}

impl TransportError {
    /// Whether this is the expected "remote is unavailable" condition rather
    /// than an unexpected program error.
    pub fn is_remote_unavailable(&self) -> bool {
        !matches!(self, TransportError::Request { .. })
    }
}

/// Capability to issue a GET for a URL.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_boundary() {
        let body = || ResponseBody::Text("{}".into());
        assert!(!FetchResponse::new(199, body()).is_success());
        assert!(FetchResponse::new(200, body()).is_success());
        assert!(FetchResponse::new(299, body()).is_success());
        assert!(!FetchResponse::new(300, body()).is_success());
    }

    #[test]
    fn test_remote_unavailable_classification() {
        let url = "https://example.com/app.json".to_string();
        assert!(TransportError::Status { url: url.clone(), status: 404 }.is_remote_unavailable());
        assert!(TransportError::NoResponse { url: url.clone(), reason: "timeout".into() }
            .is_remote_unavailable());
        assert!(TransportError::Body { url: url.clone(), reason: "reset".into() }
            .is_remote_unavailable());
        assert!(!TransportError::Request { url, reason: "bad header".into() }
            .is_remote_unavailable());
    }
}
