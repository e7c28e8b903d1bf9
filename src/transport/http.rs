//! HTTP transport backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use crate::config::HttpConfig;
use crate::transport::{FetchResponse, ResponseBody, Transport, TransportError};

/// Fetches documents with a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client that identifies itself with the configured user agent
    /// and applies the configured request timeout.
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build()?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_send_error(url, e))?;

        let status = response.status().as_u16();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("json"))
            .unwrap_or(false);

        let bytes = response.bytes().await.map_err(|e| TransportError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        tracing::trace!(url = %url, status, len = bytes.len(), is_json, "Response received");
        Ok(FetchResponse::new(status, decode_body(bytes.to_vec(), is_json)))
    }
}

fn classify_send_error(url: &Url, e: reqwest::Error) -> TransportError {
    if e.is_builder() {
        TransportError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        }
    } else {
        TransportError::NoResponse {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

/// Decode a body the way an HTTP client library would: JSON content types are
/// parsed eagerly, falling back to text when that fails.
fn decode_body(bytes: Vec<u8>, is_json: bool) -> ResponseBody {
    if is_json {
        if let Ok(value) = serde_json::from_slice(&bytes) {
            return ResponseBody::Json(value);
        }
    }

    match String::from_utf8(bytes) {
        Ok(text) => ResponseBody::Text(text),
        Err(e) => ResponseBody::Binary(e.into_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_content_type_decoded() {
        let body = decode_body(br#"{"a":1}"#.to_vec(), true);
        assert_eq!(body, ResponseBody::Json(json!({"a": 1})));
    }

    #[test]
    fn test_malformed_json_falls_back_to_text() {
        let body = decode_body(b"{not json".to_vec(), true);
        assert_eq!(body, ResponseBody::Text("{not json".into()));
    }

    #[test]
    fn test_plain_text_kept_as_text() {
        let body = decode_body(br#"{"a":1}"#.to_vec(), false);
        assert_eq!(body, ResponseBody::Text(r#"{"a":1}"#.into()));
    }

    #[test]
    fn test_non_utf8_is_binary() {
        let body = decode_body(vec![0xff, 0xfe, 0x00], false);
        assert_eq!(body.kind(), "binary");
    }

    #[test]
    fn test_client_builds_from_defaults() {
        assert!(HttpTransport::new(&HttpConfig::default()).is_ok());
    }
}
