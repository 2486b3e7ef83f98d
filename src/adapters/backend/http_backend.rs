//! HTTP Chat Backend - posts exchanges to the structured-output endpoint.
//!
//! Every status comes back as a `BackendResponse`; only the absence of a
//! response is an error. The bearer credential travels on the request that
//! carries it and is never installed on the shared client.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpBackendConfig::new("http://localhost:8000/chat/structured_output")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let backend = HttpChatBackend::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::ports::{
    BackendError, BackendInfo, BackendResponse, ChatBackend, ChatRequest, ResponseHeaders,
    MESSAGE_INDEX_HEADER, SOURCES_HEADER,
};

/// Configuration for the HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Full URL of the chat endpoint.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpBackendConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// reqwest-backed `ChatBackend`.
pub struct HttpChatBackend {
    config: HttpBackendConfig,
    client: Client,
}

impl HttpChatBackend {
    /// Creates the backend and its HTTP client.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if the client cannot be built.
    pub fn new(config: HttpBackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn map_send_error(&self, error: reqwest::Error) -> BackendError {
        if error.is_timeout() {
            BackendError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if error.is_connect() {
            BackendError::network(format!("connection failed: {error}"))
        } else if error.is_builder() {
            BackendError::InvalidRequest(error.to_string())
        } else {
            BackendError::network(error.to_string())
        }
    }
}

/// Reads the citation headers; unreadable values count as absent.
fn read_headers(headers: &HeaderMap) -> ResponseHeaders {
    let text = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    ResponseHeaders {
        sources: text(SOURCES_HEADER),
        message_index: text(MESSAGE_INDEX_HEADER),
    }
}

/// Empty or non-JSON bodies decode to `None`.
fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(bytes).ok()
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn exchange(&self, request: ChatRequest) -> Result<BackendResponse, BackendError> {
        let mut builder = self.client.post(&self.config.endpoint).json(&request.body());
        if let Some(credential) = &request.credential {
            builder = builder.header(AUTHORIZATION, credential.authorization_value());
        }

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status().as_u16();
        let headers = read_headers(response.headers());
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::network(format!("failed to read body: {e}")))?;

        debug!(status, bytes = bytes.len(), "backend response received");
        Ok(BackendResponse::new(status, parse_body(&bytes)).with_headers(headers))
    }

    fn backend_info(&self) -> BackendInfo {
        BackendInfo::new("http", &self.config.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn config_builder_works() {
        let config = HttpBackendConfig::new("http://localhost:8000/chat/structured_output")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.endpoint, "http://localhost:8000/chat/structured_output");
    }

    #[test]
    fn backend_info_names_endpoint() {
        let backend = HttpChatBackend::new(HttpBackendConfig::new("http://example.test/chat")).unwrap();
        let info = backend.backend_info();
        assert_eq!(info.name, "http");
        assert_eq!(info.endpoint, "http://example.test/chat");
    }

    #[test]
    fn empty_and_non_json_bodies_are_absent() {
        assert_eq!(parse_body(b""), None);
        assert_eq!(parse_body(b"  \n"), None);
        assert_eq!(parse_body(b"<html>502</html>"), None);
        assert_eq!(parse_body(br#"{"error":"x"}"#), Some(serde_json::json!({ "error": "x" })));
    }

    #[test]
    fn citation_headers_are_read_when_present() {
        let mut headers = HeaderMap::new();
        headers.insert(SOURCES_HEADER, HeaderValue::from_static("W10="));
        headers.insert(MESSAGE_INDEX_HEADER, HeaderValue::from_static("3"));

        let read = read_headers(&headers);
        assert_eq!(read.sources.as_deref(), Some("W10="));
        assert_eq!(read.message_index.as_deref(), Some("3"));

        assert_eq!(read_headers(&HeaderMap::new()), ResponseHeaders::default());
    }
}
