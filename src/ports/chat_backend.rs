//! Chat Backend Port - Interface to the remote language-model service.
//!
//! The backend is an opaque request/response service: one call per
//! exchange, carrying the whole transcript. This port only moves bytes and
//! status codes; deciding what a response *means* belongs to the exchange
//! coordinator.
//!
//! # Wire format
//!
//! Request body: `{ "messages": [...], "show_intermediate_steps": true }`
//! (the flag is omitted in plain mode).
//!
//! Response: any status, an optional JSON body, and two optional headers
//! (`x-sources`, `x-message-index`) carrying out-of-band citations.
//!
//! # Example
//!
//! ```ignore
//! let request = ChatRequest::new(messages)
//!     .with_intermediate_steps(true)
//!     .with_credential(credential);
//! let response = backend.exchange(request).await?;
//! if response.is_success() { /* ... */ }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::credential_provider::Credential;
use crate::domain::transcript::{Role, ToolCall, Turn, TurnDraft};

/// Header carrying base64-encoded JSON citations.
pub const SOURCES_HEADER: &str = "x-sources";

/// Header naming the position the citations belong to.
pub const MESSAGE_INDEX_HEADER: &str = "x-message-index";

/// Port for chat backend interactions.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one request and returns whatever came back.
    ///
    /// Non-2xx statuses are *not* errors here: they come back as a
    /// `BackendResponse` so the caller always inspects the status.
    ///
    /// # Errors
    ///
    /// Only when no response was obtained at all (connection refused,
    /// timeout, unreadable body).
    async fn exchange(&self, request: ChatRequest) -> Result<BackendResponse, BackendError>;

    /// Describes the backend for logging.
    fn backend_info(&self) -> BackendInfo;
}

/// A turn as it travels to and from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTurn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl WireTurn {
    /// Converts into a draft ready for the transcript. Backend ids are
    /// dropped; the store numbers turns itself.
    pub fn into_draft(self) -> TurnDraft {
        TurnDraft {
            role: self.role,
            content: self.content,
            tool_calls: self.tool_calls,
            tool_call_id: self.tool_call_id,
        }
    }
}

impl From<&Turn> for WireTurn {
    fn from(turn: &Turn) -> Self {
        Self {
            id: Some(turn.id().to_string()),
            role: turn.role(),
            content: turn.content().to_string(),
            tool_calls: turn.tool_calls().to_vec(),
            tool_call_id: turn.tool_call_id().map(str::to_string),
        }
    }
}

/// Request for one exchange.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Whole transcript including the new user turn.
    pub messages: Vec<WireTurn>,
    /// Ask the backend to return intermediate tool turns.
    pub show_intermediate_steps: bool,
    /// Credential attached to this request only.
    pub credential: Option<Credential>,
}

impl ChatRequest {
    pub fn new(messages: Vec<WireTurn>) -> Self {
        Self {
            messages,
            show_intermediate_steps: false,
            credential: None,
        }
    }

    pub fn with_intermediate_steps(mut self, show: bool) -> Self {
        self.show_intermediate_steps = show;
        self
    }

    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    /// Returns the JSON body to send.
    pub fn body(&self) -> ChatRequestBody<'_> {
        ChatRequestBody {
            messages: &self.messages,
            show_intermediate_steps: self.show_intermediate_steps.then_some(true),
        }
    }
}

/// Serialized request body.
#[derive(Debug, Serialize)]
pub struct ChatRequestBody<'a> {
    pub messages: &'a [WireTurn],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_intermediate_steps: Option<bool>,
}

/// Out-of-band response headers the client cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    pub sources: Option<String>,
    pub message_index: Option<String>,
}

/// Whatever the backend returned.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub status: u16,
    /// Decoded JSON body; `None` when the body was empty or not JSON.
    pub body: Option<Value>,
    pub headers: ResponseHeaders,
}

impl BackendResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self {
            status,
            body,
            headers: ResponseHeaders::default(),
        }
    }

    pub fn with_headers(mut self, headers: ResponseHeaders) -> Self {
        self.headers = headers;
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Top-level field of the JSON body, if any.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.as_ref().and_then(|body| body.get(name))
    }

    /// The `error` string of a failure body.
    pub fn error_message(&self) -> Option<&str> {
        self.field("error").and_then(Value::as_str)
    }
}

/// Backend description for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendInfo {
    pub name: String,
    pub endpoint: String,
}

impl BackendInfo {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// Transport failures: no response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Connection or protocol error.
    #[error("network error: {0}")]
    Network(String),

    /// No response within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        timeout_secs: u64,
    },

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl BackendError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}
