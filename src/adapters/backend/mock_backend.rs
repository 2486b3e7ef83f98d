//! Mock Chat Backend for testing.
//!
//! Returns queued responses in order, optionally after a delay, and records
//! every request it receives.
//!
//! ```ignore
//! let backend = MockChatBackend::new()
//!     .with_response(BackendResponse::new(200, Some(json!({ "messages": [] }))))
//!     .with_error(BackendError::network("down"));
//! ```

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{BackendError, BackendInfo, BackendResponse, ChatBackend, ChatRequest};

/// A queued outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    Response(BackendResponse),
    Error(BackendError),
}

/// Configurable in-memory backend.
#[derive(Debug, Clone)]
pub struct MockChatBackend {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<ChatRequest>>>,
    delay: Duration,
    info: BackendInfo,
}

impl Default for MockChatBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChatBackend {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
            info: BackendInfo::new("mock", "memory"),
        }
    }

    /// Queues a response.
    pub fn with_response(self, response: BackendResponse) -> Self {
        self.push(MockReply::Response(response));
        self
    }

    /// Queues a transport error.
    pub fn with_error(self, error: BackendError) -> Self {
        self.push(MockReply::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a reply on a shared mock after construction.
    pub fn push(&self, reply: MockReply) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns all recorded requests.
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                MockReply::Response(BackendResponse::new(
                    200,
                    Some(json!({ "messages": [{ "role": "assistant", "content": "Mock response" }] })),
                ))
            })
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn exchange(&self, request: ChatRequest) -> Result<BackendResponse, BackendError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Response(response) => Ok(response),
            MockReply::Error(error) => Err(error),
        }
    }

    fn backend_info(&self) -> BackendInfo {
        self.info.clone()
    }
}
