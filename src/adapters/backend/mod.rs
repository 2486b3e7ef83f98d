//! Chat backend adapters.
//!
//! - `HttpChatBackend` - reqwest client for the structured-output endpoint
//! - `MockChatBackend` - queued replies for tests

mod http_backend;
mod mock_backend;

pub use http_backend::{HttpBackendConfig, HttpChatBackend};
pub use mock_backend::{MockChatBackend, MockReply};
