//! Adapters - Implementations of port interfaces.
//!
//! - `backend` - HTTP and mock chat backends
//! - `auth` - credential providers
//! - `pacing` - step reveal pacers
//! - `reporting` - failure reporters
//! - `console` - terminal renderer

pub mod auth;
pub mod backend;
pub mod console;
pub mod pacing;
pub mod reporting;

pub use auth::{NoCredentials, PasswordGrantConfig, PasswordGrantProvider, StaticTokenProvider};
pub use backend::{HttpBackendConfig, HttpChatBackend, MockChatBackend, MockReply};
pub use console::ConsoleRenderer;
pub use pacing::{RecordingPacer, TokioPacer};
pub use reporting::{CollectingFailureReporter, ConsoleFailureReporter};
