//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! exchange core and the outside world. Adapters implement these ports.
//!
//! - `ChatBackend` - the remote language-model service
//! - `CredentialProvider` - per-request authorization
//! - `FailureReporter` - user-visible failure surfacing
//! - `Pacer` - suspension between revealed steps
//! - `TranscriptRenderer` - read-only display of the transcript

mod chat_backend;
mod credential_provider;
mod failure_reporter;
mod pacer;
mod transcript_renderer;

pub use chat_backend::{
    BackendError, BackendInfo, BackendResponse, ChatBackend, ChatRequest, ChatRequestBody,
    ResponseHeaders, WireTurn, MESSAGE_INDEX_HEADER, SOURCES_HEADER,
};
pub use credential_provider::{Credential, CredentialError, CredentialProvider};
pub use failure_reporter::{FailureReport, FailureReporter, FAILURE_TITLE};
pub use pacer::Pacer;
pub use transcript_renderer::{TranscriptRenderer, TranscriptView};
