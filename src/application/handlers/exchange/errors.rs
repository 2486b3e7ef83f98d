//! Exchange error taxonomy.
//!
//! Every variant is user-visible and maps onto one `FailureReport`.
//! Citation decode failures are not here: they never leave the coordinator.

use thiserror::Error;

use crate::domain::constraint::SchemaError;
use crate::domain::transcript::TranscriptError;
use crate::ports::{BackendError, CredentialError, FailureReport};

/// Description used when a failing backend gives no message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Why an exchange produced no reply.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExchangeError {
    /// The body matched none of the known response shapes.
    #[error("unrecognized response: {0}")]
    UnrecognizedResponse(String),

    /// Non-2xx status, message surfaced verbatim.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// No response was obtained.
    #[error(transparent)]
    Transport(#[from] BackendError),

    /// A constraint record failed schema validation.
    #[error("constraint {index} is malformed: {source}")]
    MalformedConstraint { index: usize, source: SchemaError },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}

impl ExchangeError {
    pub fn unrecognized(reason: impl Into<String>) -> Self {
        Self::UnrecognizedResponse(reason.into())
    }

    /// Builds a backend failure, defaulting the message when absent or blank.
    pub fn backend(status: u16, message: Option<&str>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(UNKNOWN_ERROR)
            .to_string();
        Self::Backend { status, message }
    }

    /// Short machine-readable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnrecognizedResponse(_) => "unrecognized_response",
            Self::Backend { .. } => "backend",
            Self::Transport(_) => "transport",
            Self::MalformedConstraint { .. } => "malformed_constraint",
            Self::Credential(_) => "credential",
            Self::Transcript(_) => "transcript",
        }
    }

    /// The notification shown to the user.
    pub fn to_report(&self) -> FailureReport {
        FailureReport::new(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FAILURE_TITLE;

    #[test]
    fn backend_message_is_reported_verbatim() {
        let report = ExchangeError::backend(500, Some("model unavailable")).to_report();
        assert_eq!(report.title, FAILURE_TITLE);
        assert_eq!(report.description, "model unavailable");
    }

    #[test]
    fn missing_backend_message_becomes_unknown_error() {
        let err = ExchangeError::backend(502, None);
        assert_eq!(err.to_report().description, UNKNOWN_ERROR);

        let blank = ExchangeError::backend(502, Some("  "));
        assert_eq!(blank.to_string(), UNKNOWN_ERROR);
    }

    #[test]
    fn transport_failure_uses_underlying_description() {
        let err = ExchangeError::from(BackendError::network("connection refused"));
        assert_eq!(err.to_report().description, "network error: connection refused");
        assert_eq!(err.kind(), "transport");
    }

    #[test]
    fn malformed_constraint_names_the_record() {
        let err = ExchangeError::MalformedConstraint {
            index: 2,
            source: SchemaError::MissingType,
        };
        assert_eq!(err.to_string(), "constraint 2 is malformed: constraint has no type");
    }
}
