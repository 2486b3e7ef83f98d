//! Transcript store errors.

use thiserror::Error;

use crate::domain::foundation::TurnId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    #[error("turn {next} cannot follow turn {previous}")]
    OutOfOrder { previous: TurnId, next: TurnId },

    #[error("turn id {0} was never issued by this transcript")]
    Unissued(TurnId),
}
