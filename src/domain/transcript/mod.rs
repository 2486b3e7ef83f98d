//! TranscriptStore - ordered log of user, assistant, tool and system turns.

mod errors;
mod store;
mod turn;

pub use errors::TranscriptError;
pub use store::{TranscriptEntry, TranscriptStore};
pub use turn::{Role, ToolCall, Turn, TurnDraft};
