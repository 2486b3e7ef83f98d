//! Exchange handling: send, interpret, apply.

mod coordinator;
mod errors;
mod response;
mod step_replayer;

pub use coordinator::{ExchangeCoordinator, ExchangeMode, ExchangeOutcome};
pub use errors::{ExchangeError, UNKNOWN_ERROR};
pub use response::ResponseShape;
pub use step_replayer::{RevealSummary, StepReplayer};
