//! Application layer - handlers coordinating domain and ports.

pub mod handlers;

pub use handlers::{
    ExchangeCoordinator, ExchangeError, ExchangeMode, ExchangeOutcome, ResponseShape,
    RevealSummary, StepReplayer,
};
