//! Application handlers.
//!
//! Orchestrate domain operations across ports.

pub mod exchange;

pub use exchange::{
    ExchangeCoordinator, ExchangeError, ExchangeMode, ExchangeOutcome, ResponseShape,
    RevealSummary, StepReplayer,
};
