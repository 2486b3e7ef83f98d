//! Foundation module - Shared domain primitives.
//!
//! Identifiers and time values used across the transcript and constraint
//! vocabularies.

mod ids;
mod timestamp;

pub use ids::{ConstraintId, TurnId};
pub use timestamp::Timestamp;
