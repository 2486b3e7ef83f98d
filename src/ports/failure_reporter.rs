//! Failure Reporter Port - surfaces failed exchanges to the user.
//!
//! The UI decides how a report looks (toast, banner, stderr line). Reports
//! are never fatal: the client stays usable after every one.

/// Title used for every failed exchange.
pub const FAILURE_TITLE: &str = "Error while processing your request";

/// A user-visible failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub title: String,
    pub description: String,
}

impl FailureReport {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            title: FAILURE_TITLE.to_string(),
            description: description.into(),
        }
    }
}

pub trait FailureReporter: Send + Sync {
    fn report(&self, report: &FailureReport);
}
