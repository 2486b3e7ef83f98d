//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Endpoint must be an http(s) URL: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Configure either a static token or a password login, not both")]
    ConflictingAuth,

    #[error("Step pacing exceeds maximum allowed (60s per step)")]
    PacingTooSlow,
}
