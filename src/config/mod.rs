//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `CONSTRAINT_CHAT` prefix
//! and `__` between nested keys. Every section has defaults, so an empty
//! environment yields a working local setup.
//!
//! # Example
//!
//! ```no_run
//! use constraint_chat::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Talking to {}", config.client.endpoint);
//! ```

mod auth;
mod client;
mod error;
mod replay;

pub use auth::{AuthConfig, CredentialSource};
pub use client::ClientConfig;
pub use error::{ConfigError, ValidationError};
pub use replay::ReplayConfig;

use serde::Deserialize;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CONSTRAINT_CHAT";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Backend endpoint, exchange mode, logging
    #[serde(default)]
    pub client: ClientConfig,

    /// Credentials attached to each request
    #[serde(default)]
    pub auth: AuthConfig,

    /// Step reveal pacing
    #[serde(default)]
    pub replay: ReplayConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `CONSTRAINT_CHAT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CONSTRAINT_CHAT__CLIENT__ENDPOINT=...` -> `client.endpoint = ...`
    /// - `CONSTRAINT_CHAT__REPLAY__JITTER_MS=500` -> `replay.jitter_ms = 500`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.client.validate()?;
        self.auth.validate()?;
        self.replay.validate()?;
        Ok(())
    }
}
