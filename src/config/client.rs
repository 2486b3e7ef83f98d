//! Chat client configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::ExchangeMode;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Backend endpoint, exchange mode and logging
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Structured-output chat endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// `plain` or `steps`
    #[serde(default)]
    pub exchange_mode: ExchangeMode,

    /// Fallback filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub log_json: bool,

    /// Prefix rendered turns with their UTC time
    #[serde(default)]
    pub show_timestamps: bool,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.endpoint) {
            return Err(ValidationError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ValidationError::InvalidLogLevel(self.log_level.clone()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
            exchange_mode: ExchangeMode::default(),
            log_level: default_log_level(),
            log_json: false,
            show_timestamps: false,
        }
    }
}

pub(super) fn is_http_url(raw: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| raw.len() > scheme.len() && raw.starts_with(scheme))
}

fn default_endpoint() -> String {
    "http://localhost:8000/chat/structured_output".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}
