//! Step reveal pacing configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::replay::PacingPolicy;

const MAX_STEP_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayConfig {
    /// Minimum pause after each revealed step
    #[serde(default = "default_base_delay")]
    pub base_delay_ms: u64,

    /// Extra random pause, drawn uniformly up to this bound
    #[serde(default = "default_jitter")]
    pub jitter_ms: u64,
}

impl ReplayConfig {
    pub fn policy(&self) -> PacingPolicy {
        PacingPolicy::new(
            Duration::from_millis(self.base_delay_ms),
            Duration::from_millis(self.jitter_ms),
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_delay_ms.saturating_add(self.jitter_ms) > MAX_STEP_DELAY_MS {
            return Err(ValidationError::PacingTooSlow);
        }
        Ok(())
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: default_base_delay(),
            jitter_ms: default_jitter(),
        }
    }
}

fn default_base_delay() -> u64 {
    1000
}

fn default_jitter() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy_default() {
        assert_eq!(ReplayConfig::default().policy(), PacingPolicy::default());
    }

    #[test]
    fn test_rejects_excessive_pacing() {
        let config = ReplayConfig {
            base_delay_ms: 50_000,
            jitter_ms: 20_000,
        };
        assert_eq!(config.validate(), Err(ValidationError::PacingTooSlow));
    }
}
