//! Pacer Port - suspends between revealed steps.

use async_trait::async_trait;
use std::time::Duration;

/// Yields control for a pacing delay.
///
/// Pacing exists for perceived realism only; implementations may shorten or
/// record the delay without affecting correctness.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}
