//! Scheduled reveal queue for step records.
//!
//! Each paired step becomes one task carrying its own pacing delay, so a
//! reveal is a plain queue walk instead of nested timers.

use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

use super::step::StepRecord;

/// Pause after each revealed step: `base` plus up to `jitter`, uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    pub base: Duration,
    pub jitter: Duration,
}

impl PacingPolicy {
    pub fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    /// No pause at all.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Draws one delay from `[base, base + jitter]`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        self.base + Duration::from_millis(rng.gen_range(0..=jitter_ms))
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(1000))
    }
}

/// One pending reveal.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledStep {
    pub record: StepRecord,
    /// Pause taken after this step is shown.
    pub delay: Duration,
}

/// Ordered queue of pending reveals.
#[derive(Debug, Clone, Default)]
pub struct StepSchedule {
    tasks: VecDeque<ScheduledStep>,
}

impl StepSchedule {
    /// Plans one task per record, sampling each delay up front.
    pub fn plan<R: Rng>(
        records: Vec<StepRecord>,
        policy: &PacingPolicy,
        rng: &mut R,
    ) -> Self {
        let tasks = records
            .into_iter()
            .map(|record| ScheduledStep {
                record,
                delay: policy.sample(rng),
            })
            .collect();
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

impl Iterator for StepSchedule {
    type Item = ScheduledStep;

    fn next(&mut self) -> Option<Self::Item> {
        self.tasks.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_within_bounds() {
        let policy = PacingPolicy::new(Duration::from_millis(1000), Duration::from_millis(1000));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let delay = policy.sample(&mut rng);
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(2000));
        }
    }

    #[test]
    fn immediate_policy_never_pauses() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(PacingPolicy::immediate().sample(&mut rng), Duration::ZERO);
    }

    #[test]
    fn plan_preserves_order() {
        let records = vec![StepRecord::new(None, "first"), StepRecord::new(None, "second")];
        let mut rng = StdRng::seed_from_u64(3);
        let schedule = StepSchedule::plan(records, &PacingPolicy::default(), &mut rng);

        assert_eq!(schedule.len(), 2);
        let observations: Vec<String> = schedule.map(|s| s.record.observation).collect();
        assert_eq!(observations, vec!["first", "second"]);
    }
}
