//! Step replay vocabulary: step records, pairing, and the reveal schedule.

mod pairing;
mod schedule;
mod step;

pub use pairing::pair_steps;
pub use schedule::{PacingPolicy, ScheduledStep, StepSchedule};
pub use step::StepRecord;
