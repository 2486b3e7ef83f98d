//! StepReplayer - reveals tool activity one step at a time.

use std::sync::Arc;

use tracing::debug;

use super::errors::ExchangeError;
use crate::domain::foundation::TurnId;
use crate::domain::replay::{pair_steps, PacingPolicy, StepSchedule};
use crate::domain::transcript::{TranscriptStore, TurnDraft};
use crate::ports::Pacer;

/// Result of a completed reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSummary {
    /// Ids of the synthetic system turns, in reveal order.
    pub step_turns: Vec<TurnId>,
    /// Id of the closing assistant turn.
    pub final_turn: TurnId,
}

/// Turns a step-mode response into paced system turns plus a final answer.
pub struct StepReplayer {
    store: Arc<TranscriptStore>,
    pacer: Arc<dyn Pacer>,
    policy: PacingPolicy,
}

impl StepReplayer {
    pub fn new(store: Arc<TranscriptStore>, pacer: Arc<dyn Pacer>, policy: PacingPolicy) -> Self {
        Self {
            store,
            pacer,
            policy,
        }
    }

    /// Reveals the paired steps of `messages`, then the final answer.
    ///
    /// Steps are appended strictly in pairing order with a pause after each.
    /// The final assistant turn carries the content of the last message in
    /// the unfiltered list and is always appended last.
    ///
    /// # Errors
    ///
    /// `UnrecognizedResponse` when `messages` is empty; nothing is appended.
    pub async fn replay(&self, messages: Vec<TurnDraft>) -> Result<RevealSummary, ExchangeError> {
        let final_content = messages
            .last()
            .map(|turn| turn.content.clone())
            .ok_or_else(|| ExchangeError::unrecognized("step response carried no messages"))?;

        let schedule = {
            let mut rng = rand::thread_rng();
            StepSchedule::plan(pair_steps(&messages), &self.policy, &mut rng)
        };
        debug!(steps = schedule.len(), "revealing intermediate steps");

        let mut step_turns = Vec::with_capacity(schedule.len());
        for step in schedule {
            let content = step
                .record
                .to_turn_content()
                .map_err(|e| ExchangeError::unrecognized(format!("step not displayable: {e}")))?;
            let id = self.store.append(TurnDraft::system(content));
            debug!(turn = %id, delay = ?step.delay, "step revealed");
            step_turns.push(id);
            self.pacer.pause(step.delay).await;
        }

        let final_turn = self.store.append(TurnDraft::assistant(final_content));
        Ok(RevealSummary {
            step_turns,
            final_turn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::pacing::RecordingPacer;
    use crate::domain::replay::StepRecord;
    use crate::domain::transcript::{Role, ToolCall};
    use serde_json::json;
    use std::time::Duration;

    fn call(name: &str) -> TurnDraft {
        TurnDraft::assistant("").with_tool_calls(vec![ToolCall::new(name, json!({ "q": name }))])
    }

    fn replayer(pacer: Arc<RecordingPacer>, policy: PacingPolicy) -> (StepReplayer, Arc<TranscriptStore>) {
        let store = Arc::new(TranscriptStore::new());
        (StepReplayer::new(store.clone(), pacer, policy), store)
    }

    #[tokio::test]
    async fn reveals_pairs_in_order_then_final_answer() {
        let pacer = Arc::new(RecordingPacer::new());
        let policy = PacingPolicy::new(Duration::from_millis(1000), Duration::from_millis(1000));
        let (replayer, store) = replayer(pacer.clone(), policy);

        let summary = replayer
            .replay(vec![
                call("weather"),
                TurnDraft::tool("sunny", Some("c1".into())),
                call("courts"),
                TurnDraft::tool("two open", Some("c2".into())),
                TurnDraft::assistant("Saturday works"),
            ])
            .await
            .unwrap();

        assert_eq!(summary.step_turns.len(), 2);
        let turns = store.snapshot();
        assert_eq!(turns.len(), 3);
        assert!(turns[..2].iter().all(|t| t.role() == Role::System));

        let first = StepRecord::from_turn(&turns[0]).unwrap();
        assert_eq!(first.action.unwrap().name, "weather");
        assert_eq!(first.observation, "sunny");
        let second = StepRecord::from_turn(&turns[1]).unwrap();
        assert_eq!(second.observation, "two open");

        assert_eq!(turns[2].role(), Role::Assistant);
        assert_eq!(turns[2].content(), "Saturday works");
        assert_eq!(turns[2].id(), summary.final_turn);

        let pauses = pacer.pauses();
        assert_eq!(pauses.len(), 2);
        assert!(pauses
            .iter()
            .all(|d| *d >= Duration::from_millis(1000) && *d <= Duration::from_millis(2000)));
    }

    #[tokio::test]
    async fn unmatched_trailing_call_is_dropped() {
        let pacer = Arc::new(RecordingPacer::new());
        let (replayer, store) = replayer(pacer.clone(), PacingPolicy::immediate());

        let summary = replayer
            .replay(vec![
                call("weather"),
                TurnDraft::tool("sunny", None),
                call("courts"),
                TurnDraft::assistant("partial"),
            ])
            .await
            .unwrap();

        assert_eq!(summary.step_turns.len(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(pacer.pauses().len(), 1);
    }

    #[tokio::test]
    async fn no_tool_activity_appends_only_the_answer() {
        let pacer = Arc::new(RecordingPacer::new());
        let (replayer, store) = replayer(pacer.clone(), PacingPolicy::immediate());

        replayer
            .replay(vec![TurnDraft::assistant("hello")])
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert!(pacer.pauses().is_empty());
    }

    #[tokio::test]
    async fn empty_response_is_rejected_without_writes() {
        let pacer = Arc::new(RecordingPacer::new());
        let (replayer, store) = replayer(pacer, PacingPolicy::immediate());

        let err = replayer.replay(vec![]).await.unwrap_err();
        assert!(matches!(err, ExchangeError::UnrecognizedResponse(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delays_beyond_u64_millis_reach_the_pacer_intact() {
        let pacer = Arc::new(RecordingPacer::new());
        let huge = Duration::from_secs(u64::MAX / 100);
        let (replayer, _store) = replayer(pacer.clone(), PacingPolicy::new(huge, Duration::ZERO));

        replayer
            .replay(vec![
                call("weather"),
                TurnDraft::tool("sunny", None),
                TurnDraft::assistant("done"),
            ])
            .await
            .unwrap();

        assert!(huge.as_millis() > u128::from(u64::MAX));
        assert_eq!(pacer.pauses(), vec![huge]);
    }
}
