//! Pairing of tool-call and tool-result turns into step records.

use super::step::StepRecord;
use crate::domain::transcript::{Role, TurnDraft};

/// Returns true for turns that take part in step pairing.
fn is_step_turn(turn: &TurnDraft) -> bool {
    turn.requests_tools() || turn.role == Role::Tool
}

/// Pairs step turns two at a time, preserving order.
///
/// The filtered list is expected to alternate call, result, call, result.
/// Pairing is positional: the first of each pair supplies the action, the
/// second the observation. A trailing unpaired entry is dropped.
pub fn pair_steps(turns: &[TurnDraft]) -> Vec<StepRecord> {
    let filtered: Vec<&TurnDraft> = turns.iter().filter(|t| is_step_turn(t)).collect();
    filtered
        .chunks_exact(2)
        .map(|pair| StepRecord::new(pair[0].tool_calls.first().cloned(), pair[1].content.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transcript::ToolCall;
    use proptest::prelude::*;
    use serde_json::json;

    fn call(name: &str) -> TurnDraft {
        TurnDraft::assistant("").with_tool_calls(vec![
            ToolCall::new(name, json!({})),
            ToolCall::new("ignored_second_call", json!({})),
        ])
    }

    fn result(content: &str) -> TurnDraft {
        TurnDraft::tool(content, None)
    }

    fn step_turn_count(turns: &[TurnDraft]) -> usize {
        turns.iter().filter(|t| is_step_turn(t)).count()
    }

    #[test]
    fn pairs_alternating_calls_and_results() {
        let turns = vec![
            call("search"),
            result("found 2"),
            TurnDraft::assistant("thinking out loud"),
            call("book"),
            result("booked"),
            TurnDraft::assistant("All set."),
        ];

        let steps = pair_steps(&turns);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].action.as_ref().map(|a| a.name.as_str()), Some("search"));
        assert_eq!(steps[0].observation, "found 2");
        assert_eq!(steps[1].action.as_ref().map(|a| a.name.as_str()), Some("book"));
        assert_eq!(steps[1].observation, "booked");
    }

    // Known edge case: a trailing call with no result is silently dropped.
    #[test]
    fn trailing_unmatched_call_is_dropped() {
        let turns = vec![call("search"), result("found"), call("book")];
        let steps = pair_steps(&turns);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].observation, "found");
    }

    #[test]
    fn pairing_is_positional_when_order_is_broken() {
        let turns = vec![result("early result"), call("search")];
        let steps = pair_steps(&turns);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].action.is_none());
        assert_eq!(steps[0].observation, "");
    }

    #[test]
    fn no_step_turns_yields_nothing() {
        let turns = vec![TurnDraft::user("hi"), TurnDraft::assistant("hello")];
        assert!(pair_steps(&turns).is_empty());
        assert_eq!(step_turn_count(&turns), 0);
    }

    proptest! {
        #[test]
        fn step_count_is_half_the_step_turns(kinds in proptest::collection::vec(0u8..4, 0..40)) {
            let turns: Vec<TurnDraft> = kinds
                .iter()
                .map(|k| match k {
                    0 => call("c"),
                    1 => result("r"),
                    2 => TurnDraft::assistant("text"),
                    _ => TurnDraft::system("note"),
                })
                .collect();
            prop_assert_eq!(pair_steps(&turns).len(), step_turn_count(&turns) / 2);
        }
    }
}
