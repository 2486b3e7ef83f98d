//! StepRecord - one revealed tool call and its observed result.

use serde::{Deserialize, Serialize};

use crate::domain::transcript::{Role, ToolCall, Turn};

/// A tool call paired with the result it produced.
///
/// Only lives inside a step-revealing exchange; it reaches the transcript
/// as the JSON content of a synthetic system turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// First tool call of the requesting turn; `None` when the pair did not
    /// start with an assistant tool request.
    pub action: Option<ToolCall>,
    pub observation: String,
}

impl StepRecord {
    pub fn new(action: Option<ToolCall>, observation: impl Into<String>) -> Self {
        Self {
            action,
            observation: observation.into(),
        }
    }

    /// Encodes the record as system-turn content.
    pub fn to_turn_content(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Reads a record back from a system turn, if it holds one.
    pub fn from_turn(turn: &Turn) -> Option<Self> {
        if turn.role() != Role::System {
            return None;
        }
        serde_json::from_str(turn.content()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transcript::{TranscriptStore, TurnDraft};
    use serde_json::json;

    #[test]
    fn content_has_action_and_observation_keys() {
        let record = StepRecord::new(
            Some(ToolCall::new("venue_lookup", json!({ "city": "Austin" }))),
            "3 venues",
        );
        let value: serde_json::Value =
            serde_json::from_str(&record.to_turn_content().unwrap()).unwrap();
        assert_eq!(value["action"]["name"], "venue_lookup");
        assert_eq!(value["observation"], "3 venues");
    }

    #[test]
    fn missing_action_serializes_as_null() {
        let record = StepRecord::new(None, "orphan");
        let value: serde_json::Value =
            serde_json::from_str(&record.to_turn_content().unwrap()).unwrap();
        assert!(value.get("action").is_some_and(|a| a.is_null()));
    }

    #[test]
    fn reads_back_from_system_turn_only() {
        let record = StepRecord::new(Some(ToolCall::new("t", json!({}))), "ok");
        let content = record.to_turn_content().unwrap();
        let store = TranscriptStore::new();
        store.append(TurnDraft::system(content.clone()));
        store.append(TurnDraft::assistant(content));
        let turns = store.snapshot();

        assert_eq!(StepRecord::from_turn(&turns[0]), Some(record));
        assert_eq!(StepRecord::from_turn(&turns[1]), None);
    }
}
