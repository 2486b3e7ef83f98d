//! Turn entity for transcripts.
//!
//! Turns are immutable records of one conversation entry. Ids are assigned
//! by the [`TranscriptStore`](super::TranscriptStore); everything else is
//! supplied up front as a [`TurnDraft`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{Timestamp, TurnId};

/// Role of a turn's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Human input.
    User,
    /// Model output, possibly requesting tools.
    Assistant,
    /// Result of a tool invocation.
    Tool,
    /// Synthetic display entries such as revealed steps.
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
            Role::System => "system",
        }
    }
}

/// A tool invocation requested by an assistant turn.
///
/// Both the flat `{name, arguments}` form and the nested
/// `{type, function: {name, arguments}}` form are accepted. Keys beyond
/// `id`, `name` and `arguments` are kept in `extra` and sent back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, alias = "args", skip_serializing_if = "Value::is_null")]
    pub arguments: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: None,
            name: name.into(),
            arguments,
            extra: Map::new(),
        }
    }

    /// Tool name, looking inside a nested `function` object when the flat one is absent.
    pub fn function_name(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        self.nested("name").and_then(Value::as_str).unwrap_or_default()
    }

    /// Tool arguments, looking inside a nested `function` object when the flat ones are absent.
    pub fn function_arguments(&self) -> &Value {
        if !self.arguments.is_null() {
            return &self.arguments;
        }
        self.nested("arguments").unwrap_or(&Value::Null)
    }

    fn nested(&self, key: &str) -> Option<&Value> {
        self.extra.get("function").and_then(|function| function.get(key))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A turn that has not been admitted to a transcript yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnDraft {
    pub role: Role,
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub tool_call_id: Option<String>,
}

impl TurnDraft {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a tool-result turn answering `call_id`.
    pub fn tool(content: impl Into<String>, call_id: Option<String>) -> Self {
        Self {
            tool_call_id: call_id,
            ..Self::new(Role::Tool, content)
        }
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    /// Returns true for assistant drafts that request at least one tool.
    pub fn requests_tools(&self) -> bool {
        self.role == Role::Assistant && !self.tool_calls.is_empty()
    }
}

/// An admitted, immutable conversation entry.
///
/// # Invariants
///
/// - `id` is unique within its transcript and never reused
/// - fields never change after admission
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    id: TurnId,
    role: Role,
    content: String,
    tool_calls: Vec<ToolCall>,
    tool_call_id: Option<String>,
    created_at: Timestamp,
}

impl Turn {
    pub(super) fn admit(id: TurnId, draft: TurnDraft) -> Self {
        Self {
            id,
            role: draft.role,
            content: draft.content,
            tool_calls: draft.tool_calls,
            tool_call_id: draft.tool_call_id,
            created_at: Timestamp::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> TurnId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tool_calls(&self) -> &[ToolCall] {
        &self.tool_calls
    }

    /// Call id a tool-result turn answers, if the backend sent one.
    pub fn tool_call_id(&self) -> Option<&str> {
        self.tool_call_id.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns true for assistant turns that requested at least one tool.
    pub fn requests_tools(&self) -> bool {
        self.role == Role::Assistant && !self.tool_calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Tool).unwrap(), "\"tool\"");
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }

    #[test]
    fn tool_call_accepts_args_alias() {
        let call: ToolCall = serde_json::from_value(json!({
            "name": "lookup_venue",
            "args": { "city": "Austin" },
            "id": "call_1",
            "type": "tool_call"
        }))
        .unwrap();
        assert_eq!(call.name, "lookup_venue");
        assert_eq!(call.arguments, json!({ "city": "Austin" }));
        assert_eq!(call.id.as_deref(), Some("call_1"));
    }

    #[test]
    fn nested_function_call_passes_through() {
        let raw = json!({
            "id": "call_9",
            "type": "function",
            "function": { "name": "find_venues", "arguments": "{\"city\":\"Austin\"}" }
        });
        let call: ToolCall = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(call.function_name(), "find_venues");
        assert_eq!(call.function_arguments(), &json!("{\"city\":\"Austin\"}"));
        assert_eq!(serde_json::to_value(&call).unwrap(), raw);
    }

    #[test]
    fn tool_draft_carries_call_id() {
        let draft = TurnDraft::tool("72F and sunny", Some("call_1".to_string()));
        assert_eq!(draft.role, Role::Tool);
        assert_eq!(draft.tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn requests_tools_only_for_assistant_with_calls() {
        let call = ToolCall::new("search", json!({}));
        let asking = Turn::admit(
            TurnId::from_sequence(0),
            TurnDraft::assistant("").with_tool_calls(vec![call.clone()]),
        );
        let plain = Turn::admit(TurnId::from_sequence(1), TurnDraft::assistant("done"));
        let user = Turn::admit(
            TurnId::from_sequence(2),
            TurnDraft::user("hi").with_tool_calls(vec![call]),
        );

        assert!(asking.requests_tools());
        assert!(!plain.requests_tools());
        assert!(!user.requests_tools());
    }
}
