//! Response shape interpretation.
//!
//! Precedence: a `constraints` field wins over everything, including a
//! failing status. Only then is the status inspected, and only a successful
//! response is read for `messages`.

use serde::Deserialize;
use serde_json::Value;

use super::errors::ExchangeError;
use crate::ports::{BackendResponse, WireTurn};

/// What a backend response turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// Raw constraint records plus pass-through metadata.
    Structured {
        constraints: Vec<Value>,
        metadata: Option<Value>,
    },
    /// Non-2xx status.
    Failure { status: u16, message: Option<String> },
    /// Ordered turns from the assistant's side of the exchange.
    Messages(Vec<WireTurn>),
}

impl ResponseShape {
    /// Classifies a response.
    ///
    /// # Errors
    ///
    /// `UnrecognizedResponse` when a successful body carries neither
    /// `constraints` nor a readable `messages` list.
    pub fn interpret(response: &BackendResponse) -> Result<Self, ExchangeError> {
        match response.field("constraints") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                return Ok(Self::Structured {
                    constraints: items.clone(),
                    metadata: response.field("metadata").cloned(),
                })
            }
            Some(_) => {
                return Err(ExchangeError::unrecognized(
                    "`constraints` must be a list",
                ))
            }
        }

        if !response.is_success() {
            return Ok(Self::Failure {
                status: response.status,
                message: response.error_message().map(str::to_string),
            });
        }

        let messages = response
            .field("messages")
            .ok_or_else(|| ExchangeError::unrecognized("body carries neither constraints nor messages"))?;
        let turns = Vec::<WireTurn>::deserialize(messages)
            .map_err(|e| ExchangeError::unrecognized(format!("unreadable messages: {e}")))?;
        Ok(Self::Messages(turns))
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Structured { .. } => "structured",
            Self::Failure { .. } => "failure",
            Self::Messages(_) => "messages",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transcript::Role;
    use serde_json::json;

    fn response(status: u16, body: Value) -> BackendResponse {
        BackendResponse::new(status, Some(body))
    }

    #[test]
    fn constraints_take_precedence_over_failing_status() {
        let shape = ResponseShape::interpret(&response(
            500,
            json!({ "constraints": [], "error": "ignored" }),
        ))
        .unwrap();
        assert!(matches!(shape, ResponseShape::Structured { ref constraints, .. } if constraints.is_empty()));
    }

    #[test]
    fn metadata_is_carried_with_constraints() {
        let shape = ResponseShape::interpret(&response(
            200,
            json!({ "constraints": [{ "type": "Default" }], "metadata": { "model": "x" } }),
        ))
        .unwrap();
        match shape {
            ResponseShape::Structured { constraints, metadata } => {
                assert_eq!(constraints.len(), 1);
                assert_eq!(metadata, Some(json!({ "model": "x" })));
            }
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn null_constraints_fall_through_to_messages() {
        let shape = ResponseShape::interpret(&response(
            200,
            json!({ "constraints": null, "messages": [] }),
        ))
        .unwrap();
        assert_eq!(shape, ResponseShape::Messages(vec![]));
    }

    #[test]
    fn failing_status_is_a_failure_with_optional_message() {
        let shape =
            ResponseShape::interpret(&response(500, json!({ "error": "model unavailable" })))
                .unwrap();
        assert_eq!(
            shape,
            ResponseShape::Failure {
                status: 500,
                message: Some("model unavailable".to_string())
            }
        );

        let bare = ResponseShape::interpret(&BackendResponse::new(503, None)).unwrap();
        assert_eq!(bare, ResponseShape::Failure { status: 503, message: None });
    }

    #[test]
    fn messages_are_decoded_in_order() {
        let shape = ResponseShape::interpret(&response(
            200,
            json!({ "messages": [
                { "role": "assistant", "content": null, "tool_calls": [{ "name": "search", "args": {} }] },
                { "role": "tool", "content": "result", "tool_call_id": "c1" },
                { "role": "assistant", "content": "done" }
            ]}),
        ))
        .unwrap();
        let ResponseShape::Messages(turns) = shape else {
            panic!("expected messages");
        };
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].content, "");
        assert_eq!(turns[1].role, Role::Tool);
        assert_eq!(turns[2].content, "done");
    }

    #[test]
    fn success_without_known_fields_is_unrecognized() {
        let err = ResponseShape::interpret(&response(200, json!({ "answer": 42 }))).unwrap_err();
        assert!(matches!(err, ExchangeError::UnrecognizedResponse(_)));

        let empty = ResponseShape::interpret(&BackendResponse::new(200, None)).unwrap_err();
        assert!(matches!(empty, ExchangeError::UnrecognizedResponse(_)));
    }

    #[test]
    fn non_list_constraints_are_unrecognized() {
        let err =
            ResponseShape::interpret(&response(200, json!({ "constraints": "nope" }))).unwrap_err();
        assert!(matches!(err, ExchangeError::UnrecognizedResponse(_)));
    }

    #[test]
    fn unreadable_messages_are_unrecognized() {
        let err = ResponseShape::interpret(&response(200, json!({ "messages": [{ "role": "wizard" }] })))
            .unwrap_err();
        assert!(matches!(err, ExchangeError::UnrecognizedResponse(_)));
    }
}
