//! ConstraintSchema - classifies raw JSON into typed constraint records.
//!
//! Only shape and type are checked. Parameter values are not judged beyond
//! what their Rust types demand (non-negative counts, strings, booleans).
//! A record that fails is reported, never coerced.

use serde::Deserialize;
use serde_json::Value;

use super::category::{ConstraintCategory, ConstraintType};
use super::errors::SchemaError;
use super::parameters::{null_as_default, owned_fields, ConstraintParameters, OpaqueMap};
use super::record::{ConstraintRecord, Priority, StructuredOutput, UNSET_CONFIDENCE};
use crate::domain::foundation::ConstraintId;

/// A structured output that failed validation at a specific record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRejection {
    pub index: usize,
    pub error: SchemaError,
}

#[derive(Deserialize)]
struct RawConstraint {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default)]
    constraint_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    scope: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    priority: Priority,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    parameters: Option<Value>,
}

/// Validates constraint records against the category vocabulary.
pub struct ConstraintSchema;

impl ConstraintSchema {
    /// Interprets one raw value as a constraint record.
    ///
    /// # Errors
    ///
    /// - `NotAnObject` / `InvalidRecord` if the envelope fields have the wrong types
    /// - `MissingType` / `UnknownType` if `type` is absent or outside every category
    /// - `ParameterShape` / `MixedParameters` if the parameters do not fit the category
    pub fn validate(raw: &Value) -> Result<ConstraintRecord, SchemaError> {
        if !raw.is_object() {
            return Err(SchemaError::NotAnObject);
        }
        let envelope = RawConstraint::deserialize(raw)
            .map_err(|e| SchemaError::InvalidRecord(e.to_string()))?;

        let type_name = envelope.constraint_type.ok_or(SchemaError::MissingType)?;
        let parameters = match envelope.parameters {
            None => OpaqueMap::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(SchemaError::parameter_shape(
                    &type_name,
                    format!("expected an object, got {}", json_kind(&other)),
                ))
            }
        };

        let constraint_type = Self::classify(&type_name, &parameters)?;
        let parameters =
            ConstraintParameters::decode(constraint_type.category(), Value::Object(parameters))
                .map_err(|e| SchemaError::parameter_shape(&type_name, e.to_string()))?;

        Ok(ConstraintRecord::from_parts(
            envelope
                .id
                .map(ConstraintId::from_raw)
                .unwrap_or_else(ConstraintId::generate),
            constraint_type,
            envelope.scope,
            envelope.priority,
            envelope.confidence.unwrap_or(UNSET_CONFIDENCE),
            parameters,
        ))
    }

    /// Validates every record of a structured output, stopping at the first rejection.
    ///
    /// `metadata` is passed through untouched; anything other than an object
    /// is treated as empty.
    pub fn validate_output(
        constraints: &[Value],
        metadata: Option<&Value>,
    ) -> Result<StructuredOutput, RecordRejection> {
        let records = constraints
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                Self::validate(raw).map_err(|error| RecordRejection { index, error })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let metadata = match metadata {
            Some(Value::Object(map)) => map.clone(),
            _ => OpaqueMap::new(),
        };
        Ok(StructuredOutput::new(records, metadata))
    }

    /// Resolves a wire type name to exactly one category.
    ///
    /// A specific subtype fixes the category and every category-owned
    /// parameter key must belong to it. `Default` is shared by all four
    /// vocabularies, so the owner of the parameter keys decides, with
    /// `General.Default` when no owned key is present.
    fn classify(type_name: &str, parameters: &OpaqueMap) -> Result<ConstraintType, SchemaError> {
        let candidates = ConstraintType::candidates(type_name);
        let owners = owning_categories(parameters);

        match candidates.as_slice() {
            [] => Err(SchemaError::UnknownType(type_name.to_string())),
            [single] => {
                if let Some(foreign) = owners.iter().find(|c| **c != single.category()) {
                    return Err(SchemaError::parameter_shape(
                        type_name,
                        format!("contains {foreign} parameter fields"),
                    ));
                }
                Ok(*single)
            }
            _ => match owners.as_slice() {
                [] => Ok(ConstraintType::default()),
                [owner] => Ok(owner.default_type()),
                _ => Err(SchemaError::MixedParameters(owners)),
            },
        }
    }
}

/// Categories that own at least one key of `parameters`.
fn owning_categories(parameters: &OpaqueMap) -> Vec<ConstraintCategory> {
    ConstraintCategory::ALL
        .into_iter()
        .filter(|category| {
            owned_fields(*category)
                .iter()
                .any(|field| parameters.contains_key(*field))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
