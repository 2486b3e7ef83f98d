//! Constraint schema rejections.

use thiserror::Error;

use super::category::ConstraintCategory;

/// Why a raw value could not be interpreted as a constraint record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("constraint must be a JSON object")]
    NotAnObject,

    #[error("constraint record is malformed: {0}")]
    InvalidRecord(String),

    #[error("constraint has no type")]
    MissingType,

    #[error("unknown constraint type '{0}'")]
    UnknownType(String),

    #[error("parameters do not match {constraint_type}: {reason}")]
    ParameterShape {
        constraint_type: String,
        reason: String,
    },

    #[error("parameters mix fields from several categories: {0:?}")]
    MixedParameters(Vec<ConstraintCategory>),
}

impl SchemaError {
    /// Creates a parameter shape error.
    pub fn parameter_shape(constraint_type: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::ParameterShape {
            constraint_type: constraint_type.into(),
            reason: reason.into(),
        }
    }
}
