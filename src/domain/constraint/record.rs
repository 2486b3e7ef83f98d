//! Constraint records and the structured output that carries them.

use serde::{Deserialize, Serialize};

use super::category::ConstraintType;
use super::parameters::{ConstraintParameters, OpaqueMap};
use crate::domain::foundation::ConstraintId;

/// Confidence value meaning "not set".
pub const UNSET_CONFIDENCE: f64 = -1.0;

/// Whether a constraint must hold or is only preferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Hard,
    Soft,
}

/// One extracted scheduling constraint.
///
/// # Invariants
///
/// - `parameters` has the shape of `constraint_type`'s category
/// - `constraint_type` belongs to exactly one category
///
/// Records are only built by [`ConstraintRecord::empty`] or by the schema,
/// which enforces both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintRecord {
    id: ConstraintId,
    #[serde(rename = "type")]
    constraint_type: ConstraintType,
    scope: Vec<String>,
    priority: Priority,
    confidence: f64,
    parameters: ConstraintParameters,
}

impl ConstraintRecord {
    /// Creates an empty record: fresh id, `General.Default`, hard, unset confidence.
    pub fn empty() -> Self {
        let constraint_type = ConstraintType::default();
        Self {
            id: ConstraintId::generate(),
            constraint_type,
            scope: Vec::new(),
            priority: Priority::Hard,
            confidence: UNSET_CONFIDENCE,
            parameters: ConstraintParameters::default_for(constraint_type.category()),
        }
    }

    pub(super) fn from_parts(
        id: ConstraintId,
        constraint_type: ConstraintType,
        scope: Vec<String>,
        priority: Priority,
        confidence: f64,
        parameters: ConstraintParameters,
    ) -> Self {
        debug_assert_eq!(constraint_type.category(), parameters.category());
        Self {
            id,
            constraint_type,
            scope,
            priority,
            confidence,
            parameters,
        }
    }

    pub fn id(&self) -> &ConstraintId {
        &self.id
    }

    pub fn constraint_type(&self) -> ConstraintType {
        self.constraint_type
    }

    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Returns false when confidence is still the unset sentinel.
    pub fn has_confidence(&self) -> bool {
        self.confidence != UNSET_CONFIDENCE
    }

    pub fn parameters(&self) -> &ConstraintParameters {
        &self.parameters
    }
}

impl Default for ConstraintRecord {
    fn default() -> Self {
        Self::empty()
    }
}

/// Constraints extracted by one backend call, plus pass-through metadata.
///
/// Immutable once built; replaces normal turn rendering for its exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredOutput {
    constraints: Vec<ConstraintRecord>,
    metadata: OpaqueMap,
}

impl StructuredOutput {
    pub fn new(constraints: Vec<ConstraintRecord>, metadata: OpaqueMap) -> Self {
        Self {
            constraints,
            metadata,
        }
    }

    pub fn constraints(&self) -> &[ConstraintRecord] {
        &self.constraints
    }

    /// Unvalidated metadata exactly as the backend sent it.
    pub fn metadata(&self) -> &OpaqueMap {
        &self.metadata
    }

    /// Pretty-prints the constraint list for display as an assistant turn.
    pub fn to_display_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.constraints)
    }
}
