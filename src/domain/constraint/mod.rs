//! ConstraintSchema - the typed vocabulary of scheduling constraints.
//!
//! - `category` - the four categories and their closed subtype sets
//! - `parameters` - per-category parameter shapes
//! - `record` - `ConstraintRecord` and `StructuredOutput`
//! - `schema` - classification and shape checks for raw JSON

mod category;
mod errors;
mod parameters;
mod record;
mod schema;

pub use category::{
    ConstraintCategory, ConstraintType, GeneralKind, TeamKind, TemporalKind, VenueKind,
};
pub use errors::SchemaError;
pub use parameters::{
    ConstraintParameters, DateRange, GeneralParameters, OpaqueMap, RestrictionValue,
    TeamParameters, TemporalParameters, VenueParameters,
};
pub use record::{ConstraintRecord, Priority, StructuredOutput, UNSET_CONFIDENCE};
pub use schema::{ConstraintSchema, RecordRejection};
