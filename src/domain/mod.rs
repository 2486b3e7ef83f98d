//! Domain layer containing the client's protocol state and vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps)
//! - `constraint` - ConstraintSchema: categories, parameter shapes, validation
//! - `transcript` - Turns and the append-only TranscriptStore
//! - `citation` - SourceIndex and citation header decoding
//! - `replay` - Step records, tool-turn pairing, reveal scheduling

pub mod citation;
pub mod constraint;
pub mod foundation;
pub mod replay;
pub mod transcript;
