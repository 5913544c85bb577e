//! Typed parameter schemas
//!
//! A schema is an ordered list of fields, each with an atomic type, a unit label
//! and an inclusive numeric range. Records are checked against it positionally.
//!
//! # Design Principles
//!
//! - Invalid ranges cannot be constructed
//! - Record length is a structural precondition
//! - All field failures are reported together, in field order
//! - Deterministic, side-effect free validation

mod errors;
mod loader;
mod record;
mod types;
mod validator;

pub use errors::{
    FieldViolation, SchemaError, SchemaErrorCode, SchemaResult, Severity, ViolationKind,
};
pub use loader::SchemaLoader;
pub use record::{RawValue, ValidationReport};
pub use types::{AtomicType, FieldDefinition, FieldSpec, NativeKind, Placement, Range};
pub use validator::{FieldRule, SchemaDefinition};
