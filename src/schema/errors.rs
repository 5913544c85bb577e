//! Schema error types
//!
//! Error codes:
//! - SCHEMA_INVALID_RANGE (FATAL)
//! - SCHEMA_MALFORMED (FATAL)
//! - SCHEMA_LENGTH_MISMATCH (REJECT)
//!
//! Per-field failures (type mismatch, out of range) are not errors at this
//! level. They are collected as [`FieldViolation`]s in a validation report.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The submitted record is rejected, the schema stays usable
    Reject,
    /// The schema itself cannot be built
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Stable error codes for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Field range has `low >= high`
    InvalidRange,
    /// Record length differs from the field count
    LengthMismatch,
    /// Schema document could not be read or parsed
    Malformed,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::InvalidRange => "SCHEMA_INVALID_RANGE",
            SchemaErrorCode::LengthMismatch => "SCHEMA_LENGTH_MISMATCH",
            SchemaErrorCode::Malformed => "SCHEMA_MALFORMED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::LengthMismatch => Severity::Reject,
            SchemaErrorCode::InvalidRange | SchemaErrorCode::Malformed => Severity::Fatal,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Structural schema errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A field range whose lower bound is not below its upper bound
    #[error("range [{low}, {high}] is not valid; {low} is not lesser than {high}")]
    InvalidRange { low: f64, high: f64 },

    /// A record whose length differs from the number of schema fields
    #[error("length of record ({actual}) does not match number of parameters {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A schema document that is unreadable or has the wrong shape
    #[error("malformed schema '{source_name}': {reason}")]
    MalformedSchema { source_name: String, reason: String },
}

impl SchemaError {
    /// Create a malformed schema error
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::MalformedSchema {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        match self {
            SchemaError::InvalidRange { .. } => SchemaErrorCode::InvalidRange,
            SchemaError::LengthMismatch { .. } => SchemaErrorCode::LengthMismatch,
            SchemaError::MalformedSchema { .. } => SchemaErrorCode::Malformed,
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code().severity()
    }

    /// Returns whether this error prevents the schema from existing
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Why a single value failed its field rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The value could not be interpreted as the field's native type
    TypeMismatch,
    /// The numeric value lies outside the field's inclusive range
    OutOfRange,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::TypeMismatch => "type_mismatch",
            ViolationKind::OutOfRange => "out_of_range",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed field check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Name of the failing field
    pub field: String,
    /// Failure category
    pub kind: ViolationKind,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl FieldViolation {
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::TypeMismatch,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn out_of_range(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::OutOfRange,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Human-readable description
    pub fn message(&self) -> String {
        match self.kind {
            ViolationKind::TypeMismatch => {
                format!("input should be a valid {}, got {}", self.expected, self.actual)
            }
            ViolationKind::OutOfRange => {
                format!("value {} out of range: should be {}", self.actual, self.expected)
            }
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': {}", self.field, self.message())
    }
}
