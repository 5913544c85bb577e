//! Record validation against a parameter schema
//!
//! Validation semantics:
//! - Record length must equal the field count (structural, fails fast)
//! - Value i is checked against field i, no name matching
//! - Every field is checked, failures are collected in field order
//! - Numeric ranges are inclusive at both ends
//! - String fields are never range checked
//!
//! Validation is deterministic and does not mutate the schema.

use super::errors::{FieldViolation, SchemaError, SchemaResult};
use super::record::{RawValue, ValidationReport};
use super::types::{FieldDefinition, NativeKind, Placement, Range};

/// A raw value after coercion into a field's native kind
#[derive(Debug, Clone, Copy, PartialEq)]
enum Coerced<'v> {
    Integer(i64),
    Floating(f64),
    Text(&'v str),
}

/// Compiled check for one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    field: String,
    kind: NativeKind,
    /// `None` for string fields
    range: Option<Range>,
}

impl FieldRule {
    /// Compiles the rule for a field definition
    pub fn compile(def: &FieldDefinition) -> Self {
        let field_type = def.field_type();
        Self {
            field: def.name().to_string(),
            kind: field_type.native_kind(),
            range: field_type.is_numeric().then(|| def.range()),
        }
    }

    /// Range enforced by this rule, if any
    pub fn range(&self) -> Option<Range> {
        self.range
    }

    /// Checks a single value
    pub fn check(&self, value: &RawValue) -> Result<(), FieldViolation> {
        let coerced = self.coerce(value)?;

        let Some(range) = self.range else {
            return Ok(());
        };

        let (placement, actual) = match coerced {
            Coerced::Integer(i) => (range.locate_int(i), i.to_string()),
            Coerced::Floating(f) => (range.locate(f), f.to_string()),
            Coerced::Text(_) => return Ok(()),
        };

        let expected = match placement {
            Placement::Within => return Ok(()),
            Placement::Below => format!("greater than or equal to {}", range.low()),
            Placement::Above => format!("less than or equal to {}", range.high()),
            Placement::Unordered => format!("within {}", range),
        };

        Err(FieldViolation::out_of_range(&self.field, expected, actual))
    }

    fn coerce<'v>(&self, value: &'v RawValue) -> Result<Coerced<'v>, FieldViolation> {
        let coerced = match (self.kind, value) {
            (NativeKind::Integer, RawValue::Int(i)) => Some(Coerced::Integer(*i)),
            (NativeKind::Integer, RawValue::Float(f)) => whole_number(*f),
            (NativeKind::Integer, RawValue::Text(s)) => {
                s.trim().parse::<i64>().ok().map(Coerced::Integer)
            }

            (NativeKind::Floating, RawValue::Int(i)) => Some(Coerced::Floating(*i as f64)),
            (NativeKind::Floating, RawValue::Float(f)) => Some(Coerced::Floating(*f)),
            (NativeKind::Floating, RawValue::Text(s)) => {
                s.trim().parse::<f64>().ok().map(Coerced::Floating)
            }

            (NativeKind::Text, RawValue::Text(s)) => Some(Coerced::Text(s)),
            (NativeKind::Text, _) => None,
        };

        coerced.ok_or_else(|| {
            FieldViolation::type_mismatch(&self.field, self.kind.kind_name(), value.describe())
        })
    }
}

/// Accepts finite floats with no fractional part.
///
/// Whole numbers outside the i64 range are kept as floats and range checked
/// as such.
fn whole_number<'v>(f: f64) -> Option<Coerced<'v>> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    if !f.is_finite() || f.fract() != 0.0 {
        None
    } else if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(Coerced::Integer(f as i64))
    } else {
        Some(Coerced::Floating(f))
    }
}

/// An ordered set of parameter fields.
///
/// Field order is the positional contract for records. Rules are compiled once,
/// at construction, and the schema is immutable afterwards, so a single instance
/// can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    fields: Vec<FieldDefinition>,
    rules: Vec<FieldRule>,
}

impl SchemaDefinition {
    /// Creates a schema and compiles one rule per field
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        let rules = fields.iter().map(FieldRule::compile).collect();
        Self { fields, rules }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Number of fields, which is the required record length
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates a record positionally.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::LengthMismatch` when the record length differs from
    /// the number of fields. No field is checked in that case.
    pub fn validate_record(&self, record: &[RawValue]) -> SchemaResult<ValidationReport> {
        if record.len() != self.rules.len() {
            return Err(SchemaError::LengthMismatch {
                expected: self.rules.len(),
                actual: record.len(),
            });
        }

        let violations = self
            .rules
            .iter()
            .zip(record)
            .filter_map(|(rule, value)| rule.check(value).err())
            .collect();

        Ok(ValidationReport::new(violations))
    }
}
