//! Field and type definitions for parameter schemas
//!
//! Supported atomic types:
//! - INT: 64-bit signed integer
//! - DOUBLE: floating point
//! - FLOAT: floating point (stored as f64, the label is descriptive)
//! - STRING: UTF-8 text

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Atomic field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AtomicType {
    /// 64-bit signed integer
    Int,
    /// Double precision floating point
    Double,
    /// Single precision floating point
    Float,
    /// UTF-8 text.
    ///
    /// A string field still carries a numeric range, but the range is never
    /// compared against string values.
    String,
}

/// Native representation a raw value is coerced into before checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    Integer,
    Floating,
    Text,
}

impl AtomicType {
    /// Maps the type to its native representation
    pub fn native_kind(&self) -> NativeKind {
        match self {
            AtomicType::Int => NativeKind::Integer,
            AtomicType::Double | AtomicType::Float => NativeKind::Floating,
            AtomicType::String => NativeKind::Text,
        }
    }

    /// Whether range constraints apply to values of this type
    pub fn is_numeric(&self) -> bool {
        self.native_kind() != NativeKind::Text
    }

    /// Returns the type name used in schema documents
    pub fn type_name(&self) -> &'static str {
        match self {
            AtomicType::Int => "INT",
            AtomicType::Double => "DOUBLE",
            AtomicType::Float => "FLOAT",
            AtomicType::String => "STRING",
        }
    }
}

impl fmt::Display for AtomicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl NativeKind {
    /// Returns the kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            NativeKind::Integer => "integer",
            NativeKind::Floating => "number",
            NativeKind::Text => "string",
        }
    }
}

/// Inclusive numeric bounds `[low, high]` with `low < high`
///
/// Serialized as a `[low, high]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "(f64, f64)")]
pub struct Range {
    low: f64,
    high: f64,
}

impl From<Range> for (f64, f64) {
    fn from(range: Range) -> Self {
        (range.low, range.high)
    }
}

impl Range {
    /// Creates a range, rejecting `low >= high` (and NaN bounds)
    pub fn new(low: f64, high: f64) -> SchemaResult<Self> {
        // Written as a negation so NaN bounds are rejected too
        if !(low < high) {
            return Err(SchemaError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive containment check; NaN is never contained
    pub fn contains(&self, value: f64) -> bool {
        self.locate(value) == Placement::Within
    }

    /// Where a floating point value falls relative to the bounds
    pub fn locate(&self, value: f64) -> Placement {
        if value < self.low {
            Placement::Below
        } else if value > self.high {
            Placement::Above
        } else if value >= self.low && value <= self.high {
            Placement::Within
        } else {
            Placement::Unordered
        }
    }

    /// Where an integer falls relative to the bounds, compared exactly
    pub fn locate_int(&self, value: i64) -> Placement {
        if cmp_int_float(value, self.low) == Ordering::Less {
            Placement::Below
        } else if cmp_int_float(value, self.high) == Ordering::Greater {
            Placement::Above
        } else {
            Placement::Within
        }
    }
}

/// Position of a value relative to a [`Range`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Below,
    Within,
    Above,
    /// NaN compares false against both bounds
    Unordered,
}

/// Exact comparison of an integer against a non-NaN float
fn cmp_int_float(value: i64, bound: f64) -> Ordering {
    // 2^63 is exactly representable; every i64 lies in [-2^63, 2^63)
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if bound >= TWO_POW_63 {
        return Ordering::Less;
    }
    if bound < -TWO_POW_63 {
        return Ordering::Greater;
    }

    let whole = bound.trunc();
    // `whole` is in [-2^63, 2^63), so the cast is exact
    match value.cmp(&(whole as i64)) {
        Ordering::Equal if bound > whole => Ordering::Less,
        Ordering::Equal if bound < whole => Ordering::Greater,
        ordering => ordering,
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// Raw field specification, before the range invariant is checked
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: AtomicType,
    #[serde(default)]
    pub unit: String,
    pub range: (f64, f64),
}

/// A single named, typed, ranged parameter
///
/// Immutable once constructed. Deserialization goes through
/// [`FieldDefinition::new`], so an instance with an invalid range cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FieldSpec")]
pub struct FieldDefinition {
    name: String,
    #[serde(rename = "type")]
    field_type: AtomicType,
    unit: String,
    range: Range,
}

impl FieldDefinition {
    /// Creates a field definition.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidRange` when `range.0 >= range.1`.
    pub fn new(
        name: impl Into<String>,
        field_type: AtomicType,
        unit: impl Into<String>,
        range: (f64, f64),
    ) -> SchemaResult<Self> {
        let (low, high) = range;
        Ok(Self {
            name: name.into(),
            field_type,
            unit: unit.into(),
            range: Range::new(low, high)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> AtomicType {
        self.field_type
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn range(&self) -> Range {
        self.range
    }
}

impl TryFrom<FieldSpec> for FieldDefinition {
    type Error = SchemaError;

    fn try_from(spec: FieldSpec) -> SchemaResult<Self> {
        FieldDefinition::new(spec.name, spec.field_type, spec.unit, spec.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range_accepted() {
        let field = FieldDefinition::new("STEP", AtomicType::Int, "", (0.0, 10.0)).unwrap();
        assert_eq!(field.name(), "STEP");
        assert_eq!(field.field_type(), AtomicType::Int);
        assert_eq!(field.unit(), "");
        assert_eq!(field.range().low(), 0.0);
        assert_eq!(field.range().high(), 10.0);
    }

    #[test]
    fn test_equal_bounds_rejected() {
        let result = FieldDefinition::new("STEP", AtomicType::Int, "", (10.0, 10.0));
        assert!(matches!(
            result,
            Err(SchemaError::InvalidRange { low, high }) if low == 10.0 && high == 10.0
        ));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = FieldDefinition::new("STEP", AtomicType::Int, "", (10.0, 5.0)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("10"));
        assert!(message.contains("5"));
    }

    #[test]
    fn test_nan_bound_rejected() {
        assert!(Range::new(f64::NAN, 1.0).is_err());
        assert!(Range::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_range_inclusive() {
        let range = Range::new(0.0, 100.0).unwrap();
        assert!(range.contains(0.0));
        assert!(range.contains(100.0));
        assert!(!range.contains(-0.001));
        assert!(!range.contains(100.001));
        assert!(!range.contains(f64::NAN));
    }

    #[test]
    fn test_locate_int_is_exact_above_f64_precision() {
        let two_pow_53 = 9_007_199_254_740_992_i64;
        let range = Range::new(0.0, two_pow_53 as f64).unwrap();

        assert_eq!(range.locate_int(two_pow_53), Placement::Within);
        assert_eq!(range.locate_int(two_pow_53 + 1), Placement::Above);
        assert_eq!(range.locate_int(i64::MAX), Placement::Above);
        assert_eq!(range.locate_int(-1), Placement::Below);
    }

    #[test]
    fn test_locate_int_fractional_bounds() {
        let range = Range::new(-2.5, 2.5).unwrap();
        assert_eq!(range.locate_int(-2), Placement::Within);
        assert_eq!(range.locate_int(-3), Placement::Below);
        assert_eq!(range.locate_int(2), Placement::Within);
        assert_eq!(range.locate_int(3), Placement::Above);

        let wide = Range::new(-1e300, 1e300).unwrap();
        assert_eq!(wide.locate_int(i64::MIN), Placement::Within);
        assert_eq!(wide.locate_int(i64::MAX), Placement::Within);
    }

    #[test]
    fn test_locate_nan_is_unordered() {
        let range = Range::new(0.0, 1.0).unwrap();
        assert_eq!(range.locate(f64::NAN), Placement::Unordered);
        assert_eq!(range.locate(2.0), Placement::Above);
    }

    #[test]
    fn test_native_kind_mapping() {
        assert_eq!(AtomicType::Int.native_kind(), NativeKind::Integer);
        assert_eq!(AtomicType::Double.native_kind(), NativeKind::Floating);
        assert_eq!(AtomicType::Float.native_kind(), NativeKind::Floating);
        assert_eq!(AtomicType::String.native_kind(), NativeKind::Text);
        assert!(!AtomicType::String.is_numeric());
        assert!(AtomicType::Float.is_numeric());
    }

    #[test]
    fn test_type_names_round_trip_through_serde() {
        for ty in [AtomicType::Int, AtomicType::Double, AtomicType::Float, AtomicType::String] {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.type_name()));
        }
        let parsed: AtomicType = serde_json::from_str("\"DOUBLE\"").unwrap();
        assert_eq!(parsed, AtomicType::Double);
        assert!(serde_json::from_str::<AtomicType>("\"BOOL\"").is_err());
    }

    #[test]
    fn test_deserialize_enforces_range() {
        let ok: FieldDefinition = serde_json::from_str(
            r#"{"name": "HEIGHT", "type": "DOUBLE", "unit": "m", "range": [0, 100]}"#,
        )
        .unwrap();
        assert_eq!(ok.unit(), "m");

        let bad = serde_json::from_str::<FieldDefinition>(
            r#"{"name": "HEIGHT", "type": "DOUBLE", "unit": "m", "range": [100, 0]}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialized_form_deserializes() {
        let field = FieldDefinition::new("LABEL", AtomicType::String, "", (0.0, 1.0)).unwrap();
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"name":"LABEL","type":"STRING","unit":"","range":[0.0,1.0]}"#);

        let back: FieldDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_range_display() {
        let range = Range::new(0.0, 2.5).unwrap();
        assert_eq!(range.to_string(), "[0, 2.5]");
    }
}
