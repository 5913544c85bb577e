//! Record values and validation reports

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::FieldViolation;

/// An untyped record cell as submitted by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// Returns a short description for error messages
    pub fn describe(&self) -> String {
        match self {
            RawValue::Int(i) => format!("integer {}", i),
            RawValue::Float(f) => format!("number {}", f),
            RawValue::Text(s) => format!("string '{}'", s),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Int(i) => write!(f, "{}", i),
            RawValue::Float(x) => write!(f, "{}", x),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Outcome of checking one record against a schema.
///
/// Violations are kept in schema field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub(crate) fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// True iff no field failed
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the failing fields, in field order
    pub fn failed_fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }

    /// Flattens the report into `(is_valid, [(message, field)])`
    pub fn into_pairs(self) -> (bool, Vec<(String, String)>) {
        let valid = self.is_valid();
        let pairs = self
            .violations
            .into_iter()
            .map(|v| (v.message(), v.field))
            .collect();
        (valid, pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_from_json() {
        let values: Vec<RawValue> = serde_json::from_str(r#"[5, 50.0, "x", -3]"#).unwrap();
        assert_eq!(
            values,
            vec![
                RawValue::Int(5),
                RawValue::Float(50.0),
                RawValue::Text("x".into()),
                RawValue::Int(-3),
            ]
        );
    }

    #[test]
    fn test_raw_value_rejects_non_atomic_json() {
        assert!(serde_json::from_str::<RawValue>("null").is_err());
        assert!(serde_json::from_str::<RawValue>("[1]").is_err());
        assert!(serde_json::from_str::<RawValue>(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = ValidationReport::default();
        assert!(report.is_valid());
        assert_eq!(report.into_pairs(), (true, vec![]));
    }

    #[test]
    fn test_into_pairs_keeps_order() {
        let report = ValidationReport::new(vec![
            FieldViolation::type_mismatch("A", "integer", "string 'x'"),
            FieldViolation::out_of_range("B", "less than or equal to 1", "2"),
        ]);
        assert_eq!(report.failed_fields().collect::<Vec<_>>(), vec!["A", "B"]);

        let (valid, pairs) = report.into_pairs();
        assert!(!valid);
        assert_eq!(pairs[0].1, "A");
        assert_eq!(pairs[1].1, "B");
        assert!(pairs[1].0.contains("out of range"));
    }
}
