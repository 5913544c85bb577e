//! Schema loader for parameter dictionaries
//!
//! Schema documents are JSON objects keyed by field name:
//!
//! ```json
//! {
//!     "STEP":   { "UNIT": "",  "TYPE": "INT",    "RANGE": [0, 10] },
//!     "HEIGHT": { "UNIT": "m", "TYPE": "DOUBLE", "RANGE": [0, 100] }
//! }
//! ```
//!
//! Key order in the document is the field order of the schema.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::{AtomicType, FieldDefinition};
use super::validator::SchemaDefinition;

/// One entry of a schema document
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldEntry {
    #[serde(rename = "UNIT")]
    unit: String,
    #[serde(rename = "TYPE")]
    field_type: AtomicType,
    #[serde(rename = "RANGE")]
    range: Vec<f64>,
}

/// Builds schemas from parameter dictionaries.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Loads a schema file from disk.
    pub fn from_path(path: &Path) -> SchemaResult<SchemaDefinition> {
        let source_name = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed(&source_name, format!("Failed to read file: {}", e))
        })?;
        Self::from_str(&source_name, &content)
    }

    /// Parses a schema document. `source_name` only appears in error messages.
    pub fn from_str(source_name: &str, content: &str) -> SchemaResult<SchemaDefinition> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| SchemaError::malformed(source_name, format!("Invalid JSON: {}", e)))?;
        Self::from_value(source_name, &value)
    }

    /// Builds a schema from an already parsed document.
    pub fn from_value(source_name: &str, value: &Value) -> SchemaResult<SchemaDefinition> {
        let entries = value.as_object().ok_or_else(|| {
            SchemaError::malformed(source_name, "schema document must be an object")
        })?;

        let mut fields = Vec::with_capacity(entries.len());
        for (name, entry) in entries {
            fields.push(Self::parse_field(source_name, name, entry)?);
        }

        Ok(SchemaDefinition::new(fields))
    }

    fn parse_field(source_name: &str, name: &str, entry: &Value) -> SchemaResult<FieldDefinition> {
        let entry = FieldEntry::deserialize(entry).map_err(|e| {
            SchemaError::malformed(source_name, format!("field '{}': {}", name, e))
        })?;

        let (low, high) = match entry.range.as_slice() {
            [low, high] => (*low, *high),
            other => {
                return Err(SchemaError::malformed(
                    source_name,
                    format!(
                        "field '{}': RANGE must have exactly 2 bounds, got {}",
                        name,
                        other.len()
                    ),
                ))
            }
        };

        FieldDefinition::new(name, entry.field_type, entry.unit, (low, high))
    }
}
