//! JSON I/O handling for CLI
//!
//! - Input: one JSON array (record) per line
//! - Output: one JSON object per line
//! - UTF-8 only

use std::io::Write;

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};
use crate::schema::{RawValue, ValidationReport};

/// Parse a record from a single line of JSON
pub fn parse_record(line: &str) -> CliResult<Vec<RawValue>> {
    if line.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let record: Vec<RawValue> = serde_json::from_str(line)?;
    Ok(record)
}

/// Render a validation report as the response payload
pub fn report_json(report: &ValidationReport) -> Value {
    let errors: Vec<Value> = report
        .violations()
        .iter()
        .map(|v| {
            json!({
                "field": v.field,
                "reason": v.kind.as_str(),
                "message": v.message(),
            })
        })
        .collect();

    json!({
        "valid": report.is_valid(),
        "errors": errors,
    })
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AtomicType, FieldDefinition, SchemaDefinition};

    #[test]
    fn test_parse_record() {
        let record = parse_record("[5, 50.0, \"x\"]").unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record[2], RawValue::Text("x".into()));
    }

    #[test]
    fn test_parse_record_rejects_bad_input() {
        assert!(parse_record("   ").is_err());
        assert!(parse_record("{\"a\": 1}").is_err());
        assert!(parse_record("[true]").is_err());
    }

    #[test]
    fn test_report_json() {
        let schema = SchemaDefinition::new(vec![
            FieldDefinition::new("STEP", AtomicType::Int, "", (0.0, 10.0)).unwrap(),
        ]);
        let report = schema.validate_record(&[15.into()]).unwrap();

        let value = report_json(&report);
        assert_eq!(value["valid"], false);
        assert_eq!(value["errors"][0]["field"], "STEP");
        assert_eq!(value["errors"][0]["reason"], "out_of_range");
    }

    #[test]
    fn test_write_error_single_line() {
        let mut out = Vec::new();
        write_error(&mut out, "SCHEMA_LENGTH_MISMATCH", "bad length").unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let parsed: Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["code"], "SCHEMA_LENGTH_MISMATCH");
    }
}
