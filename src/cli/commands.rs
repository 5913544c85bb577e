//! CLI command implementations
//!
//! Both commands load the config, then the schema. Records are validated one
//! at a time; each produces exactly one response line on stdout.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::schema::{SchemaDefinition, SchemaLoader};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{parse_record, report_json, write_error, write_response};

/// Counts for one processed input stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub malformed: usize,
}

impl StreamSummary {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected + self.malformed
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Check { config } => check(&config),
        Command::Validate { config, record } => validate(&config, record.as_deref()),
    }
}

/// Load the schema and print a summary of its fields
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let schema = load_schema(&config)?;

    write_response(&mut io::stdout(), schema_summary(&schema))
}

/// Validate a single record, or every line of stdin
pub fn validate(config_path: &Path, record: Option<&str>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let schema = load_schema(&config)?;

    let mut stdout = io::stdout();

    if let Some(line) = record {
        return validate_one(&schema, line, &mut stdout);
    }

    let stdin = io::stdin();
    validate_stream(&schema, stdin.lock(), &mut stdout, config.fail_fast)?;
    Ok(())
}

/// Validate exactly one record given as a JSON array.
///
/// Writes one response to `out`. A record that fails validation is reported
/// and then returned as `RecordRejected`; unparseable input and length
/// mismatches are returned as the underlying error.
pub fn validate_one<W: Write>(schema: &SchemaDefinition, line: &str, out: &mut W) -> CliResult<()> {
    let outcome = parse_record(line)
        .and_then(|record| schema.validate_record(&record).map_err(CliError::from));

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            log_event_with_fields(Event::RecordMalformed, &[("error", e.message())]);
            write_error(out, e.code_str(), e.message())?;
            return Err(e);
        }
    };

    write_response(out, report_json(&report))?;
    if report.is_valid() {
        log_event(Event::RecordAccepted);
        Ok(())
    } else {
        let failed = report.failed_fields().collect::<Vec<_>>().join(",");
        log_event_with_fields(Event::RecordRejected, &[("fields", failed.as_str())]);
        Err(CliError::record_rejected())
    }
}

/// Validate every line of `input` against `schema`, writing one response per line.
///
/// Blank lines are skipped. Parse failures and length mismatches produce an
/// error response and count as malformed. With `fail_fast`, processing stops
/// after the first record that is not accepted.
pub fn validate_stream<R: BufRead, W: Write>(
    schema: &SchemaDefinition,
    input: R,
    out: &mut W,
    fail_fast: bool,
) -> CliResult<StreamSummary> {
    let mut summary = StreamSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = (index + 1).to_string();
        let line_no = line_no.as_str();

        let outcome = parse_record(&line)
            .and_then(|record| schema.validate_record(&record).map_err(CliError::from));

        match outcome {
            Ok(report) if report.is_valid() => {
                summary.accepted += 1;
                log_event_with_fields(Event::RecordAccepted, &[("line", line_no)]);
                write_response(out, report_json(&report))?;
            }
            Ok(report) => {
                summary.rejected += 1;
                let failed = report.failed_fields().collect::<Vec<_>>().join(",");
                log_event_with_fields(
                    Event::RecordRejected,
                    &[("line", line_no), ("fields", failed.as_str())],
                );
                write_response(out, report_json(&report))?;
            }
            Err(e) => {
                summary.malformed += 1;
                log_event_with_fields(
                    Event::RecordMalformed,
                    &[("line", line_no), ("error", e.message())],
                );
                write_error(out, e.code_str(), e.message())?;
            }
        }

        if fail_fast && summary.accepted != summary.total() {
            break;
        }
    }

    log_event_with_fields(
        Event::ValidationComplete,
        &[
            ("accepted", summary.accepted.to_string().as_str()),
            ("rejected", summary.rejected.to_string().as_str()),
            ("malformed", summary.malformed.to_string().as_str()),
        ],
    );

    Ok(summary)
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);

    log_event_with_fields(
        Event::ConfigLoaded,
        &[("path", config_path.display().to_string().as_str())],
    );
    Ok(config)
}

fn load_schema(config: &Config) -> CliResult<SchemaDefinition> {
    let path = config.schema_file();
    let path_str = path.display().to_string();

    match SchemaLoader::from_path(&path) {
        Ok(schema) => {
            log_event_with_fields(
                Event::SchemaLoaded,
                &[("path", path_str.as_str()), ("fields", schema.len().to_string().as_str())],
            );
            Ok(schema)
        }
        Err(e) => {
            log_event_with_fields(
                Event::SchemaRejected,
                &[("path", path_str.as_str()), ("code", e.code().code())],
            );
            Err(e.into())
        }
    }
}

/// JSON summary of a schema's fields, in field order
pub fn schema_summary(schema: &SchemaDefinition) -> Value {
    let fields: Vec<Value> = schema
        .fields()
        .iter()
        .map(|f| {
            json!({
                "name": f.name(),
                "type": f.field_type().type_name(),
                "unit": f.unit(),
                "range": [f.range().low(), f.range().high()],
                "range_enforced": f.field_type().is_numeric(),
            })
        })
        .collect();

    json!({ "field_count": schema.len(), "fields": fields })
}
