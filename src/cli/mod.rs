//! CLI module for paramschema
//!
//! Provides command-line interface for:
//! - check: Load a schema and print its fields
//! - validate: Validate records from --record or stdin

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    check, run, run_command, schema_summary, validate, validate_one, validate_stream,
    StreamSummary,
};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_record, report_json, write_error, write_response};
