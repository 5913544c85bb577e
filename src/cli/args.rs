//! CLI argument definitions using clap
//!
//! Commands:
//! - paramschema check --config <path>
//! - paramschema validate --config <path> [--record <json>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// paramschema - validate parameter records against a typed schema
#[derive(Parser, Debug)]
#[command(name = "paramschema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the schema and print its fields
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./paramschema.json")]
        config: PathBuf,
    },

    /// Validate records against the schema
    ///
    /// Reads one JSON array per stdin line unless --record is given.
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./paramschema.json")]
        config: PathBuf,

        /// A single record as a JSON array, e.g. '[5, 50.0]'
        #[arg(long)]
        record: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate_with_record() {
        let cli = Cli::try_parse_from([
            "paramschema",
            "validate",
            "--config",
            "conf.json",
            "--record",
            "[5, 50.0]",
        ])
        .unwrap();
        match cli.command {
            Command::Validate { config, record } => {
                assert_eq!(config, PathBuf::from("conf.json"));
                assert_eq!(record.as_deref(), Some("[5, 50.0]"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["paramschema", "check"]).unwrap();
        match cli.command {
            Command::Check { config } => assert_eq!(config, PathBuf::from("./paramschema.json")),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
