//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Startup
    /// Configuration file loaded
    ConfigLoaded,
    /// Schema document loaded and compiled
    SchemaLoaded,
    /// Schema document rejected (FATAL)
    SchemaRejected,

    // Records
    /// Record passed every field rule
    RecordAccepted,
    /// Record failed one or more field rules
    RecordRejected,
    /// Record could not be parsed or had the wrong length
    RecordMalformed,

    // Batch
    /// Input stream fully processed
    ValidationComplete,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::SchemaRejected => "SCHEMA_REJECTED",
            Event::RecordAccepted => "RECORD_ACCEPTED",
            Event::RecordRejected => "RECORD_REJECTED",
            Event::RecordMalformed => "RECORD_MALFORMED",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SchemaRejected => Severity::Fatal,
            Event::RecordRejected | Event::RecordMalformed => Severity::Warn,
            Event::RecordAccepted => Severity::Trace,
            Event::ConfigLoaded | Event::SchemaLoaded | Event::ValidationComplete => {
                Severity::Info
            }
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
