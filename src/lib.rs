//! paramschema - typed parameter schemas and positional record validation

pub mod cli;
pub mod observability;
pub mod schema;
