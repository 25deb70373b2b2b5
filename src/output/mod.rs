//! Output module for crawl results
//!
//! This module handles:
//! - Writing outcomes to a JSON file and, optionally, a SQLite database
//! - Recording run statistics and printing the end-of-run summary

mod json;
mod sqlite_output;
pub mod stats;
mod traits;

pub use json::JsonFileSink;
pub use sqlite_output::{initialize_schema, SqliteSink, SCHEMA_SQL};
pub use stats::{print_summary, RunSummary};
pub use traits::{OutputError, OutputResult, ResultSink};

use crate::config::Config;

/// Builds every sink the configuration asks for
///
/// The JSON sink is always present; the SQLite sink only when a database
/// path is configured.
pub fn sinks_from_config(config: &Config, config_hash: &str) -> Vec<Box<dyn ResultSink>> {
    let mut sinks: Vec<Box<dyn ResultSink>> =
        vec![Box::new(JsonFileSink::new(&config.output.json_path))];

    if let Some(database_path) = &config.output.database_path {
        sinks.push(Box::new(SqliteSink::new(database_path, config_hash)));
    }

    sinks
}
