//! Result sink trait and output errors

use crate::crawler::CrawlOutcome;
use crate::output::stats::RunSummary;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A destination for the outcomes of a run
///
/// Sinks are written once, after every pipeline has finished.
pub trait ResultSink {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Writes all outcomes of a run
    ///
    /// # Arguments
    ///
    /// * `outcomes` - Outcomes in completion order
    /// * `summary` - Counters for the run
    fn write(&self, outcomes: &[CrawlOutcome], summary: &RunSummary) -> OutputResult<()>;
}
