//! JSON file sink

use crate::crawler::CrawlOutcome;
use crate::output::stats::RunSummary;
use crate::output::traits::{OutputResult, ResultSink};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes outcomes as a pretty-printed JSON array
///
/// The parent directory is created when missing and an existing file is
/// replaced.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonFileSink {
    fn name(&self) -> &str {
        "json"
    }

    fn write(&self, outcomes: &[CrawlOutcome], _summary: &RunSummary) -> OutputResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(outcomes)?;
        fs::write(&self.path, json)?;

        tracing::info!(
            "Wrote {} outcomes to {}",
            outcomes.len(),
            self.path.display()
        );
        Ok(())
    }
}
