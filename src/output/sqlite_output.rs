//! SQLite result sink
//!
//! Every run appends one row to `runs` and one row per outcome to
//! `outcomes`, so a database file accumulates the history of many runs.

use crate::crawler::CrawlOutcome;
use crate::output::stats::RunSummary;
use crate::output::traits::{OutputResult, ResultSink};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};

/// SQL schema for the results database
pub const SCHEMA_SQL: &str = r#"
-- One row per run
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    seeded INTEGER NOT NULL,
    completed INTEGER NOT NULL,
    policy_denied INTEGER NOT NULL,
    fetch_failures INTEGER NOT NULL,
    task_failures INTEGER NOT NULL
);

-- Links found per company
CREATE TABLE IF NOT EXISTS outcomes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES runs(id),
    name TEXT NOT NULL,
    homepage TEXT NOT NULL,
    careers TEXT,
    internship TEXT,
    about TEXT,
    contact TEXT,
    internship_via_fallback INTEGER NOT NULL DEFAULT 0,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_outcomes_run ON outcomes(run_id);
CREATE INDEX IF NOT EXISTS idx_outcomes_homepage ON outcomes(homepage);
"#;

/// Creates the tables when missing
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

/// Appends a run and its outcomes to a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteSink {
    path: PathBuf,
    config_hash: String,
}

impl SqliteSink {
    /// Creates a sink
    ///
    /// # Arguments
    ///
    /// * `path` - Database file, created on first write
    /// * `config_hash` - Hash of the configuration the run used
    pub fn new(path: impl Into<PathBuf>, config_hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            config_hash: config_hash.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> OutputResult<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&self.path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;
        initialize_schema(&conn)?;
        Ok(conn)
    }
}

impl ResultSink for SqliteSink {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn write(&self, outcomes: &[CrawlOutcome], summary: &RunSummary) -> OutputResult<()> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO runs (started_at, finished_at, config_hash, seeded, completed,
                               policy_denied, fetch_failures, task_failures)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                summary.started_at.to_rfc3339(),
                summary.finished_at.map(|t| t.to_rfc3339()),
                self.config_hash,
                summary.seeded as i64,
                summary.completed as i64,
                summary.policy_denied as i64,
                summary.fetch_failures() as i64,
                summary.task_failures as i64,
            ],
        )?;
        let run_id = tx.last_insert_rowid();

        let now = Utc::now().to_rfc3339();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO outcomes (run_id, name, homepage, careers, internship, about,
                                       contact, internship_via_fallback, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for outcome in outcomes {
                stmt.execute(params![
                    run_id,
                    outcome.company.name,
                    outcome.company.homepage.as_str(),
                    outcome.links.careers,
                    outcome.links.internship,
                    outcome.links.about,
                    outcome.links.contact,
                    outcome.internship_via_fallback,
                    now,
                ])?;
            }
        }

        tx.commit()?;

        tracing::info!(
            "Recorded run {} with {} outcomes in {}",
            run_id,
            outcomes.len(),
            self.path.display()
        );
        Ok(())
    }
}
