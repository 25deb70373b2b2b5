//! Run statistics
//!
//! [`RunSummary`] is filled in by the orchestrator as pipelines finish and
//! handed to every result sink together with the outcomes.

use crate::classify::Category;
use crate::crawler::{CrawlOutcome, Exclusion, FetchError};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters for one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Companies taken from the seed list
    pub seeded: u64,

    /// Companies that produced an outcome
    pub completed: u64,

    /// Companies excluded by robots.txt
    pub policy_denied: u64,

    // Homepage fetch failures by kind
    pub fetch_timeouts: u64,
    pub fetch_transport_errors: u64,
    pub fetch_http_errors: u64,
    pub fetch_parse_errors: u64,

    /// Pipeline tasks that panicked or were cancelled
    pub task_failures: u64,

    /// Internship links that came from a careers page
    pub internship_via_fallback: u64,

    // Links found per category
    pub careers_found: u64,
    pub internship_found: u64,
    pub about_found: u64,
    pub contact_found: u64,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RunSummary {
    /// Starts a summary for a run over `seeded` companies
    pub fn new(seeded: u64) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            seeded,
            completed: 0,
            policy_denied: 0,
            fetch_timeouts: 0,
            fetch_transport_errors: 0,
            fetch_http_errors: 0,
            fetch_parse_errors: 0,
            task_failures: 0,
            internship_via_fallback: 0,
            careers_found: 0,
            internship_found: 0,
            about_found: 0,
            contact_found: 0,
        }
    }

    pub fn record_outcome(&mut self, outcome: &CrawlOutcome) {
        self.completed += 1;
        if outcome.internship_via_fallback {
            self.internship_via_fallback += 1;
        }

        for category in Category::all() {
            if outcome.links.get(category).is_none() {
                continue;
            }
            match category {
                Category::Careers => self.careers_found += 1,
                Category::Internship => self.internship_found += 1,
                Category::About => self.about_found += 1,
                Category::Contact => self.contact_found += 1,
            }
        }
    }

    pub fn record_exclusion(&mut self, exclusion: &Exclusion) {
        match exclusion {
            Exclusion::PolicyDenied => self.policy_denied += 1,
            Exclusion::Fetch(FetchError::Timeout(_)) => self.fetch_timeouts += 1,
            Exclusion::Fetch(FetchError::Transport(_)) => self.fetch_transport_errors += 1,
            Exclusion::Fetch(FetchError::Http(_)) => self.fetch_http_errors += 1,
            Exclusion::Fetch(FetchError::Parse(_)) => self.fetch_parse_errors += 1,
        }
    }

    pub fn record_task_failure(&mut self) {
        self.task_failures += 1;
    }

    /// Stamps the end time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Homepage fetch failures of every kind
    pub fn fetch_failures(&self) -> u64 {
        self.fetch_timeouts
            + self.fetch_transport_errors
            + self.fetch_http_errors
            + self.fetch_parse_errors
    }

    /// Companies that ended without an outcome
    pub fn excluded(&self) -> u64 {
        self.policy_denied + self.fetch_failures() + self.task_failures
    }

    /// Companies that reached a terminal state
    pub fn processed(&self) -> u64 {
        self.completed + self.excluded()
    }

    /// Wall-clock duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Share of seeded companies that produced an outcome, as a percentage
    pub fn completion_rate(&self) -> f64 {
        if self.seeded == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.seeded as f64) * 100.0
    }
}

/// Prints a run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Career Scout Summary ===\n");

    println!("Companies:");
    println!("  Seeded: {}", summary.seeded);
    println!(
        "  Completed: {} ({:.1}%)",
        summary.completed,
        summary.completion_rate()
    );
    println!("  Disallowed by robots.txt: {}", summary.policy_denied);
    println!("  Fetch failures: {}", summary.fetch_failures());
    if summary.fetch_failures() > 0 {
        println!("    Timeouts: {}", summary.fetch_timeouts);
        println!("    Transport: {}", summary.fetch_transport_errors);
        println!("    HTTP status: {}", summary.fetch_http_errors);
        println!("    Malformed page: {}", summary.fetch_parse_errors);
    }
    if summary.task_failures > 0 {
        println!("  Task failures: {}", summary.task_failures);
    }
    println!();

    println!("Links found:");
    println!("  Careers: {}", summary.careers_found);
    println!(
        "  Internship: {} ({} via careers page)",
        summary.internship_found, summary.internship_via_fallback
    );
    println!("  About: {}", summary.about_found);
    println!("  Contact: {}", summary.contact_found);

    if let Some(seconds) = summary.duration_seconds() {
        println!();
        println!("Duration: {}s", seconds);
    }
}
