//! Robots.txt cache entries
//!
//! One entry per origin is kept for the whole run; entries never expire.

use crate::robots::parser::{ParsedRobots, WILDCARD_AGENT};
use chrono::{DateTime, Duration, Utc};

/// Cached robots.txt data for an origin
#[derive(Debug, Clone)]
pub struct CachedRobots {
    /// The origin (`scheme://host[:port]/`) the rules belong to
    pub origin: String,

    /// The parsed robots.txt content
    pub content: ParsedRobots,

    /// When the robots.txt was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Creates a new CachedRobots instance stamped with the current time
    pub fn new(origin: impl Into<String>, content: ParsedRobots) -> Self {
        Self {
            origin: origin.into(),
            content,
            fetched_at: Utc::now(),
        }
    }

    /// Returns the age of the cached robots.txt
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }

    /// Checks a full URL against the cached rules for the wildcard agent
    pub fn is_allowed(&self, url: &str) -> bool {
        self.content.is_allowed(url, WILDCARD_AGENT)
    }
}
