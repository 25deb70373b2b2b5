//! Career-Scout: a polite company link finder
//!
//! This crate walks a directory page of company homepages and, for every
//! company whose robots.txt allows it, finds the careers, internship, about
//! and contact links on its homepage. When the homepage has no internship
//! link, the careers page is searched as a fallback.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Career-Scout operations
///
/// Only run-fatal conditions end up here. Per-company failures are recovered
/// inside the pipeline and reported as [`crawler::Exclusion`]s.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch seed list from {url}: {source}")]
    SeedFetch {
        url: String,
        source: crawler::FetchError,
    },

    #[error("Seed page {url} yielded no companies")]
    EmptySeedList { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::PipelineStage,
        to: state::PipelineStage,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Career-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use classify::{classify, classify_all, Category, ClassificationResult, KeywordSet, LinkEntry};
pub use config::Config;
pub use crawler::{CompanyPipeline, CompanyRecord, CrawlOutcome, Exclusion, Orchestrator};
pub use robots::PolicyGate;
pub use state::PipelineStage;
pub use crate::url::{extract_domain, is_blacklisted, normalize_url, origin_of};
