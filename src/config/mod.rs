//! Configuration module for Career-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use career_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Fetch timeout: {}ms", config.crawler.fetch_timeout_ms);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, CrawlerConfig, DomainEntry, KeywordConfig, OutputConfig, UserAgentConfig,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
