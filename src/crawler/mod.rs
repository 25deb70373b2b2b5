//! Crawler module for company link discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`LinkFetcher`] capability
//! - HTML parsing and link extraction
//! - Seed list extraction from the company directory
//! - The per-company pipeline and the concurrent orchestrator

mod company;
mod fetcher;
mod orchestrator;
mod parser;
mod pipeline;
mod seed;

pub use company::{CompanyRecord, CrawlOutcome};
pub use fetcher::{
    build_http_client, FetchError, FetchedPage, HttpLinkFetcher, LinkFetcher, TextResponse,
};
pub use orchestrator::{run_scout, CrawlReport, Orchestrator};
pub use parser::extract_link_entries;
pub use pipeline::{CompanyPipeline, Exclusion};
pub use seed::{clean_company_name, extract_companies, fetch_seed_list, parse_selector};
