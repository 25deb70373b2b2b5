//! Per-company crawl pipeline
//!
//! One run walks a single company through
//! `PolicyCheck → HomepageFetch → Classify → [InternshipFallback] → Complete`.
//! Every failure is recovered here: the company either yields a
//! [`CrawlOutcome`] or an [`Exclusion`] saying why it was left out.

use crate::classify::{classify, classify_all, Category, CategoryKeywords};
use crate::crawler::company::{CompanyRecord, CrawlOutcome};
use crate::crawler::fetcher::{FetchError, LinkFetcher};
use crate::robots::PolicyGate;
use crate::state::PipelineStage;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Why a company produced no outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    /// robots.txt disallows the homepage, or could not be retrieved
    PolicyDenied,

    /// The homepage fetch failed
    Fetch(FetchError),
}

impl Exclusion {
    /// The terminal stage this exclusion ends in
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::PolicyDenied => PipelineStage::Disallowed,
            Self::Fetch(_) => PipelineStage::FetchFailed,
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PolicyDenied => write!(f, "disallowed by robots.txt"),
            Self::Fetch(e) => write!(f, "homepage fetch failed: {}", e),
        }
    }
}

/// Tracks the current stage and checks every move against the stage table
struct StageTracker<'a> {
    company: &'a str,
    stage: PipelineStage,
}

impl<'a> StageTracker<'a> {
    fn new(company: &'a str) -> Self {
        Self {
            company,
            stage: PipelineStage::Pending,
        }
    }

    fn enter(&mut self, next: PipelineStage) {
        match self.stage.advance(next) {
            Ok(stage) => {
                tracing::debug!("{}: {} -> {}", self.company, self.stage, stage);
                self.stage = stage;
            }
            Err(e) => {
                tracing::error!("{}: {}", self.company, e);
                self.stage = next;
            }
        }
    }
}

/// Crawls one company at a time; cheap to share between tasks
pub struct CompanyPipeline {
    fetcher: Arc<dyn LinkFetcher>,
    gate: Arc<PolicyGate>,
    keywords: Arc<CategoryKeywords>,
    timeout: Duration,
}

impl CompanyPipeline {
    /// Creates a pipeline
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Fetches homepage and careers page links
    /// * `gate` - robots.txt gate, shared with every other pipeline of the run
    /// * `keywords` - Keyword sets per category
    /// * `timeout` - Bound on each page fetch
    pub fn new(
        fetcher: Arc<dyn LinkFetcher>,
        gate: Arc<PolicyGate>,
        keywords: Arc<CategoryKeywords>,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            gate,
            keywords,
            timeout,
        }
    }

    /// Returns the shared robots.txt gate
    pub fn gate(&self) -> &Arc<PolicyGate> {
        &self.gate
    }

    /// Runs the pipeline for one company
    pub async fn run(&self, company: &CompanyRecord) -> Result<CrawlOutcome, Exclusion> {
        let span = tracing::info_span!("company", name = %company.name);
        self.run_stages(company).instrument(span).await
    }

    async fn run_stages(&self, company: &CompanyRecord) -> Result<CrawlOutcome, Exclusion> {
        let homepage = company.homepage.as_str();
        let mut tracker = StageTracker::new(&company.name);

        tracker.enter(PipelineStage::PolicyCheck);
        if !self.gate.is_allowed(homepage).await {
            tracker.enter(PipelineStage::Disallowed);
            return Err(Exclusion::PolicyDenied);
        }

        tracker.enter(PipelineStage::HomepageFetch);
        let page = match self.fetcher.fetch_links(homepage, self.timeout).await {
            Ok(page) => page,
            Err(e) => {
                tracker.enter(PipelineStage::FetchFailed);
                return Err(Exclusion::Fetch(e));
            }
        };
        tracing::debug!("Fetched {} links from {}", page.links.len(), page.final_url);

        tracker.enter(PipelineStage::Classify);
        let mut links = classify_all(&page.links, &self.keywords);
        let mut internship_via_fallback = false;

        if links.internship.is_none() {
            if let Some(careers) = links.careers.clone() {
                if self.gate.is_allowed(&careers).await {
                    tracker.enter(PipelineStage::InternshipFallback);
                    links.internship = self.internship_fallback(&careers).await;
                    internship_via_fallback = links.internship.is_some();
                } else {
                    tracing::debug!("Careers page {} disallowed, no fallback", careers);
                }
            }
        }

        tracker.enter(PipelineStage::Complete);
        tracing::debug!(
            "Found {}/{} links",
            links.found_count(),
            Category::all().len()
        );

        Ok(CrawlOutcome {
            company: company.clone(),
            links,
            internship_via_fallback,
        })
    }

    /// Searches the careers page for an internship link
    ///
    /// Failures are logged and leave the internship slot empty.
    async fn internship_fallback(&self, careers_url: &str) -> Option<String> {
        match self.fetcher.fetch_links(careers_url, self.timeout).await {
            Ok(page) => classify(&page.links, self.keywords.get(Category::Internship)),
            Err(e) => {
                tracing::warn!("Internship fallback on {} failed: {}", careers_url, e);
                None
            }
        }
    }
}
