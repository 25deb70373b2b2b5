//! Crawl orchestration
//!
//! Fans the seed list out over a bounded set of tokio tasks, one
//! [`CompanyPipeline`] run per company, and gathers the outcomes.

use crate::classify::CategoryKeywords;
use crate::config::Config;
use crate::crawler::company::{CompanyRecord, CrawlOutcome};
use crate::crawler::fetcher::{HttpLinkFetcher, LinkFetcher};
use crate::crawler::pipeline::{CompanyPipeline, Exclusion};
use crate::crawler::seed::fetch_seed_list;
use crate::output::{sinks_from_config, RunSummary};
use crate::robots::PolicyGate;
use crate::ScoutError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// How often progress is logged, in completed companies
const PROGRESS_INTERVAL: u64 = 10;

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Outcomes in completion order
    pub outcomes: Vec<CrawlOutcome>,
    pub summary: RunSummary,
}

/// Runs company pipelines concurrently
pub struct Orchestrator {
    pipeline: Arc<CompanyPipeline>,
    max_concurrent: usize,
}

impl Orchestrator {
    /// Creates an orchestrator
    ///
    /// # Arguments
    ///
    /// * `pipeline` - Shared by every task of the run
    /// * `max_concurrent` - Upper bound on companies in flight, at least 1
    pub fn new(pipeline: Arc<CompanyPipeline>, max_concurrent: usize) -> Self {
        Self {
            pipeline,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Wires a pipeline and a fresh robots.txt gate around `fetcher`
    pub fn from_config(config: &Config, fetcher: Arc<dyn LinkFetcher>) -> Self {
        let timeout = config.crawler.fetch_timeout();
        let gate = Arc::new(PolicyGate::new(fetcher.clone(), timeout));
        let keywords = Arc::new(CategoryKeywords::from(&config.keywords));
        let pipeline = Arc::new(CompanyPipeline::new(fetcher, gate, keywords, timeout));

        Self::new(pipeline, config.crawler.max_concurrent_companies as usize)
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Crawls every company and returns the outcomes with run counters
    ///
    /// Per-company failures never abort the run. A task that panics is
    /// logged and counted.
    pub async fn run(&self, companies: Vec<CompanyRecord>) -> CrawlReport {
        let total = companies.len() as u64;
        let mut summary = RunSummary::new(total);
        let mut outcomes = Vec::with_capacity(companies.len());

        tracing::info!(
            "Crawling {} companies, {} at a time",
            total,
            self.max_concurrent
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();

        for company in companies {
            let semaphore = semaphore.clone();
            let pipeline = self.pipeline.clone();

            tasks.spawn(async move {
                // The semaphore is never closed
                let _permit = semaphore.acquire_owned().await.ok();
                let result = pipeline.run(&company).await;
                (company, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(outcome))) => {
                    summary.record_outcome(&outcome);
                    outcomes.push(outcome);
                }
                Ok((company, Err(exclusion))) => {
                    log_exclusion(&company, &exclusion);
                    summary.record_exclusion(&exclusion);
                }
                Err(e) => {
                    tracing::error!("Company task failed: {}", e);
                    summary.record_task_failure();
                }
            }

            let done = summary.processed();
            if done % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {}/{} companies ({} with outcome)",
                    done,
                    total,
                    summary.completed
                );
            }
        }

        summary.finish();
        tracing::info!(
            "Crawl finished: {} outcomes, {} excluded, {} robots.txt files cached",
            summary.completed,
            summary.excluded(),
            self.pipeline.gate().cached_domains().await
        );

        CrawlReport { outcomes, summary }
    }
}

fn log_exclusion(company: &CompanyRecord, exclusion: &Exclusion) {
    match exclusion {
        Exclusion::PolicyDenied => {
            tracing::info!("Skipping {} ({}): {}", company.name, company.homepage, exclusion);
        }
        Exclusion::Fetch(_) => {
            tracing::warn!("Skipping {} ({}): {}", company.name, company.homepage, exclusion);
        }
    }
}

/// Runs a complete scout: seed list, crawl, and every configured sink
///
/// # Arguments
///
/// * `config` - Validated configuration
/// * `config_hash` - Hash of the configuration file, stored with the run
///
/// # Returns
///
/// * `Ok(CrawlReport)` - All outcomes were written
/// * `Err(ScoutError)` - The seed list could not be built or a sink failed
pub async fn run_scout(config: Config, config_hash: &str) -> Result<CrawlReport, ScoutError> {
    let fetcher: Arc<dyn LinkFetcher> = Arc::new(HttpLinkFetcher::new(
        &config.user_agent,
        config.crawler.fetch_timeout(),
    )?);

    let companies = fetch_seed_list(fetcher.as_ref(), &config).await?;

    let report = Orchestrator::from_config(&config, fetcher)
        .run(companies)
        .await;

    for sink in sinks_from_config(&config, config_hash) {
        tracing::debug!("Writing {} sink", sink.name());
        sink.write(&report.outcomes, &report.summary)?;
    }

    Ok(report)
}
