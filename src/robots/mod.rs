//! Robots.txt handling module
//!
//! This module provides the [`PolicyGate`]: it fetches robots.txt once per
//! origin, caches the parsed rules for the rest of the run, and answers
//! allow/deny for individual URLs.
//!
//! The gate is fail-closed. A robots.txt that cannot be fetched, times out,
//! or answers with anything other than HTTP 200 denies the whole origin.

mod cache;
mod parser;

pub use cache::CachedRobots;
pub use parser::{ParsedRobots, WILDCARD_AGENT};

use crate::crawler::LinkFetcher;
use crate::url::origin_of;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};
use url::Url;

type RobotsSlot = Arc<OnceCell<CachedRobots>>;

/// Per-run robots.txt gate shared by all company pipelines
///
/// Each origin owns a [`OnceCell`] slot. The first caller for an origin
/// performs the fetch; concurrent callers for the same origin wait on the
/// same slot and reuse its result.
pub struct PolicyGate {
    fetcher: Arc<dyn LinkFetcher>,
    timeout: Duration,
    cache: Mutex<HashMap<String, RobotsSlot>>,
}

impl PolicyGate {
    /// Creates a gate with an empty cache
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Used for the robots.txt GET requests
    /// * `timeout` - Bound on each robots.txt fetch
    pub fn new(fetcher: Arc<dyn LinkFetcher>, timeout: Duration) -> Self {
        Self {
            fetcher,
            timeout,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Checks whether `url` may be crawled
    ///
    /// Empty or unparsable URLs are refused without touching the network or
    /// the cache.
    pub async fn is_allowed(&self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Refusing unparsable URL {}: {}", url, e);
                return false;
            }
        };

        let origin = match origin_of(&parsed) {
            Ok(origin) => origin,
            Err(e) => {
                tracing::debug!("Refusing URL {}: {}", url, e);
                return false;
            }
        };

        let slot = self.slot(origin.as_str()).await;
        let robots = slot.get_or_init(|| self.fetch_robots(origin)).await;
        let allowed = robots.is_allowed(parsed.as_str());

        tracing::trace!("robots.txt verdict for {}: allowed={}", url, allowed);
        allowed
    }

    /// Number of origins with a cache slot
    pub async fn cached_domains(&self) -> usize {
        self.cache.lock().await.len()
    }

    /// Returns the cached entry for an origin, if it has been fetched
    pub async fn cached(&self, origin: &str) -> Option<CachedRobots> {
        let cache = self.cache.lock().await;
        cache.get(origin).and_then(|slot| slot.get().cloned())
    }

    async fn slot(&self, origin: &str) -> RobotsSlot {
        let mut cache = self.cache.lock().await;
        cache.entry(origin.to_string()).or_default().clone()
    }

    /// Fetches and parses robots.txt for an origin, denying on any failure
    async fn fetch_robots(&self, origin: Url) -> CachedRobots {
        let robots_url = match origin.join("robots.txt") {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!("Cannot build robots.txt URL for {}: {}", origin, e);
                return CachedRobots::new(origin.as_str(), ParsedRobots::deny_all());
            }
        };

        tracing::debug!("Fetching {}", robots_url);

        match self.fetcher.fetch_text(robots_url.as_str(), self.timeout).await {
            Ok(response) if response.status == 200 => {
                CachedRobots::new(origin.as_str(), ParsedRobots::from_content(&response.body))
            }
            Ok(response) => {
                tracing::warn!(
                    "Failed to fetch robots.txt for {}: HTTP status {}",
                    origin,
                    response.status
                );
                CachedRobots::new(origin.as_str(), ParsedRobots::deny_all())
            }
            Err(e) => {
                tracing::warn!("Failed to fetch robots.txt for {}: {}", origin, e);
                CachedRobots::new(origin.as_str(), ParsedRobots::deny_all())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::{FetchError, FetchedPage, TextResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves one robots.txt response for every origin and counts requests
    struct RobotsOnly {
        response: Result<TextResponse, FetchError>,
        requests: AtomicUsize,
        delay: Duration,
    }

    impl RobotsOnly {
        fn new(response: Result<TextResponse, FetchError>) -> Self {
            Self {
                response,
                requests: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }

        fn ok(body: &str) -> Self {
            Self::new(Ok(TextResponse {
                status: 200,
                body: body.to_string(),
            }))
        }
    }

    #[async_trait]
    impl LinkFetcher for RobotsOnly {
        async fn fetch_links(&self, _url: &str, _timeout: Duration) -> Result<FetchedPage, FetchError> {
            Err(FetchError::Http(404))
        }

        async fn fetch_text(&self, url: &str, _timeout: Duration) -> Result<TextResponse, FetchError> {
            assert!(url.ends_with("/robots.txt"));
            self.requests.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.response.clone()
        }
    }

    fn gate(fetcher: Arc<RobotsOnly>) -> PolicyGate {
        PolicyGate::new(fetcher, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_empty_url_refused_without_fetch() {
        let fetcher = Arc::new(RobotsOnly::ok(""));
        let gate = gate(fetcher.clone());

        assert!(!gate.is_allowed("").await);
        assert!(!gate.is_allowed("   ").await);
        assert!(!gate.is_allowed("not a url").await);
        assert_eq!(fetcher.requests.load(Ordering::SeqCst), 0);
        assert_eq!(gate.cached_domains().await, 0);
    }

    #[tokio::test]
    async fn test_rules_evaluated_against_full_url() {
        let fetcher = Arc::new(RobotsOnly::ok("User-agent: *\nDisallow: /internal"));
        let gate = gate(fetcher);

        assert!(gate.is_allowed("https://acme.ee/").await);
        assert!(gate.is_allowed("https://acme.ee/careers").await);
        assert!(!gate.is_allowed("https://acme.ee/internal/jobs").await);
    }

    #[tokio::test]
    async fn test_not_found_denies_whole_domain() {
        let fetcher = Arc::new(RobotsOnly::new(Ok(TextResponse {
            status: 404,
            body: "Not Found".to_string(),
        })));
        let gate = gate(fetcher.clone());

        assert!(!gate.is_allowed("https://acme.ee/").await);
        assert!(!gate.is_allowed("https://acme.ee/careers").await);
        assert!(!gate.is_allowed("https://acme.ee/about").await);
        assert_eq!(fetcher.requests.load(Ordering::SeqCst), 1);

        let cached = gate.cached("https://acme.ee/").await.unwrap();
        assert!(cached.content.is_deny_all());
    }

    #[tokio::test]
    async fn test_transport_error_denies() {
        let fetcher = Arc::new(RobotsOnly::new(Err(FetchError::Transport(
            "connection refused".to_string(),
        ))));
        let gate = gate(fetcher);
        assert!(!gate.is_allowed("https://acme.ee/").await);
    }

    #[tokio::test]
    async fn test_timeout_denies() {
        let fetcher = Arc::new(RobotsOnly::new(Err(FetchError::Timeout(
            Duration::from_secs(60),
        ))));
        let gate = gate(fetcher);
        assert!(!gate.is_allowed("https://acme.ee/").await);
    }

    #[tokio::test]
    async fn test_fetched_once_per_origin() {
        let fetcher = Arc::new(RobotsOnly::ok("User-agent: *\nAllow: /"));
        let gate = gate(fetcher.clone());

        assert!(gate.is_allowed("https://acme.ee/").await);
        assert!(gate.is_allowed("https://acme.ee/careers").await);
        assert!(gate.is_allowed("https://ACME.ee/about?x=1").await);
        assert_eq!(fetcher.requests.load(Ordering::SeqCst), 1);

        assert!(gate.is_allowed("https://jobs.acme.ee/").await);
        assert_eq!(fetcher.requests.load(Ordering::SeqCst), 2);
        assert_eq!(gate.cached_domains().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_checks_share_one_fetch() {
        let mut robots = RobotsOnly::ok("User-agent: *\nAllow: /");
        robots.delay = Duration::from_millis(50);
        let fetcher = Arc::new(robots);
        let gate = Arc::new(gate(fetcher.clone()));

        let mut handles = Vec::new();
        for i in 0..8 {
            let gate = gate.clone();
            handles.push(tokio::spawn(async move {
                gate.is_allowed(&format!("https://acme.ee/page/{}", i)).await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(fetcher.requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_http_and_https_are_separate_origins() {
        let fetcher = Arc::new(RobotsOnly::ok(""));
        let gate = gate(fetcher.clone());

        assert!(gate.is_allowed("http://acme.ee/").await);
        assert!(gate.is_allowed("https://acme.ee/").await);
        assert_eq!(fetcher.requests.load(Ordering::SeqCst), 2);
    }
}
