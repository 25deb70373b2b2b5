//! HTTP fetcher implementation
//!
//! This module defines the [`LinkFetcher`] capability the pipeline consumes
//! and its default implementation on top of `reqwest`:
//! - Building the HTTP client with a proper user agent string
//! - GET requests bounded by a per-call timeout
//! - Error classification into [`FetchError`] kinds
//!
//! No JavaScript is executed: the link set is whatever the server-rendered
//! HTML contains.

use crate::classify::LinkEntry;
use crate::config::UserAgentConfig;
use crate::crawler::parser::extract_link_entries;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a single fetch failed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("malformed page: {0}")]
    Parse(String),
}

impl FetchError {
    /// Short stable name of the error kind, used in logs and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Transport(_) => "transport",
            Self::Http(_) => "http",
            Self::Parse(_) => "parse",
        }
    }

    fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout)
        } else if error.is_connect() {
            Self::Transport(format!("connection failed: {}", error))
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// A fetched page reduced to its outbound links
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code (always 2xx for a successful fetch)
    pub status: u16,

    /// Final URL after redirects
    pub final_url: String,

    /// Anchors in document order
    pub links: Vec<LinkEntry>,
}

/// A plain-text response, whatever its status
#[derive(Debug, Clone)]
pub struct TextResponse {
    pub status: u16,
    pub body: String,
}

/// Capability to turn a URL into a list of links
///
/// Implementations must honor `timeout` for the whole operation, body
/// included, and report a non-2xx page as [`FetchError::Http`].
#[async_trait]
pub trait LinkFetcher: Send + Sync {
    /// Fetches an HTML page and extracts its anchors
    async fn fetch_links(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError>;

    /// Fetches a resource as text; any HTTP status is returned as `Ok`
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<TextResponse, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use career_scout::config::UserAgentConfig;
/// use career_scout::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "career-scout".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(60)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`LinkFetcher`] backed by plain HTTP GET and HTML parsing
#[derive(Debug, Clone)]
pub struct HttpLinkFetcher {
    client: Client,
}

impl HttpLinkFetcher {
    pub fn new(config: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config, timeout)?,
        })
    }

    async fn get_page(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        let final_url = response.url().clone();

        // Missing Content-Type is tolerated, a non-HTML one is not
        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.contains("html") {
                return Err(FetchError::Parse(format!(
                    "expected HTML, got {}",
                    content_type
                )));
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        Ok(FetchedPage {
            status: status.as_u16(),
            final_url: final_url.to_string(),
            links: extract_link_entries(&body, &final_url),
        })
    }

    async fn get_text(&self, url: &str, timeout: Duration) -> Result<TextResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        Ok(TextResponse { status, body })
    }
}

#[async_trait]
impl LinkFetcher for HttpLinkFetcher {
    async fn fetch_links(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        Url::parse(url).map_err(|e| FetchError::Parse(format!("invalid URL {}: {}", url, e)))?;

        tokio::time::timeout(timeout, self.get_page(url, timeout))
            .await
            .map_err(|_| FetchError::Timeout(timeout))?
    }

    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<TextResponse, FetchError> {
        Url::parse(url).map_err(|e| FetchError::Parse(format!("invalid URL {}: {}", url, e)))?;

        tokio::time::timeout(timeout, self.get_text(url, timeout))
            .await
            .map_err(|_| FetchError::Timeout(timeout))?
    }
}
