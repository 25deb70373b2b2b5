use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Career-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub keywords: KeywordConfig,
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<DomainEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Directory page listing the company homepages
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// CSS selector for the company anchors on the seed page
    #[serde(rename = "seed-selector", default = "default_seed_selector")]
    pub seed_selector: String,

    /// Timeout for every network operation (milliseconds)
    #[serde(rename = "fetch-timeout-ms", default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Maximum number of companies crawled at the same time
    #[serde(
        rename = "max-concurrent-companies",
        default = "default_max_concurrent_companies"
    )]
    pub max_concurrent_companies: u32,
}

impl CrawlerConfig {
    /// Returns the fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON results document
    #[serde(rename = "json-path")]
    pub json_path: String,

    /// Optional SQLite database the results are also recorded in
    #[serde(rename = "database-path", default)]
    pub database_path: Option<String>,
}

/// Keyword lists per link category
///
/// Every list falls back to its default when omitted from the file.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordConfig {
    #[serde(default = "default_careers_keywords")]
    pub careers: Vec<String>,

    #[serde(default = "default_internship_keywords")]
    pub internship: Vec<String>,

    /// Keywords for the company/about page
    #[serde(default = "default_company_keywords", alias = "about")]
    pub company: Vec<String>,

    #[serde(default = "default_contact_keywords")]
    pub contact: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            careers: default_careers_keywords(),
            internship: default_internship_keywords(),
            company: default_company_keywords(),
            contact: default_contact_keywords(),
        }
    }
}

/// Simple domain entry for the blacklist
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DomainEntry {
    /// Bare label (e.g., "ut") or domain pattern (e.g., "*.example.com")
    pub domain: String,
}

fn default_seed_selector() -> String {
    "#logoslist a".to_string()
}

fn default_fetch_timeout_ms() -> u64 {
    60_000
}

fn default_max_concurrent_companies() -> u32 {
    10
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_careers_keywords() -> Vec<String> {
    to_strings(&[
        "career",
        "karjaar",
        "tootamine",
        "join-",
        "liitu-",
        "toopakkumised",
        "tookohad",
        "join",
        "liitu",
        "teamtailor",
        "jobs",
        "cv",
    ])
}

fn default_internship_keywords() -> Vec<String> {
    to_strings(&[
        "internship",
        "praktika",
        "apprenticeship",
        "apprentice",
        "student",
    ])
}

fn default_company_keywords() -> Vec<String> {
    to_strings(&[
        "about-us",
        "about-group",
        "company",
        "meist",
        "meeskond",
        "ettevottest",
    ])
}

fn default_contact_keywords() -> Vec<String> {
    to_strings(&["contact", "lets-connect", "kontakt"])
}

/// Educational institutions listed on the default seed directory
pub(crate) fn default_blacklist() -> Vec<DomainEntry> {
    ["ut", "tlu", "taltech", "euas", "kood", "tktk", "tptlive"]
        .iter()
        .map(|d| DomainEntry {
            domain: d.to_string(),
        })
        .collect()
}
