//! Seed list extraction
//!
//! Reads the directory page once and turns its company anchors into
//! [`CompanyRecord`]s. The directory is the trusted entry point, so it is
//! fetched without a robots.txt check.

use crate::config::{Config, DomainEntry};
use crate::crawler::company::CompanyRecord;
use crate::crawler::fetcher::{FetchError, LinkFetcher};
use crate::crawler::parser::element_text;
use crate::url::{extract_domain, is_blacklisted, normalize_url};
use crate::{ConfigError, ScoutError};
use scraper::{Html, Selector};
use url::Url;

/// Parses a CSS selector from configuration
pub fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::Validation(format!("Invalid selector '{}': {:?}", selector, e)))
}

/// Extracts companies from the directory page HTML
///
/// For every anchor matched by `selector`:
/// 1. The name is the text of its `<span>` child, or the anchor text when
///    there is none, with a leading list ordinal (`"12."`) removed
/// 2. The href is resolved against `base_url` and reduced to its origin
/// 3. Blacklisted hosts and unusable hrefs are dropped
///
/// # Example
///
/// ```
/// use career_scout::crawler::{extract_companies, parse_selector};
/// use url::Url;
///
/// let html = r#"<div id="logoslist">
///     <a href="https://acme.ee/en"><span>1. Acme</span></a>
/// </div>"#;
/// let base = Url::parse("https://itl.ee/en/members/").unwrap();
/// let selector = parse_selector("#logoslist a").unwrap();
/// let companies = extract_companies(html, &base, &selector, &[]);
/// assert_eq!(companies[0].name, "Acme");
/// assert_eq!(companies[0].homepage.as_str(), "https://acme.ee/");
/// ```
pub fn extract_companies(
    html: &str,
    base_url: &Url,
    selector: &Selector,
    blacklist: &[DomainEntry],
) -> Vec<CompanyRecord> {
    let document = Html::parse_document(html);
    let span = Selector::parse("span").ok();
    let mut companies = Vec::new();

    for anchor in document.select(selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let homepage = match base_url
            .join(href.trim())
            .map_err(|e| e.to_string())
            .and_then(|u| normalize_url(u.as_str()).map_err(|e| e.to_string()))
        {
            Ok(homepage) => homepage,
            Err(e) => {
                tracing::debug!("Skipping seed link {}: {}", href, e);
                continue;
            }
        };

        let host = extract_domain(&homepage).unwrap_or_default();
        if is_blacklisted(&host, blacklist) {
            tracing::info!("Skipping blacklisted domain {}", host);
            continue;
        }

        let raw_name = span
            .as_ref()
            .and_then(|s| anchor.select(s).next())
            .map(|s| element_text(&s))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| element_text(&anchor));

        let name = match clean_company_name(&raw_name) {
            n if n.is_empty() => host.clone(),
            n => n,
        };

        companies.push(CompanyRecord::new(name, homepage));
    }

    companies
}

/// Trims a directory label and drops a leading ordinal like `"12."`
pub fn clean_company_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits = trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();

    if digits > 0 {
        if let Some(rest) = trimmed[digits..].strip_prefix('.') {
            return rest.trim().to_string();
        }
    }

    trimmed.to_string()
}

/// Fetches the directory page and extracts the seed list
///
/// Any failure here is fatal to the run, including a page that yields no
/// companies at all.
pub async fn fetch_seed_list(
    fetcher: &dyn LinkFetcher,
    config: &Config,
) -> Result<Vec<CompanyRecord>, ScoutError> {
    let seed_url = Url::parse(&config.crawler.seed_url)?;
    let selector = parse_selector(&config.crawler.seed_selector)?;

    tracing::info!("Fetching seed list from {}", seed_url);

    let response = fetcher
        .fetch_text(seed_url.as_str(), config.crawler.fetch_timeout())
        .await
        .map_err(|source| ScoutError::SeedFetch {
            url: seed_url.to_string(),
            source,
        })?;

    if !(200..300).contains(&response.status) {
        return Err(ScoutError::SeedFetch {
            url: seed_url.to_string(),
            source: FetchError::Http(response.status),
        });
    }

    let companies = extract_companies(&response.body, &seed_url, &selector, &config.blacklist);
    if companies.is_empty() {
        return Err(ScoutError::EmptySeedList {
            url: seed_url.to_string(),
        });
    }

    tracing::info!("Seed list contains {} companies", companies.len());
    Ok(companies)
}
