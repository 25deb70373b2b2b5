use crate::config::types::{
    Config, CrawlerConfig, DomainEntry, KeywordConfig, OutputConfig, UserAgentConfig,
};
use crate::crawler::parse_selector;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_keywords(&config.keywords)?;
    validate_blacklist_domains(&config.blacklist)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed_url: {}", e)))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "seed_url '{}' must use HTTP or HTTPS",
            config.seed_url
        )));
    }

    if config.seed_selector.trim().is_empty() {
        return Err(ConfigError::Validation(
            "seed_selector cannot be empty".to_string(),
        ));
    }
    parse_selector(&config.seed_selector)?;

    if config.fetch_timeout_ms < 1000 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_ms must be >= 1000ms, got {}ms",
            config.fetch_timeout_ms
        )));
    }

    if config.max_concurrent_companies < 1 || config.max_concurrent_companies > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_companies must be between 1 and 100, got {}",
            config.max_concurrent_companies
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "json_path cannot be empty".to_string(),
        ));
    }

    if matches!(config.database_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "database_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates every keyword list
///
/// A blank keyword would be a substring of every link, so it is rejected.
fn validate_keywords(keywords: &KeywordConfig) -> Result<(), ConfigError> {
    for (category, words) in [
        ("careers", &keywords.careers),
        ("internship", &keywords.internship),
        ("company", &keywords.company),
        ("contact", &keywords.contact),
    ] {
        if words.is_empty() {
            return Err(ConfigError::Validation(format!(
                "keyword list '{}' cannot be empty",
                category
            )));
        }

        if words.iter().any(|w| w.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "keyword list '{}' contains a blank keyword",
                category
            )));
        }
    }

    Ok(())
}

/// Validates blacklist domain entries
fn validate_blacklist_domains(domains: &[DomainEntry]) -> Result<(), ConfigError> {
    for entry in domains {
        if entry.domain.contains('.') {
            validate_domain_pattern(&entry.domain)?;
        } else {
            validate_label(&entry.domain)?;
        }
    }
    Ok(())
}

/// Validates a bare label blacklist entry (e.g., "taltech")
fn validate_label(label: &str) -> Result<(), ConfigError> {
    if label.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Blacklist label cannot be empty".to_string(),
        ));
    }

    if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::InvalidPattern(format!(
            "Label '{}' contains invalid characters",
            label
        )));
    }

    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if let Some(domain) = pattern.strip_prefix("*.") {
        validate_domain_string(domain)
    } else {
        validate_domain_string(pattern)
    }
}

/// Validates a domain string (without wildcard prefix)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
