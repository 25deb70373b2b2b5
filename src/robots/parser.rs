//! Robots.txt parser implementation
//!
//! This module provides functionality for parsing robots.txt content using the robotstxt crate.

use robotstxt::DefaultMatcher;

/// User agent robots.txt rules are evaluated for
pub const WILDCARD_AGENT: &str = "*";

/// Parsed robots.txt data
///
/// This is a wrapper around the robotstxt crate's matcher, providing a
/// simplified interface for checking if URLs are allowed. A policy built
/// with [`ParsedRobots::deny_all`] stands in for a robots.txt that could not
/// be retrieved.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content
    content: String,
    /// Whether every URL is refused regardless of content
    deny_all: bool,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            deny_all: false,
        }
    }

    /// Creates a policy that refuses everything
    ///
    /// Used when robots.txt is missing, unreachable, or answers with a
    /// status other than 200.
    pub fn deny_all() -> Self {
        Self {
            content: String::new(),
            deny_all: true,
        }
    }

    /// Returns true if this policy came from an unretrievable robots.txt
    pub fn is_deny_all(&self) -> bool {
        self.deny_all
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The full URL to check (e.g., "https://example.com/page.html")
    /// * `user_agent` - The user agent string
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.deny_all {
            return false;
        }

        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENT: &str = WILDCARD_AGENT;

    #[test]
    fn test_deny_all() {
        let robots = ParsedRobots::deny_all();
        assert!(robots.is_deny_all());
        assert!(!robots.is_allowed("https://example.com/", AGENT));
        assert!(!robots.is_allowed("https://example.com/careers", AGENT));
    }

    #[test]
    fn test_parse_disallow_all() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /");
        assert!(!robots.is_allowed("https://example.com/", AGENT));
        assert!(!robots.is_allowed("https://example.com/page", AGENT));
    }

    #[test]
    fn test_parse_disallow_specific() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /admin");
        assert!(robots.is_allowed("https://example.com/", AGENT));
        assert!(robots.is_allowed("https://example.com/careers", AGENT));
        assert!(!robots.is_allowed("https://example.com/admin", AGENT));
        assert!(!robots.is_allowed("https://example.com/admin/users", AGENT));
    }

    #[test]
    fn test_parse_allow_and_disallow() {
        let content = "User-agent: *\nDisallow: /private\nAllow: /private/jobs";
        let robots = ParsedRobots::from_content(content);
        assert!(robots.is_allowed("https://example.com/", AGENT));
        assert!(!robots.is_allowed("https://example.com/private", AGENT));
        assert!(robots.is_allowed("https://example.com/private/jobs", AGENT));
    }

    #[test]
    fn test_specific_agent_group_does_not_bind_wildcard() {
        let content = "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /";
        let robots = ParsedRobots::from_content(content);
        assert!(robots.is_allowed("https://example.com/page", AGENT));
    }

    #[test]
    fn test_query_string_is_evaluated() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /*?lang=");
        assert!(robots.is_allowed("https://example.com/jobs", AGENT));
        assert!(!robots.is_allowed("https://example.com/jobs?lang=et", AGENT));
    }

    #[test]
    fn test_invalid_robots_txt() {
        let robots = ParsedRobots::from_content("This is not valid robots.txt {{{");
        assert!(robots.is_allowed("https://example.com/any/path", AGENT));
    }

    #[test]
    fn test_empty_robots_txt() {
        let robots = ParsedRobots::from_content("");
        assert!(!robots.is_deny_all());
        assert!(robots.is_allowed("https://example.com/any/path", AGENT));
    }
}
