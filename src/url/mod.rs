//! URL handling module for Career-Scout
//!
//! This module provides origin normalization, domain extraction, wildcard
//! matching, and the domain blacklist check applied to seed companies.

mod domain;
mod matcher;
mod normalize;

use crate::config::DomainEntry;

pub use domain::{extract_domain, primary_label};
pub use matcher::matches_wildcard;
pub use normalize::{normalize_url, origin_of};

/// Checks a host against the domain blacklist
///
/// Blacklist entries come in two shapes:
/// 1. A bare label without dots (`"ut"`), compared against the host's
///    [`primary_label`] so it covers `ut.ee` and `www.ut.ee` alike
/// 2. A domain pattern (`"ut.ee"`, `"*.ut.ee"`), compared with
///    [`matches_wildcard`]
///
/// # Examples
///
/// ```
/// use career_scout::config::DomainEntry;
/// use career_scout::url::is_blacklisted;
///
/// let blacklist = vec![DomainEntry { domain: "taltech".to_string() }];
/// assert!(is_blacklisted("www.taltech.ee", &blacklist));
/// assert!(!is_blacklisted("example.com", &blacklist));
/// ```
pub fn is_blacklisted(host: &str, blacklist: &[DomainEntry]) -> bool {
    let host = host.to_lowercase();
    let label = primary_label(&host);

    blacklist.iter().any(|entry| {
        let pattern = entry.domain.to_lowercase();
        if pattern.contains('.') {
            matches_wildcard(&pattern, &host)
        } else {
            pattern == label
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(domains: &[&str]) -> Vec<DomainEntry> {
        domains
            .iter()
            .map(|d| DomainEntry {
                domain: d.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_bare_label_matches_host() {
        let blacklist = entries(&["ut", "tlu"]);
        assert!(is_blacklisted("ut.ee", &blacklist));
        assert!(is_blacklisted("www.tlu.ee", &blacklist));
    }

    #[test]
    fn test_bare_label_does_not_match_substring() {
        let blacklist = entries(&["ut"]);
        assert!(!is_blacklisted("utilitas.ee", &blacklist));
        assert!(!is_blacklisted("about.ut.ee.example.com", &blacklist));
    }

    #[test]
    fn test_pattern_entry() {
        let blacklist = entries(&["*.kood.tech"]);
        assert!(is_blacklisted("kood.tech", &blacklist));
        assert!(is_blacklisted("www.kood.tech", &blacklist));
        assert!(!is_blacklisted("kood.ee", &blacklist));
    }

    #[test]
    fn test_case_insensitive() {
        let blacklist = entries(&["EUAS"]);
        assert!(is_blacklisted("WWW.euas.EE", &blacklist));
    }

    #[test]
    fn test_empty_blacklist() {
        assert!(!is_blacklisted("ut.ee", &[]));
    }
}
