use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use career_scout::url::extract_domain;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the leading name label of a host, skipping a `www.` prefix
///
/// `www.ut.ee` and `ut.ee` both yield `ut`, `cs.ut.ee` yields `cs`. This is
/// what bare-label blacklist entries are compared against.
///
/// ```
/// use career_scout::url::primary_label;
///
/// assert_eq!(primary_label("www.taltech.ee"), "taltech");
/// assert_eq!(primary_label("kood.tech"), "kood");
/// ```
pub fn primary_label(host: &str) -> &str {
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.split('.').next().unwrap_or(host)
}
