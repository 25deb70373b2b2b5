use crate::UrlError;
use url::Url;

/// Normalizes a homepage URL into origin form
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything that is not HTTP or HTTPS
/// 3. Reject URLs without a host
/// 4. Drop path, query, fragment and credentials, keeping `scheme://host[:port]/`
///
/// The host is lowercased by the `url` crate during parsing. A `www.` prefix
/// is kept: it names a different host and robots.txt is served per host.
///
/// # Examples
///
/// ```
/// use career_scout::url::normalize_url;
///
/// let url = normalize_url("https://WWW.Example.COM/en/about?x=1#top").unwrap();
/// assert_eq!(url.as_str(), "https://www.example.com/");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    origin_of(&url)
}

/// Reduces an already parsed URL to its origin (`scheme://host[:port]/`)
///
/// This is the key the robots.txt cache is indexed by. Default ports are
/// omitted by the `url` crate, non-default ports are kept so that two
/// services on one host are treated as separate sites.
pub fn origin_of(url: &Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let host = url.host_str().ok_or(UrlError::MissingDomain)?;
    if host.is_empty() {
        return Err(UrlError::MissingDomain);
    }

    let origin = match url.port() {
        Some(port) => format!("{}://{}:{}/", url.scheme(), host, port),
        None => format!("{}://{}/", url.scheme(), host),
    };

    Url::parse(&origin).map_err(|e| UrlError::Parse(e.to_string()))
}
