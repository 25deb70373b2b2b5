//! HTML parser for extracting anchors
//!
//! Turns a page body into the ordered list of [`LinkEntry`] values the
//! classifier works on.

use crate::classify::LinkEntry;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts every linked anchor from an HTML document, in document order
///
/// # Link Extraction Rules
///
/// **Include:** every `<a href="...">` in the document, resolved against the
/// page URL. Same-page fragments (`#contact`), `mailto:` and `tel:` links and
/// `download` anchors are kept, since a contact or about link is often one of
/// those.
///
/// **Exclude:**
/// - `javascript:` links and data URIs
/// - Hrefs that do not resolve to a URL
///
/// The text is the anchor's visible text with whitespace collapsed. Icon-only
/// anchors get empty text and can only match on their URL.
///
/// # Example
///
/// ```
/// use career_scout::crawler::extract_link_entries;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/jobs"> Open  positions </a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let links = extract_link_entries(html, &base_url);
/// assert_eq!(links[0].text, "Open positions");
/// assert_eq!(links[0].url, "https://example.com/jobs");
/// ```
pub fn extract_link_entries(html: &str, base_url: &Url) -> Vec<LinkEntry> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(LinkEntry {
                        text: element_text(&element),
                        url: absolute_url,
                    });
                }
            }
        }
    }

    links
}

/// Visible text of an element with runs of whitespace collapsed
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves a link href to an absolute URL
///
/// Returns None for `javascript:` and `data:` hrefs and for hrefs that do
/// not resolve.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    let lower = href.to_lowercase();
    if lower.starts_with("javascript:") || lower.starts_with("data:") {
        return None;
    }

    base_url.join(href).ok().map(|absolute_url| absolute_url.to_string())
}
