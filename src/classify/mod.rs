//! Keyword-based link classification
//!
//! Given the anchors found on a page, this module picks the link that best
//! matches a category's keywords. Matching is a case-insensitive substring
//! test, done in two passes over the anchors in page order:
//!
//! 1. Anchor text: the first anchor whose visible text contains a keyword wins
//! 2. Anchor URL: only when no text matched, the first anchor whose URL
//!    contains a keyword wins
//!
//! Visible text is preferred even when a later anchor's URL is a closer match.
//! Everything here is synchronous and free of I/O.

use crate::config::KeywordConfig;
use serde::Serialize;
use std::fmt;

/// One outbound anchor discovered on a fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    /// Visible anchor text, trimmed
    pub text: String,

    /// Absolute link target
    pub url: String,
}

impl LinkEntry {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// The four link slots filled for each company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Careers,
    Internship,
    About,
    Contact,
}

impl Category {
    /// Returns all categories in output order
    pub fn all() -> [Self; 4] {
        [Self::Careers, Self::Internship, Self::About, Self::Contact]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Careers => "careers",
            Self::Internship => "internship",
            Self::About => "about",
            Self::Contact => "contact",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A lowercased keyword list
///
/// Keywords are lowercased once here so that matching only has to lowercase
/// the link side. Surrounding spaces are part of the keyword (`"join "` does
/// not match `"joint"`). Blank keywords are dropped since they would match
/// anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    words: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .filter(|w| !w.trim().is_empty())
            .collect();
        Self { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns true if `haystack` contains any keyword, ignoring case
    pub fn matches(&self, haystack: &str) -> bool {
        if self.words.is_empty() || haystack.is_empty() {
            return false;
        }
        let haystack = haystack.to_lowercase();
        self.words.iter().any(|w| haystack.contains(w.as_str()))
    }
}

/// Keyword sets for every category
#[derive(Debug, Clone, Default)]
pub struct CategoryKeywords {
    pub careers: KeywordSet,
    pub internship: KeywordSet,
    pub about: KeywordSet,
    pub contact: KeywordSet,
}

impl CategoryKeywords {
    pub fn get(&self, category: Category) -> &KeywordSet {
        match category {
            Category::Careers => &self.careers,
            Category::Internship => &self.internship,
            Category::About => &self.about,
            Category::Contact => &self.contact,
        }
    }
}

impl From<&KeywordConfig> for CategoryKeywords {
    fn from(config: &KeywordConfig) -> Self {
        Self {
            careers: KeywordSet::new(&config.careers),
            internship: KeywordSet::new(&config.internship),
            about: KeywordSet::new(&config.company),
            contact: KeywordSet::new(&config.contact),
        }
    }
}

/// Links found for one company; every slot is independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    pub careers: Option<String>,
    pub internship: Option<String>,
    pub about: Option<String>,
    pub contact: Option<String>,
}

impl ClassificationResult {
    pub fn get(&self, category: Category) -> Option<&str> {
        match category {
            Category::Careers => self.careers.as_deref(),
            Category::Internship => self.internship.as_deref(),
            Category::About => self.about.as_deref(),
            Category::Contact => self.contact.as_deref(),
        }
    }

    pub fn set(&mut self, category: Category, url: Option<String>) {
        let slot = match category {
            Category::Careers => &mut self.careers,
            Category::Internship => &mut self.internship,
            Category::About => &mut self.about,
            Category::Contact => &mut self.contact,
        };
        *slot = url;
    }

    /// Number of slots that hold a link
    pub fn found_count(&self) -> usize {
        Category::all()
            .iter()
            .filter(|c| self.get(**c).is_some())
            .count()
    }
}

/// Picks the best matching link for a keyword set
///
/// # Examples
///
/// ```
/// use career_scout::classify::{classify, KeywordSet, LinkEntry};
///
/// let links = vec![
///     LinkEntry::new("Opportunities", "https://acme.ee/careers-page"),
///     LinkEntry::new("About", "https://acme.ee/about"),
/// ];
/// let keywords = KeywordSet::new(["career"]);
/// assert_eq!(
///     classify(&links, &keywords).as_deref(),
///     Some("https://acme.ee/careers-page")
/// );
/// ```
pub fn classify(entries: &[LinkEntry], keywords: &KeywordSet) -> Option<String> {
    entries
        .iter()
        .find(|entry| keywords.matches(&entry.text))
        .or_else(|| entries.iter().find(|entry| keywords.matches(&entry.url)))
        .map(|entry| entry.url.clone())
}

/// Classifies the same entries into all four categories
pub fn classify_all(entries: &[LinkEntry], keywords: &CategoryKeywords) -> ClassificationResult {
    let mut result = ClassificationResult::default();
    for category in Category::all() {
        result.set(category, classify(entries, keywords.get(category)));
    }
    result
}
