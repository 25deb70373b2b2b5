//! Company records and crawl outcomes

use crate::classify::ClassificationResult;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use url::Url;

/// A company taken from the seed directory
///
/// The homepage is always in origin form (`scheme://host[:port]/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub name: String,
    pub homepage: Url,
}

impl CompanyRecord {
    pub fn new(name: impl Into<String>, homepage: Url) -> Self {
        Self {
            name: name.into(),
            homepage,
        }
    }

    /// Builds a record from a raw homepage URL, normalizing it
    pub fn from_homepage(name: impl Into<String>, homepage: &str) -> crate::UrlResult<Self> {
        Ok(Self::new(name, crate::url::normalize_url(homepage)?))
    }
}

/// The links found for one company
///
/// Serialized as a flat object:
/// `{name, homepageLink, careersLink, internshipLink, aboutLink, contactLink}`
/// where every link except the homepage may be `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    pub company: CompanyRecord,
    pub links: ClassificationResult,

    /// Whether the internship link came from the careers page
    pub internship_via_fallback: bool,
}

impl Serialize for CrawlOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CrawlOutcome", 6)?;
        state.serialize_field("name", &self.company.name)?;
        state.serialize_field("homepageLink", self.company.homepage.as_str())?;
        state.serialize_field("careersLink", &self.links.careers)?;
        state.serialize_field("internshipLink", &self.links.internship)?;
        state.serialize_field("aboutLink", &self.links.about)?;
        state.serialize_field("contactLink", &self.links.contact)?;
        state.end()
    }
}
