/// Pipeline stage definitions for tracking one company's crawl
///
/// This module defines every stage a company passes through and which moves
/// between them are legal.
use crate::ScoutError;
use std::fmt;

/// Represents the current stage of a company pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    // ===== Active Stages =====
    /// Company received, nothing done yet
    Pending,

    /// Waiting for the robots.txt verdict on the homepage
    PolicyCheck,

    /// Homepage is being fetched
    HomepageFetch,

    /// Homepage links are being classified
    Classify,

    /// Careers page is being searched for an internship link
    InternshipFallback,

    // ===== Terminal Success Stage =====
    /// Outcome emitted
    Complete,

    // ===== Terminal Exclusion Stages =====
    /// robots.txt refused the homepage (or could not be retrieved)
    Disallowed,

    /// Homepage could not be fetched
    FetchFailed,
}

impl PipelineStage {
    /// Returns true if this is a terminal stage
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Disallowed | Self::FetchFailed)
    }

    /// Returns true if the company ends up in the output from this stage
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Returns true if this stage excludes the company from the output
    pub fn is_excluded(&self) -> bool {
        matches!(self, Self::Disallowed | Self::FetchFailed)
    }

    /// Returns true if moving from `self` to `next` is legal
    pub fn can_transition_to(&self, next: PipelineStage) -> bool {
        use PipelineStage::*;

        matches!(
            (self, next),
            (Pending, PolicyCheck)
                | (PolicyCheck, Disallowed)
                | (PolicyCheck, HomepageFetch)
                | (HomepageFetch, FetchFailed)
                | (HomepageFetch, Classify)
                | (Classify, InternshipFallback)
                | (Classify, Complete)
                | (InternshipFallback, Complete)
        )
    }

    /// Performs a checked transition
    ///
    /// # Returns
    ///
    /// * `Ok(next)` - The transition is legal
    /// * `Err(ScoutError::InvalidTransition)` - It is not
    pub fn advance(self, next: PipelineStage) -> Result<PipelineStage, ScoutError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ScoutError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Stable lowercase name of the stage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PolicyCheck => "policy_check",
            Self::HomepageFetch => "homepage_fetch",
            Self::Classify => "classify",
            Self::InternshipFallback => "internship_fallback",
            Self::Complete => "complete",
            Self::Disallowed => "disallowed",
            Self::FetchFailed => "fetch_failed",
        }
    }

    /// Returns all stages
    pub fn all_stages() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::PolicyCheck,
            Self::HomepageFetch,
            Self::Classify,
            Self::InternshipFallback,
            Self::Complete,
            Self::Disallowed,
            Self::FetchFailed,
        ]
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
