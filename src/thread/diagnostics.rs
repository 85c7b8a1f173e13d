use serde::Serialize;
use std::fmt;

/// A recoverable anomaly observed while crawling or assembling a thread
///
/// None of these abort a request; they are logged when created and carried
/// alongside the result for callers that want to inspect them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A reply widget without a recognizable author link was dropped
    ExtractionMiss { fragment: String },

    /// Two records shared an id; the later one replaced the earlier
    DuplicateId { id: String },

    /// A reply whose parent never arrived
    OrphanRecord { id: String, parent_id: String },

    /// A reply only reachable through a parent cycle was detached
    ParentCycle { id: String },

    /// A lazy branch that failed to load and was left out
    SkippedBranch { link: String, reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtractionMiss { fragment } => {
                write!(f, "dropped a reply without author in {}", fragment)
            }
            Self::DuplicateId { id } => write!(f, "duplicate reply id {}", id),
            Self::OrphanRecord { id, parent_id } => {
                write!(f, "reply {} has unknown parent {}", id, parent_id)
            }
            Self::ParentCycle { id } => write!(f, "reply {} is part of a parent cycle", id),
            Self::SkippedBranch { link, reason } => {
                write!(f, "skipped branch {}: {}", link, reason)
            }
        }
    }
}
