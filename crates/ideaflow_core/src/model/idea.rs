//! Idea domain model.
//!
//! # Responsibility
//! - Define the canonical idea record shared across the review pipeline.
//! - Encode the status lifecycle and its forward-only transition rules.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another idea.
//! - Status moves only along `submitted -> under_review -> assessed`;
//!   `rejected` is terminal and never entered by core workflow operations.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every idea in the pipeline.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type IdeaId = Uuid;

/// Review lifecycle state of an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    /// Submitted by its author, waiting for a reviewer to pick it up.
    Submitted,
    /// A reviewer has selected the idea and is drafting an assessment.
    UnderReview,
    /// An assessment has been persisted for this idea.
    Assessed,
    /// Closed without assessment. Terminal; set outside the core workflow.
    Rejected,
}

impl IdeaStatus {
    /// Stable string id used in storage and wire payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Assessed => "assessed",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its stable string id.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "submitted" => Some(Self::Submitted),
            "under_review" => Some(Self::UnderReview),
            "assessed" => Some(Self::Assessed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns whether moving from `self` to `next` respects the forward-only
    /// lifecycle.
    ///
    /// Same-status transitions are allowed so that a repeated
    /// `submitted -> under_review` write from a second reviewer degrades to a
    /// no-op instead of an error.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Submitted, Self::UnderReview) | (Self::UnderReview, Self::Assessed)
        )
    }

    /// Returns whether an idea in this status belongs in the pending queue.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Submitted | Self::UnderReview)
    }
}

/// Canonical idea record.
///
/// Descriptive fields are opaque to the core: the workflow reads them only to
/// hand them onward to presentation collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    /// Stable global ID used for linking and auditing.
    pub uuid: IdeaId,
    pub status: IdeaStatus,
    pub title: String,
    pub description: String,
    pub expected_benefits: String,
    pub ai_capability_area: String,
    pub business_function: String,
    pub submitter_name: String,
    /// Unix epoch milliseconds at intake.
    pub created_at: i64,
}

impl Idea {
    /// Creates a new `Submitted` idea with a generated stable ID.
    pub fn new(title: impl Into<String>, submitter_name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, submitter_name)
    }

    /// Creates a new `Submitted` idea with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        uuid: IdeaId,
        title: impl Into<String>,
        submitter_name: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            status: IdeaStatus::Submitted,
            title: title.into(),
            description: String::new(),
            expected_benefits: String::new(),
            ai_capability_area: String::new(),
            business_function: String::new(),
            submitter_name: submitter_name.into(),
            created_at: now_epoch_ms(),
        }
    }

    /// Returns whether this idea belongs in the pending queue.
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

/// Current time as unix epoch milliseconds.
fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
