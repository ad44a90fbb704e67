//! Assessment draft and finalized assessment record.
//!
//! # Responsibility
//! - Hold the in-progress, unsaved scores and rationales for one review.
//! - Gate record construction on scorecard completeness.
//!
//! # Invariants
//! - A draft never validates cross-dimension rules; only completeness.
//! - An `AssessmentRecord` always carries a score for all seven dimensions;
//!   the only constructor is `AssessmentDraft::finalize`.
//! - Rationales are optional per dimension and never required for submit.

use crate::model::scorecard::{axis_scores, AxisScores, ScoreDimension, ScoreLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Draft-level error raised when finalizing an incomplete scorecard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// One or more dimensions have no score yet, listed in canonical order.
    MissingScores(Vec<ScoreDimension>),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingScores(missing) => {
                let names: Vec<&str> = missing.iter().map(|d| d.as_str()).collect();
                write!(f, "scorecard incomplete, missing: {}", names.join(", "))
            }
        }
    }
}

impl Error for DraftError {}

/// In-progress, unsaved scores and rationales for the selected idea.
///
/// Mutation is local and always succeeds; no store interaction happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentDraft {
    scores: BTreeMap<ScoreDimension, ScoreLevel>,
    rationales: BTreeMap<ScoreDimension, String>,
}

impl AssessmentDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the level for one dimension.
    pub fn set_score(&mut self, dimension: ScoreDimension, level: ScoreLevel) {
        self.scores.insert(dimension, level);
    }

    /// Inserts or overwrites the free-text rationale for one dimension.
    ///
    /// Empty text is permitted and kept as-is.
    pub fn set_rationale(&mut self, dimension: ScoreDimension, text: impl Into<String>) {
        self.rationales.insert(dimension, text.into());
    }

    /// Current score mapping, exposed for presentation collaborators.
    pub fn scores(&self) -> &BTreeMap<ScoreDimension, ScoreLevel> {
        &self.scores
    }

    /// Current rationale mapping, exposed for presentation collaborators.
    pub fn rationales(&self) -> &BTreeMap<ScoreDimension, String> {
        &self.rationales
    }

    /// Returns true iff every one of the seven dimensions has a score.
    ///
    /// Rationale completeness is never part of this check.
    pub fn is_complete(&self) -> bool {
        self.missing_dimensions().is_empty()
    }

    /// Dimensions without a score yet, in canonical order.
    pub fn missing_dimensions(&self) -> Vec<ScoreDimension> {
        ScoreDimension::ALL
            .into_iter()
            .filter(|dimension| !self.scores.contains_key(dimension))
            .collect()
    }

    /// Clears all scores and rationales.
    pub fn reset(&mut self) {
        self.scores.clear();
        self.rationales.clear();
    }

    /// Builds the finalized record from a complete draft.
    ///
    /// # Errors
    /// - `DraftError::MissingScores` when any dimension is unscored; the
    ///   draft itself is left untouched.
    pub fn finalize(&self, assessed_by: impl Into<String>) -> Result<AssessmentRecord, DraftError> {
        let missing = self.missing_dimensions();
        if !missing.is_empty() {
            return Err(DraftError::MissingScores(missing));
        }

        Ok(AssessmentRecord {
            scores: self.scores.clone(),
            rationales: self.rationales.clone(),
            assessed_by: assessed_by.into(),
        })
    }
}

/// Finalized, submit-ready outcome of scoring one idea.
///
/// `assessed_at` is deliberately absent: the store stamps it at persistence
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    scores: BTreeMap<ScoreDimension, ScoreLevel>,
    rationales: BTreeMap<ScoreDimension, String>,
    assessed_by: String,
}

impl AssessmentRecord {
    /// Score mapping; guaranteed to cover all seven dimensions.
    pub fn scores(&self) -> &BTreeMap<ScoreDimension, ScoreLevel> {
        &self.scores
    }

    /// Rationale mapping; sparse, keyed by dimension.
    pub fn rationales(&self) -> &BTreeMap<ScoreDimension, String> {
        &self.rationales
    }

    /// Reviewer attribution captured at submit time.
    pub fn assessed_by(&self) -> &str {
        &self.assessed_by
    }

    /// Axis aggregates for this record.
    pub fn axis_scores(&self) -> AxisScores {
        // Completeness is guaranteed by `finalize`.
        axis_scores(&self.scores).unwrap_or(AxisScores {
            value: 0.0,
            feasibility: 0.0,
        })
    }
}
