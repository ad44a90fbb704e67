//! Core domain logic for IdeaFlow, an idea review and assessment pipeline.
//! This crate is the single source of truth for workflow invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::draft::{AssessmentDraft, AssessmentRecord, DraftError};
pub use model::idea::{Idea, IdeaId, IdeaStatus};
pub use model::scorecard::{axis_scores, Axis, AxisScores, ScoreDimension, ScoreLevel};
pub use repo::idea_repo::{
    IdeaRepository, RepoError, RepoResult, SqliteIdeaRepository, StoredAssessment,
};
pub use service::review_service::{ReviewService, ReviewSession, ValidationError, WorkflowError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
