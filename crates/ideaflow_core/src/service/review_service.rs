//! Review workflow service.
//!
//! # Responsibility
//! - Drive the idea lifecycle: pending queue, selection, cancellation and
//!   assessment submission.
//! - Own the session/draft contract exposed to presentation collaborators.
//!
//! # Invariants
//! - Local draft mutation is synchronous and always succeeds; the store call
//!   is the single suspend point of `select_idea` and `submit_assessment`.
//! - A failed store call leaves session and draft exactly as they were.
//! - Selecting an idea already `under_review` issues no store write.
//! - The store is never contacted for an incomplete draft.

use crate::model::draft::{AssessmentDraft, DraftError};
use crate::model::idea::{Idea, IdeaId, IdeaStatus};
use crate::model::scorecard::{ScoreDimension, ScoreLevel};
use crate::repo::idea_repo::{IdeaRepository, RepoError, RepoResult};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Locally-recoverable precondition failure: submission is refused before
/// any store contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No idea is currently selected in this session.
    NoIdeaSelected,
    /// The draft is missing scores, listed in canonical order.
    MissingScores(Vec<ScoreDimension>),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoIdeaSelected => write!(f, "no idea selected"),
            Self::MissingScores(missing) => {
                let names: Vec<&str> = missing.iter().map(|d| d.as_str()).collect();
                write!(f, "not all dimensions scored, missing: {}", names.join(", "))
            }
        }
    }
}

impl Error for ValidationError {}

impl From<DraftError> for ValidationError {
    fn from(value: DraftError) -> Self {
        match value {
            DraftError::MissingScores(missing) => Self::MissingScores(missing),
        }
    }
}

/// Workflow-level error for review operations.
#[derive(Debug)]
pub enum WorkflowError {
    /// Refused locally; the store was never contacted.
    Validation(ValidationError),
    /// The store's update/submit call failed; draft state is preserved so
    /// the reviewer may retry.
    Submission(RepoError),
    /// The workflow action itself succeeded durably; only the follow-up
    /// pending re-query failed. The caller should not retry the action,
    /// only re-query the pending list.
    RefreshFailed(RepoError),
}

impl Display for WorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Submission(err) => write!(f, "store operation failed: {err}"),
            Self::RefreshFailed(err) => write!(f, "pending list refresh failed: {err}"),
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Submission(err) => Some(err),
            Self::RefreshFailed(err) => Some(err),
        }
    }
}

impl From<ValidationError> for WorkflowError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// One reviewer's in-progress state: the selected idea and the draft.
///
/// The session is an explicit owned value passed `&mut` into every workflow
/// operation. Exclusive borrows make re-entry for the same session
/// unrepresentable, so a submit can never be dispatched twice for one draft
/// state.
#[derive(Debug, Default)]
pub struct ReviewSession {
    selected: Option<Idea>,
    draft: AssessmentDraft,
}

impl ReviewSession {
    /// Creates an empty session with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected idea, if any.
    pub fn selected(&self) -> Option<&Idea> {
        self.selected.as_ref()
    }

    /// Current draft (score/rationale maps and completeness flag).
    pub fn draft(&self) -> &AssessmentDraft {
        &self.draft
    }

    /// Inserts or overwrites one dimension score on the draft.
    ///
    /// Local mutation; always succeeds, no store contact.
    pub fn set_score(&mut self, dimension: ScoreDimension, level: ScoreLevel) {
        self.draft.set_score(dimension, level);
    }

    /// Inserts or overwrites one dimension rationale on the draft.
    pub fn set_rationale(&mut self, dimension: ScoreDimension, text: impl Into<String>) {
        self.draft.set_rationale(dimension, text);
    }

    fn install_selection(&mut self, idea: Idea) {
        self.selected = Some(idea);
        self.draft.reset();
    }

    fn clear(&mut self) {
        self.selected = None;
        self.draft.reset();
    }
}

/// Review workflow facade over a store implementation.
pub struct ReviewService<R: IdeaRepository> {
    repo: R,
}

impl<R: IdeaRepository> ReviewService<R> {
    /// Creates a service using the provided store implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Ideas awaiting review: `submitted` first, then `under_review`, each in
    /// store query order.
    pub fn list_pending(&self) -> RepoResult<Vec<Idea>> {
        let mut pending = self.repo.query_by_status(IdeaStatus::Submitted)?;
        pending.extend(self.repo.query_by_status(IdeaStatus::UnderReview)?);
        Ok(pending)
    }

    /// Selects an idea for review, discarding any prior draft.
    ///
    /// A `submitted` idea is moved to `under_review` with exactly one store
    /// write; re-selecting an idea already `under_review` writes nothing.
    /// Returns the refreshed pending list.
    ///
    /// # Errors
    /// - `WorkflowError::Submission` when the status update fails; the prior
    ///   selection and draft are untouched.
    /// - `WorkflowError::RefreshFailed` when the selection itself succeeded
    ///   (status updated, fresh draft installed) but the pending re-query
    ///   failed.
    pub fn select_idea(
        &self,
        session: &mut ReviewSession,
        idea: &Idea,
    ) -> Result<Vec<Idea>, WorkflowError> {
        if idea.status == IdeaStatus::Submitted {
            if let Err(err) = self.repo.update_status(idea.uuid, IdeaStatus::UnderReview) {
                error!(
                    "event=idea_select module=service status=error idea={} error={}",
                    idea.uuid, err
                );
                return Err(WorkflowError::Submission(err));
            }
        }

        let mut selected = idea.clone();
        if selected.status == IdeaStatus::Submitted {
            selected.status = IdeaStatus::UnderReview;
        }
        info!(
            "event=idea_select module=service status=ok idea={} from={}",
            selected.uuid,
            idea.status.as_str()
        );
        session.install_selection(selected);

        self.refresh_pending()
    }

    /// Clears the selection and draft without any store write.
    ///
    /// The abandoned idea stays `under_review`; there is no automatic revert
    /// to `submitted`.
    pub fn cancel_selection(&self, session: &mut ReviewSession) {
        if let Some(idea) = session.selected() {
            info!(
                "event=review_cancel module=service status=ok idea={}",
                idea.uuid
            );
        }
        session.clear();
    }

    /// Submits the completed draft as one atomic store operation.
    ///
    /// On success the idea is durably `assessed`, the session is cleared and
    /// the refreshed pending list is returned. On store failure the draft and
    /// selection are preserved so the reviewer can retry.
    ///
    /// # Errors
    /// - `WorkflowError::Validation` when nothing is selected or the draft is
    ///   incomplete; the store is not contacted.
    /// - `WorkflowError::Submission` when the submit call fails; draft and
    ///   selection are intact for a retry.
    /// - `WorkflowError::RefreshFailed` when the record was persisted and the
    ///   session cleared, but the pending re-query failed. The submit must
    ///   not be retried.
    pub fn submit_assessment(
        &self,
        session: &mut ReviewSession,
        attribution: &str,
    ) -> Result<Vec<Idea>, WorkflowError> {
        let idea_id = match session.selected() {
            Some(idea) => idea.uuid,
            None => {
                warn!("event=assessment_submit module=service status=refused reason=no_selection");
                return Err(ValidationError::NoIdeaSelected.into());
            }
        };

        let record = match session.draft().finalize(attribution) {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    "event=assessment_submit module=service status=refused idea={idea_id} reason=incomplete_draft error={err}"
                );
                return Err(WorkflowError::Validation(err.into()));
            }
        };

        match self.repo.submit_assessment(idea_id, &record) {
            Ok(()) => {
                let aggregates = record.axis_scores();
                info!(
                    "event=assessment_submit module=service status=ok idea={idea_id} value={:.2} feasibility={:.2}",
                    aggregates.value, aggregates.feasibility
                );
                session.clear();
                self.refresh_pending()
            }
            Err(err) => {
                error!(
                    "event=assessment_submit module=service status=error idea={idea_id} error={err}"
                );
                Err(WorkflowError::Submission(err))
            }
        }
    }

    // The durable action has already succeeded when this runs; a failure here
    // must not look like a failed submit/select, so it maps to RefreshFailed.
    fn refresh_pending(&self) -> Result<Vec<Idea>, WorkflowError> {
        self.list_pending().map_err(|err| {
            warn!("event=pending_refresh module=service status=error error={err}");
            WorkflowError::RefreshFailed(err)
        })
    }

    /// Records a new idea at intake; it enters the pipeline as `submitted`.
    pub fn register_idea(&self, idea: &Idea) -> RepoResult<IdeaId> {
        let id = self.repo.create_idea(idea)?;
        info!("event=idea_register module=service status=ok idea={id}");
        Ok(id)
    }
}
