//! Idea repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the store operations consumed by the review workflow:
//!   intake, status queries, status updates and assessment submission.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `update_status` enforces the forward-only lifecycle; a repeated write of
//!   the current status is accepted as a no-op.
//! - `submit_assessment` persists scores, rationales, attribution, the
//!   store-assigned `assessed_at` and the `assessed` status flip atomically.
//! - Read paths reject unparseable status/dimension/level strings with
//!   `RepoError::InvalidData`.

use crate::db::DbError;
use crate::model::draft::AssessmentRecord;
use crate::model::idea::{Idea, IdeaId, IdeaStatus};
use crate::model::scorecard::{ScoreDimension, ScoreLevel};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const IDEA_SELECT_SQL: &str = "SELECT
    uuid,
    status,
    title,
    description,
    expected_benefits,
    ai_capability_area,
    business_function,
    submitter_name,
    created_at
FROM ideas";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for idea persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(IdeaId),
    /// A status write that would move an idea backward or skip a step.
    InvalidTransition {
        from: IdeaStatus,
        to: IdeaStatus,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "idea not found: {id}"),
            Self::InvalidTransition { from, to } => write!(
                f,
                "illegal status transition {} -> {}",
                from.as_str(),
                to.as_str()
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted idea data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidTransition { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// A persisted assessment read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAssessment {
    pub idea_uuid: IdeaId,
    pub assessed_by: String,
    /// Unix epoch milliseconds, assigned by the store at submit time.
    pub assessed_at: i64,
    pub scores: BTreeMap<ScoreDimension, ScoreLevel>,
    pub rationales: BTreeMap<ScoreDimension, String>,
}

/// Store contract consumed by the review workflow.
pub trait IdeaRepository {
    fn create_idea(&self, idea: &Idea) -> RepoResult<IdeaId>;
    fn get_idea(&self, id: IdeaId) -> RepoResult<Option<Idea>>;
    fn query_by_status(&self, status: IdeaStatus) -> RepoResult<Vec<Idea>>;
    fn update_status(&self, id: IdeaId, new_status: IdeaStatus) -> RepoResult<()>;
    fn submit_assessment(&self, id: IdeaId, record: &AssessmentRecord) -> RepoResult<()>;
    fn get_assessment(&self, id: IdeaId) -> RepoResult<Option<StoredAssessment>>;
}

/// SQLite-backed idea repository.
pub struct SqliteIdeaRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteIdeaRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn current_status(&self, id: IdeaId) -> RepoResult<IdeaStatus> {
        let status_text: Option<String> = self
            .conn
            .query_row(
                "SELECT status FROM ideas WHERE uuid = ?1;",
                [id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        let status_text = status_text.ok_or(RepoError::NotFound(id))?;
        IdeaStatus::parse(&status_text).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid status `{status_text}` in ideas.status"))
        })
    }
}

impl IdeaRepository for SqliteIdeaRepository<'_> {
    fn create_idea(&self, idea: &Idea) -> RepoResult<IdeaId> {
        self.conn.execute(
            "INSERT INTO ideas (
                uuid,
                status,
                title,
                description,
                expected_benefits,
                ai_capability_area,
                business_function,
                submitter_name,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                idea.uuid.to_string(),
                idea.status.as_str(),
                idea.title.as_str(),
                idea.description.as_str(),
                idea.expected_benefits.as_str(),
                idea.ai_capability_area.as_str(),
                idea.business_function.as_str(),
                idea.submitter_name.as_str(),
                idea.created_at,
            ],
        )?;

        Ok(idea.uuid)
    }

    fn get_idea(&self, id: IdeaId) -> RepoResult<Option<Idea>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{IDEA_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_idea_row(row)?));
        }

        Ok(None)
    }

    fn query_by_status(&self, status: IdeaStatus) -> RepoResult<Vec<Idea>> {
        let mut stmt = self.conn.prepare(&format!(
            "{IDEA_SELECT_SQL}
             WHERE status = ?1
             ORDER BY created_at ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([status.as_str()])?;
        let mut ideas = Vec::new();

        while let Some(row) = rows.next()? {
            ideas.push(parse_idea_row(row)?);
        }

        Ok(ideas)
    }

    fn update_status(&self, id: IdeaId, new_status: IdeaStatus) -> RepoResult<()> {
        let current = self.current_status(id)?;
        if current == new_status {
            // Tolerates the two-reviewers race on `submitted -> under_review`.
            return Ok(());
        }
        if !current.can_transition_to(new_status) {
            return Err(RepoError::InvalidTransition {
                from: current,
                to: new_status,
            });
        }

        let changed = self.conn.execute(
            "UPDATE ideas
             SET
                status = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2
               AND status = ?3;",
            params![new_status.as_str(), id.to_string(), current.as_str()],
        )?;

        if changed == 0 {
            // Lost a race against another writer; re-read and degrade to a
            // no-op when the other writer landed the same status.
            let now = self.current_status(id)?;
            if now == new_status {
                return Ok(());
            }
            return Err(RepoError::InvalidTransition {
                from: now,
                to: new_status,
            });
        }

        Ok(())
    }

    fn submit_assessment(&self, id: IdeaId, record: &AssessmentRecord) -> RepoResult<()> {
        let current = self.current_status(id)?;
        if current != IdeaStatus::UnderReview {
            return Err(RepoError::InvalidTransition {
                from: current,
                to: IdeaStatus::Assessed,
            });
        }

        // The repository borrows a shared connection, so the savepoint-style
        // transaction is used instead of `Connection::transaction`.
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO assessments (idea_uuid, assessed_by, assessed_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000));",
            params![id.to_string(), record.assessed_by()],
        )?;

        for (dimension, level) in record.scores() {
            tx.execute(
                "INSERT INTO assessment_scores (idea_uuid, dimension, level, rationale)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    id.to_string(),
                    dimension.as_str(),
                    level.as_str(),
                    record.rationales().get(dimension).map(String::as_str),
                ],
            )?;
        }

        tx.execute(
            "UPDATE ideas
             SET
                status = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![IdeaStatus::Assessed.as_str(), id.to_string()],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn get_assessment(&self, id: IdeaId) -> RepoResult<Option<StoredAssessment>> {
        let header: Option<(String, i64)> = self
            .conn
            .query_row(
                "SELECT assessed_by, assessed_at FROM assessments WHERE idea_uuid = ?1;",
                [id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((assessed_by, assessed_at)) = header else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT dimension, level, rationale
             FROM assessment_scores
             WHERE idea_uuid = ?1
             ORDER BY dimension ASC;",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        let mut scores = BTreeMap::new();
        let mut rationales = BTreeMap::new();

        while let Some(row) = rows.next()? {
            let dimension_text: String = row.get("dimension")?;
            let dimension = ScoreDimension::parse(&dimension_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid dimension `{dimension_text}` in assessment_scores.dimension"
                ))
            })?;

            let level_text: String = row.get("level")?;
            let level = ScoreLevel::parse(&level_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid level `{level_text}` in assessment_scores.level"
                ))
            })?;

            scores.insert(dimension, level);
            if let Some(text) = row.get::<_, Option<String>>("rationale")? {
                rationales.insert(dimension, text);
            }
        }

        if scores.len() != ScoreDimension::ALL.len() {
            return Err(RepoError::InvalidData(format!(
                "assessment for {id} has {} of {} dimension scores",
                scores.len(),
                ScoreDimension::ALL.len()
            )));
        }

        Ok(Some(StoredAssessment {
            idea_uuid: id,
            assessed_by,
            assessed_at,
            scores,
            rationales,
        }))
    }
}

fn parse_idea_row(row: &Row<'_>) -> RepoResult<Idea> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in ideas.uuid"))
    })?;

    let status_text: String = row.get("status")?;
    let status = IdeaStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in ideas.status"))
    })?;

    Ok(Idea {
        uuid,
        status,
        title: row.get("title")?,
        description: row.get("description")?,
        expected_benefits: row.get("expected_benefits")?,
        ai_capability_area: row.get("ai_capability_area")?,
        business_function: row.get("business_function")?,
        submitter_name: row.get("submitter_name")?,
        created_at: row.get("created_at")?,
    })
}
