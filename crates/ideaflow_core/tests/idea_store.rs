use ideaflow_core::db::open_db_in_memory;
use ideaflow_core::{
    AssessmentDraft, Idea, IdeaRepository, IdeaStatus, RepoError, ScoreDimension, ScoreLevel,
    SqliteIdeaRepository,
};
use uuid::Uuid;

fn complete_record(assessed_by: &str) -> ideaflow_core::AssessmentRecord {
    let mut draft = AssessmentDraft::new();
    for dimension in ScoreDimension::ALL {
        draft.set_score(dimension, ScoreLevel::Medium);
    }
    draft.finalize(assessed_by).unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    let mut idea = Idea::new("Contract clause summarizer", "Noor");
    idea.description = "Summarize inbound contracts".to_string();
    idea.ai_capability_area = "NLP".to_string();
    let id = repo.create_idea(&idea).unwrap();

    let loaded = repo.get_idea(id).unwrap().unwrap();
    assert_eq!(loaded, idea);
}

#[test]
fn get_unknown_idea_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    assert_eq!(repo.get_idea(Uuid::new_v4()).unwrap(), None);
}

#[test]
fn query_by_status_filters_and_orders_by_intake_time() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    let mut older = Idea::new("Older idea", "Ravi");
    older.created_at = 1_000;
    let mut newer = Idea::new("Newer idea", "Ravi");
    newer.created_at = 2_000;
    let mut reviewing = Idea::new("Reviewing idea", "Mia");
    reviewing.created_at = 1_500;

    repo.create_idea(&newer).unwrap();
    repo.create_idea(&older).unwrap();
    repo.create_idea(&reviewing).unwrap();
    repo.update_status(reviewing.uuid, IdeaStatus::UnderReview)
        .unwrap();

    let submitted = repo.query_by_status(IdeaStatus::Submitted).unwrap();
    assert_eq!(
        submitted.iter().map(|idea| idea.uuid).collect::<Vec<_>>(),
        vec![older.uuid, newer.uuid]
    );

    let under_review = repo.query_by_status(IdeaStatus::UnderReview).unwrap();
    assert_eq!(under_review.len(), 1);
    assert_eq!(under_review[0].uuid, reviewing.uuid);
    assert_eq!(under_review[0].status, IdeaStatus::UnderReview);
}

#[test]
fn update_status_moves_submitted_to_under_review() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    let idea = Idea::new("Churn predictor", "Sam");
    repo.create_idea(&idea).unwrap();

    repo.update_status(idea.uuid, IdeaStatus::UnderReview)
        .unwrap();

    let loaded = repo.get_idea(idea.uuid).unwrap().unwrap();
    assert_eq!(loaded.status, IdeaStatus::UnderReview);
}

#[test]
fn update_status_same_status_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    let idea = Idea::new("Churn predictor", "Sam");
    repo.create_idea(&idea).unwrap();
    repo.update_status(idea.uuid, IdeaStatus::UnderReview)
        .unwrap();

    // A second reviewer landing the same transition must not error.
    repo.update_status(idea.uuid, IdeaStatus::UnderReview)
        .unwrap();

    let loaded = repo.get_idea(idea.uuid).unwrap().unwrap();
    assert_eq!(loaded.status, IdeaStatus::UnderReview);
}

#[test]
fn update_status_rejects_backward_transition() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    let idea = Idea::new("Churn predictor", "Sam");
    repo.create_idea(&idea).unwrap();
    repo.update_status(idea.uuid, IdeaStatus::UnderReview)
        .unwrap();

    let err = repo
        .update_status(idea.uuid, IdeaStatus::Submitted)
        .unwrap_err();
    match err {
        RepoError::InvalidTransition { from, to } => {
            assert_eq!(from, IdeaStatus::UnderReview);
            assert_eq!(to, IdeaStatus::Submitted);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn update_status_unknown_idea_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    let missing = Uuid::new_v4();
    let err = repo
        .update_status(missing, IdeaStatus::UnderReview)
        .unwrap_err();
    match err {
        RepoError::NotFound(id) => assert_eq!(id, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn submit_assessment_persists_record_and_flips_status_atomically() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    let idea = Idea::new("Support ticket router", "Lee");
    repo.create_idea(&idea).unwrap();
    repo.update_status(idea.uuid, IdeaStatus::UnderReview)
        .unwrap();

    let mut draft = AssessmentDraft::new();
    for dimension in ScoreDimension::ALL {
        draft.set_score(dimension, ScoreLevel::High);
    }
    draft.set_rationale(ScoreDimension::InternalReadiness, "team already trained");
    let record = draft.finalize("Assessment Team").unwrap();

    repo.submit_assessment(idea.uuid, &record).unwrap();

    let loaded = repo.get_idea(idea.uuid).unwrap().unwrap();
    assert_eq!(loaded.status, IdeaStatus::Assessed);

    let stored = repo.get_assessment(idea.uuid).unwrap().unwrap();
    assert_eq!(stored.assessed_by, "Assessment Team");
    assert!(stored.assessed_at > 0);
    assert_eq!(stored.scores.len(), 7);
    for dimension in ScoreDimension::ALL {
        assert_eq!(stored.scores[&dimension], ScoreLevel::High);
    }
    assert_eq!(
        stored.rationales[&ScoreDimension::InternalReadiness],
        "team already trained"
    );
    assert_eq!(stored.rationales.len(), 1);
}

#[test]
fn submit_assessment_requires_under_review_status() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    let idea = Idea::new("Support ticket router", "Lee");
    repo.create_idea(&idea).unwrap();

    let err = repo
        .submit_assessment(idea.uuid, &complete_record("Reviewer A"))
        .unwrap_err();
    match err {
        RepoError::InvalidTransition { from, to } => {
            assert_eq!(from, IdeaStatus::Submitted);
            assert_eq!(to, IdeaStatus::Assessed);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Nothing was persisted by the refused submit.
    assert_eq!(repo.get_assessment(idea.uuid).unwrap(), None);
    let loaded = repo.get_idea(idea.uuid).unwrap().unwrap();
    assert_eq!(loaded.status, IdeaStatus::Submitted);
}

#[test]
fn submit_assessment_twice_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    let idea = Idea::new("Support ticket router", "Lee");
    repo.create_idea(&idea).unwrap();
    repo.update_status(idea.uuid, IdeaStatus::UnderReview)
        .unwrap();

    repo.submit_assessment(idea.uuid, &complete_record("Reviewer A"))
        .unwrap();

    let err = repo
        .submit_assessment(idea.uuid, &complete_record("Reviewer B"))
        .unwrap_err();
    match err {
        RepoError::InvalidTransition { from, .. } => assert_eq!(from, IdeaStatus::Assessed),
        other => panic!("unexpected error: {other}"),
    }

    let stored = repo.get_assessment(idea.uuid).unwrap().unwrap();
    assert_eq!(stored.assessed_by, "Reviewer A");
}

#[test]
fn get_assessment_before_submit_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    let idea = Idea::new("Support ticket router", "Lee");
    repo.create_idea(&idea).unwrap();

    assert_eq!(repo.get_assessment(idea.uuid).unwrap(), None);
}

#[test]
fn corrupt_status_row_is_rejected_not_masked() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::new(&conn);

    conn.execute(
        "INSERT INTO ideas (uuid, status, title, created_at) VALUES (?1, 'parked', 'x', 1);",
        [Uuid::new_v4().to_string()],
    )
    .unwrap();

    // The corrupt row has a different status, so the filtered query is clean.
    let submitted = repo.query_by_status(IdeaStatus::Submitted).unwrap();
    assert!(submitted.is_empty());

    let uuid_text: String = conn
        .query_row("SELECT uuid FROM ideas WHERE status = 'parked';", [], |row| {
            row.get(0)
        })
        .unwrap();
    let id = Uuid::parse_str(&uuid_text).unwrap();

    let err = repo.update_status(id, IdeaStatus::UnderReview).unwrap_err();
    match err {
        RepoError::InvalidData(message) => assert!(message.contains("parked")),
        other => panic!("unexpected error: {other}"),
    }
}
