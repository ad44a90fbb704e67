//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable that walks the review workflow end to end
//!   against an in-memory store.
//! - Keep output deterministic for quick local sanity checks.

use ideaflow_core::{
    axis_scores, db::open_db_in_memory, Idea, IdeaRepository, ReviewService, ReviewSession,
    ScoreDimension, ScoreLevel, SqliteIdeaRepository,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("ideaflow walkthrough failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("ideaflow_core version={}", ideaflow_core::core_version());

    let conn = open_db_in_memory()?;
    let service = ReviewService::new(SqliteIdeaRepository::new(&conn));
    let mut session = ReviewSession::new();

    let mut idea = Idea::new("Invoice triage copilot", "Dana");
    idea.business_function = "Finance".to_string();
    service.register_idea(&idea)?;

    let pending = service.list_pending()?;
    println!("pending={}", pending.len());

    let pending = service.select_idea(&mut session, &idea)?;
    println!(
        "selected={} status=under_review pending={}",
        idea.title,
        pending.len()
    );

    for dimension in ScoreDimension::ALL {
        session.set_score(dimension, ScoreLevel::Medium);
    }
    session.set_score(ScoreDimension::BusinessGrowth, ScoreLevel::High);
    session.set_rationale(ScoreDimension::BusinessGrowth, "new revenue stream");

    let pending = service.submit_assessment(&mut session, "Assessment Team")?;
    println!("submitted=ok pending={}", pending.len());

    let repo = SqliteIdeaRepository::new(&conn);
    if let Some(stored) = repo.get_assessment(idea.uuid)? {
        let aggregates = axis_scores(&stored.scores)
            .ok_or("stored assessment is missing dimension scores")?;
        println!(
            "assessed_by={} value={:.2} feasibility={:.2}",
            stored.assessed_by, aggregates.value, aggregates.feasibility
        );
    }

    Ok(())
}
