//! Domain model for the idea review pipeline.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the scorecard vocabulary (dimensions, levels, axes) in one place.
//!
//! # Invariants
//! - Every idea is identified by a stable `IdeaId`.
//! - Idea status only moves forward along the review path.
//! - An assessment record always carries all seven dimension scores.

pub mod draft;
pub mod idea;
pub mod scorecard;
