//! Idea store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the store contract consumed by the review workflow.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Status writes enforce the forward-only lifecycle before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Assessment submission persists the record and the status flip as one
//!   transaction.

pub mod idea_repo;
