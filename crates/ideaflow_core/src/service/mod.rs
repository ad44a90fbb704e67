//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into review workflow operations.
//! - Keep UI/transport layers decoupled from storage details.

pub mod review_service;
