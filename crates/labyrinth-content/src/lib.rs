//! Labyrinth — Campaign content.
//!
//! Read-only reference data the orchestrator consumes: questions, chapters,
//! books, interactive object definitions and tuning settings, plus the YAML
//! loader that validates them.

pub mod application;
pub mod domain;
