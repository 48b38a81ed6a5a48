//! Labyrinth — Question Arbiter.
//!
//! Owns the single active question session: validates answers, applies
//! wrong-answer damage through the life pool, plays the presentation
//! variant for the question kind, and resolves every accepted question
//! exactly once.

pub mod application;
pub mod domain;
