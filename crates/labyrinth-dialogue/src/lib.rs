//! Labyrinth — Dialogue Sequencer.
//!
//! Plays ordered text messages one at a time with a typewriter reveal,
//! waits for the player to continue after each, and reports completion of a
//! sequence exactly once.

pub mod application;
pub mod domain;
