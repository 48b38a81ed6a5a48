//! Labyrinth — Progression Controller.
//!
//! Tracks the chapter index, the shared life pool and the collected books,
//! runs the delayed chapter-completion check and decides between the next
//! chapter, victory and game over.

pub mod application;
pub mod domain;
