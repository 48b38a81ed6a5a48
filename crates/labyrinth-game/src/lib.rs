//! Labyrinth — Game-flow composition root.
//!
//! Owns every orchestration service, routes player input, executes the
//! directives trigger choreographies return, pumps ticket completions back
//! to their owners and publishes every recorded event.

pub mod adapters;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod input;
