//! Labyrinth Core — shared orchestration abstractions.
//!
//! This crate defines the types every orchestration service depends on:
//! the game mode authority, continuation tickets, the event envelope and
//! outbox, the life pool, and the ports through which the orchestrator talks
//! to the world, audio and event-sink collaborators. It contains no
//! infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod geometry;
pub mod life;
pub mod mode;
pub mod ports;
pub mod sink;
pub mod source;
pub mod ticket;
pub mod timer;
