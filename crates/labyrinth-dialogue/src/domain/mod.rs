//! Dialogue domain: the sequencer, its commands and events.

pub mod aggregates;
pub mod commands;
pub mod events;
