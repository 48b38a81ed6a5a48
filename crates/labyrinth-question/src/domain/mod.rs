//! Question domain: the arbiter, its commands and events.

pub mod aggregates;
pub mod commands;
pub mod events;
