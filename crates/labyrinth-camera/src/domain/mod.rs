//! Camera domain: the coordinator, its commands and events.

pub mod aggregates;
pub mod commands;
pub mod events;
