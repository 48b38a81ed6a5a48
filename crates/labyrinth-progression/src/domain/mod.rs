//! Progression domain: the controller, its commands and events.

pub mod aggregates;
pub mod commands;
pub mod events;
