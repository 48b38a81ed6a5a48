//! Trigger domain: choreography state machines, directives and events.

pub mod aggregates;
pub mod commands;
pub mod directives;
pub mod events;
pub mod registry;
