//! Labyrinth — Trigger Choreographer.
//!
//! Every interactive object (chest, obstacle, gate, junction) runs the same
//! staged choreography: lock controls, move the camera in, talk, ask,
//! move the camera out, talk again, change the world, release. Triggers are
//! pure state machines; each step returns the directives the composition
//! root executes, and long-running steps wait on a ticket.

pub mod application;
pub mod domain;
