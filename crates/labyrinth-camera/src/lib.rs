//! Labyrinth — Camera Transition Coordinator.
//!
//! Moves the camera between the player's viewpoint and scripted
//! viewpoints with eased transitions, and gates look control while the
//! camera is away from the player.

pub mod application;
pub mod domain;
