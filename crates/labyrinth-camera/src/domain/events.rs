//! Domain events for the Camera context.

use labyrinth_core::event::{Envelope, EventKind};
use labyrinth_core::geometry::Pose;
use labyrinth_core::ticket::Ticket;
use serde::Serialize;

/// Event type emitted when a transition begins.
pub const TRANSITION_STARTED_EVENT_TYPE: &str = "camera.transition_started";
/// Event type emitted when a transition ends for any reason.
pub const CAMERA_ARRIVED_EVENT_TYPE: &str = "camera.arrived";
/// Event type emitted when the camera is back on the player.
pub const CONTROL_RESTORED_EVENT_TYPE: &str = "camera.control_restored";

/// How a transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalOutcome {
    /// The camera reached its target.
    Arrived,
    /// There was nothing to move to; completed synchronously.
    Skipped,
    /// A newer transition took over.
    Interrupted,
}

/// Emitted when a transition begins.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionStarted {
    /// Where the camera starts.
    pub from: Pose,
    /// Scripted target; `None` when heading back to the player.
    pub to: Option<Pose>,
    /// Transition length in seconds.
    pub duration: f32,
}

/// Emitted exactly once per accepted transition request.
#[derive(Debug, Clone, Serialize)]
pub struct CameraArrived {
    /// Ticket handed to the request.
    pub ticket: Option<Ticket>,
    /// How the transition ended.
    pub outcome: ArrivalOutcome,
}

/// Event payload variants for the Camera context.
#[derive(Debug, Clone, Serialize)]
pub enum CameraEventKind {
    /// A transition began.
    TransitionStarted(TransitionStarted),
    /// A transition ended.
    Arrived(CameraArrived),
    /// Look control is back with the player.
    ControlRestored,
}

impl EventKind for CameraEventKind {
    fn event_type(&self) -> &'static str {
        match self {
            Self::TransitionStarted(_) => TRANSITION_STARTED_EVENT_TYPE,
            Self::Arrived(_) => CAMERA_ARRIVED_EVENT_TYPE,
            Self::ControlRestored => CONTROL_RESTORED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Camera context.
pub type CameraEvent = Envelope<CameraEventKind>;
