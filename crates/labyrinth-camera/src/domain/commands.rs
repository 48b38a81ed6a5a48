//! Commands for the Camera context.

use labyrinth_core::command::Command;
use labyrinth_core::geometry::Pose;
use labyrinth_core::ticket::Ticket;
use uuid::Uuid;

/// Command to move the camera to a scripted viewpoint.
#[derive(Debug, Clone)]
pub struct MoveCamera {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Target viewpoint; `None` completes immediately.
    pub target: Option<Pose>,
    /// Transition length in seconds.
    pub duration: f32,
    /// Continuation to complete on arrival.
    pub ticket: Option<Ticket>,
}

impl Command for MoveCamera {
    fn command_type(&self) -> &'static str {
        "camera.move"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to bring the camera back to the player.
#[derive(Debug, Clone)]
pub struct ReturnCamera {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Transition length in seconds.
    pub duration: f32,
    /// Continuation to complete on arrival.
    pub ticket: Option<Ticket>,
}

impl Command for ReturnCamera {
    fn command_type(&self) -> &'static str {
        "camera.return"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
