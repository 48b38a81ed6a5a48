//! Query handlers for the Camera context.

use labyrinth_core::geometry::Pose;
use serde::Serialize;

use crate::domain::aggregates::CameraCoordinator;

/// Read-only view of the camera.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraView {
    /// Current pose.
    pub pose: Pose,
    /// Whether the camera follows the player.
    pub attached: bool,
    /// Whether look control is enabled.
    pub look_enabled: bool,
    /// Whether a transition is in flight.
    pub transitioning: bool,
}

/// Returns the current camera state.
#[must_use]
pub fn get_camera_view(camera: &CameraCoordinator) -> CameraView {
    CameraView {
        pose: camera.pose(),
        attached: camera.is_attached(),
        look_enabled: camera.look_enabled(),
        transitioning: camera.is_transitioning(),
    }
}
