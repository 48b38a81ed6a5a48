//! Command handlers for the Camera context.

use labyrinth_core::clock::Clock;
use labyrinth_core::geometry::Pose;
use tracing::{debug, instrument};

use crate::domain::aggregates::CameraCoordinator;
use crate::domain::commands::{MoveCamera, ReturnCamera};

/// Handles the `MoveCamera` command.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, duration = command.duration))]
pub fn handle_move_camera(command: MoveCamera, camera: &mut CameraCoordinator, clock: &dyn Clock) {
    if command.target.is_none() {
        debug!("no viewpoint configured; camera stays put");
    }
    camera.transition_to(command.target, command.duration, command.ticket, clock);
}

/// Handles the `ReturnCamera` command.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, duration = command.duration))]
pub fn handle_return_camera(
    command: ReturnCamera,
    camera: &mut CameraCoordinator,
    player_pose: Option<Pose>,
    clock: &dyn Clock,
) {
    camera.transition_to_player(player_pose, command.duration, command.ticket, clock);
}

#[cfg(test)]
mod tests {
    use labyrinth_core::geometry::Vec3;
    use labyrinth_test_support::{correlation, fixed_clock};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_move_then_return_round_trip_restores_look() {
        // Arrange
        let clock = fixed_clock();
        let home = Pose::new(Vec3::new(0.0, 1.7, 0.0), 0.0, 0.0);
        let mut camera = CameraCoordinator::new(Uuid::new_v4(), home);
        let correlation_id = correlation();

        // Act
        handle_move_camera(
            MoveCamera {
                correlation_id,
                target: Some(Pose::new(Vec3::new(3.0, 2.0, 3.0), 180.0, 0.0)),
                duration: 0.0,
                ticket: None,
            },
            &mut camera,
            &clock,
        );
        let look_while_away = camera.look_enabled();
        handle_return_camera(
            ReturnCamera {
                correlation_id,
                duration: 0.0,
                ticket: None,
            },
            &mut camera,
            Some(home),
            &clock,
        );

        // Assert
        assert!(!look_while_away);
        assert!(camera.look_enabled());
        assert_eq!(camera.pose(), home);
    }
}
