//! The Camera Transition Coordinator.

use labyrinth_core::clock::Clock;
use labyrinth_core::geometry::{Pose, ease_in_out_cubic};
use labyrinth_core::source::{EventSource, Outbox};
use labyrinth_core::ticket::Ticket;
use uuid::Uuid;

use super::events::{ArrivalOutcome, CameraArrived, CameraEvent, CameraEventKind, TransitionStarted};

/// Where an in-flight transition is heading.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Destination {
    Viewpoint(Pose),
    /// Tracks the player pose while moving; falls back to the last known
    /// pose when the world stops reporting one.
    Player(Pose),
}

impl Destination {
    fn pose(self) -> Pose {
        match self {
            Self::Viewpoint(pose) | Self::Player(pose) => pose,
        }
    }
}

#[derive(Debug)]
struct Transition {
    from: Pose,
    destination: Destination,
    elapsed: f32,
    duration: f32,
    ticket: Option<Ticket>,
    correlation_id: Uuid,
}

/// Coordinates camera transitions and look-control gating.
///
/// While attached, the camera follows the player and look control is
/// enabled. A scripted transition detaches the camera and disables look
/// control until a transition back to the player completes.
#[derive(Debug)]
pub struct CameraCoordinator {
    pose: Pose,
    attached: bool,
    look_enabled: bool,
    transition: Option<Transition>,
    outbox: Outbox<CameraEventKind>,
}

impl CameraCoordinator {
    /// Creates a coordinator attached to the player at `pose`.
    #[must_use]
    pub fn new(id: Uuid, pose: Pose) -> Self {
        Self {
            pose,
            attached: true,
            look_enabled: true,
            transition: None,
            outbox: Outbox::new(id),
        }
    }

    /// Starts a transition to `target`.
    ///
    /// A missing target completes `ticket` immediately with
    /// [`ArrivalOutcome::Skipped`]. An in-flight transition is interrupted.
    pub fn transition_to(&mut self, target: Option<Pose>, duration: f32, ticket: Option<Ticket>, clock: &dyn Clock) {
        let correlation_id = correlation_of(ticket.as_ref());
        let Some(target) = target else {
            self.arrive(ticket, ArrivalOutcome::Skipped, correlation_id, clock);
            return;
        };
        self.interrupt(clock);
        self.attached = false;
        self.look_enabled = false;
        self.begin(Destination::Viewpoint(target), duration, ticket, correlation_id, clock);
    }

    /// Starts a transition back to the player.
    ///
    /// Completes immediately, restoring control, when the player pose is
    /// unknown or the camera is already attached.
    pub fn transition_to_player(
        &mut self,
        player_pose: Option<Pose>,
        duration: f32,
        ticket: Option<Ticket>,
        clock: &dyn Clock,
    ) {
        let correlation_id = correlation_of(ticket.as_ref());
        let player_pose = match player_pose {
            Some(pose) if !self.attached || self.transition.is_some() => pose,
            _ => {
                self.interrupt(clock);
                if let Some(pose) = player_pose {
                    self.pose = pose;
                }
                self.arrive(ticket, ArrivalOutcome::Skipped, correlation_id, clock);
                self.restore_control(clock);
                return;
            }
        };
        self.interrupt(clock);
        self.begin(Destination::Player(player_pose), duration, ticket, correlation_id, clock);
    }

    /// Advances the in-flight transition by `dt` seconds, or follows the
    /// player while attached.
    pub fn update(&mut self, dt: f32, player_pose: Option<Pose>, clock: &dyn Clock) {
        let Some(transition) = self.transition.as_mut() else {
            if self.attached {
                if let Some(pose) = player_pose {
                    self.pose = pose;
                }
            }
            return;
        };

        if let (Destination::Player(last), Some(pose)) = (&mut transition.destination, player_pose) {
            *last = pose;
        }
        let target = transition.destination.pose();
        transition.elapsed += dt.max(0.0);
        if transition.elapsed < transition.duration {
            let t = ease_in_out_cubic(transition.elapsed / transition.duration);
            self.pose = transition.from.lerp(target, t);
            return;
        }
        self.pose = target;
        self.complete(clock);
    }

    /// Current camera pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Whether the camera follows the player.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether the player may look around.
    #[must_use]
    pub fn look_enabled(&self) -> bool {
        self.look_enabled
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    fn begin(
        &mut self,
        destination: Destination,
        duration: f32,
        ticket: Option<Ticket>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let to = match destination {
            Destination::Viewpoint(pose) => Some(pose),
            Destination::Player(_) => None,
        };
        self.outbox.record(
            CameraEventKind::TransitionStarted(TransitionStarted {
                from: self.pose,
                to,
                duration: duration.max(0.0),
            }),
            correlation_id,
            clock,
        );
        self.transition = Some(Transition {
            from: self.pose,
            destination,
            elapsed: 0.0,
            duration,
            ticket,
            correlation_id,
        });
        if duration <= 0.0 {
            self.pose = destination.pose();
            self.complete(clock);
        }
    }

    fn complete(&mut self, clock: &dyn Clock) {
        let Some(transition) = self.transition.take() else {
            return;
        };
        self.arrive(transition.ticket, ArrivalOutcome::Arrived, transition.correlation_id, clock);
        if matches!(transition.destination, Destination::Player(_)) {
            self.restore_control(clock);
        }
    }

    fn interrupt(&mut self, clock: &dyn Clock) {
        if let Some(transition) = self.transition.take() {
            self.arrive(
                transition.ticket,
                ArrivalOutcome::Interrupted,
                transition.correlation_id,
                clock,
            );
        }
    }

    fn arrive(&mut self, ticket: Option<Ticket>, outcome: ArrivalOutcome, correlation_id: Uuid, clock: &dyn Clock) {
        self.outbox.record(
            CameraEventKind::Arrived(CameraArrived { ticket, outcome }),
            correlation_id,
            clock,
        );
    }

    fn restore_control(&mut self, clock: &dyn Clock) {
        if self.attached && self.look_enabled {
            return;
        }
        self.attached = true;
        self.look_enabled = true;
        self.outbox
            .record(CameraEventKind::ControlRestored, Uuid::nil(), clock);
    }
}

fn correlation_of(ticket: Option<&Ticket>) -> Uuid {
    ticket.map_or(Uuid::nil(), |t| t.correlation_id)
}

impl EventSource for CameraCoordinator {
    type Event = CameraEvent;

    fn source_id(&self) -> Uuid {
        self.outbox.source_id()
    }

    fn pending_events(&self) -> &[Self::Event] {
        self.outbox.pending()
    }

    fn take_pending_events(&mut self) -> Vec<Self::Event> {
        self.outbox.take()
    }
}

#[cfg(test)]
mod tests {
    use labyrinth_core::event::DomainEvent;
    use labyrinth_core::geometry::Vec3;
    use labyrinth_core::ticket::{Owner, TicketIssuer};
    use labyrinth_test_support::{correlation, fixed_clock};

    use super::*;

    fn viewpoint() -> Pose {
        Pose::new(Vec3::new(10.0, 2.0, 0.0), 90.0, -10.0)
    }

    fn player() -> Pose {
        Pose::new(Vec3::new(0.0, 1.7, 0.0), 0.0, 0.0)
    }

    fn arrivals(camera: &mut CameraCoordinator) -> Vec<CameraArrived> {
        camera
            .take_pending_events()
            .into_iter()
            .filter_map(|event| match event.kind {
                CameraEventKind::Arrived(arrived) => Some(arrived),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_transition_detaches_and_disables_look() {
        // Arrange
        let clock = fixed_clock();
        let mut camera = CameraCoordinator::new(Uuid::new_v4(), player());

        // Act
        camera.transition_to(Some(viewpoint()), 1.0, None, &clock);

        // Assert
        assert!(!camera.is_attached());
        assert!(!camera.look_enabled());
        assert!(camera.is_transitioning());
        assert_eq!(camera.pending_events()[0].event_type(), "camera.transition_started");
    }

    #[test]
    fn test_transition_eases_and_arrives_once() {
        // Arrange
        let clock = fixed_clock();
        let mut camera = CameraCoordinator::new(Uuid::new_v4(), player());
        let ticket = TicketIssuer::default().issue(Owner::Trigger("rock-1".into()), correlation());
        camera.transition_to(Some(viewpoint()), 1.0, Some(ticket.clone()), &clock);

        // Act
        camera.update(0.5, Some(player()), &clock);
        let midway = camera.pose();
        camera.update(0.6, Some(player()), &clock);
        camera.update(0.6, Some(player()), &clock);

        // Assert
        assert!((midway.position.x - 5.0).abs() < 1e-4);
        assert_eq!(camera.pose(), viewpoint());
        let done = arrivals(&mut camera);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].outcome, ArrivalOutcome::Arrived);
        assert_eq!(done[0].ticket, Some(ticket));
        assert!(!camera.look_enabled());
    }

    #[test]
    fn test_missing_target_arrives_synchronously() {
        let clock = fixed_clock();
        let mut camera = CameraCoordinator::new(Uuid::new_v4(), player());

        camera.transition_to(None, 1.0, None, &clock);

        assert!(camera.is_attached());
        let done = arrivals(&mut camera);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].outcome, ArrivalOutcome::Skipped);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let clock = fixed_clock();
        let mut camera = CameraCoordinator::new(Uuid::new_v4(), player());

        camera.transition_to(Some(viewpoint()), 0.0, None, &clock);

        assert_eq!(camera.pose(), viewpoint());
        assert!(!camera.is_transitioning());
        assert_eq!(arrivals(&mut camera)[0].outcome, ArrivalOutcome::Arrived);
    }

    #[test]
    fn test_new_transition_interrupts_in_flight_one() {
        // Arrange
        let clock = fixed_clock();
        let mut camera = CameraCoordinator::new(Uuid::new_v4(), player());
        let mut issuer = TicketIssuer::default();
        let first = issuer.issue(Owner::Trigger("a".into()), correlation());
        let second = issuer.issue(Owner::Trigger("b".into()), correlation());
        camera.transition_to(Some(viewpoint()), 1.0, Some(first.clone()), &clock);
        camera.update(0.3, Some(player()), &clock);

        // Act
        camera.transition_to(Some(player()), 1.0, Some(second), &clock);

        // Assert
        let done = arrivals(&mut camera);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].ticket, Some(first));
        assert_eq!(done[0].outcome, ArrivalOutcome::Interrupted);
        assert!(camera.is_transitioning());
    }

    #[test]
    fn test_return_to_player_restores_control() {
        // Arrange
        let clock = fixed_clock();
        let mut camera = CameraCoordinator::new(Uuid::new_v4(), player());
        camera.transition_to(Some(viewpoint()), 0.0, None, &clock);
        camera.take_pending_events();

        // Act
        camera.transition_to_player(Some(player()), 0.5, None, &clock);
        camera.update(0.25, Some(player()), &clock);
        let look_mid_return = camera.look_enabled();
        camera.update(0.25, Some(player()), &clock);

        // Assert
        assert!(!look_mid_return);
        assert!(camera.is_attached());
        assert!(camera.look_enabled());
        let types: Vec<_> = camera.pending_events().iter().map(DomainEvent::event_type).collect();
        assert_eq!(
            types,
            vec!["camera.transition_started", "camera.arrived", "camera.control_restored"]
        );
    }

    #[test]
    fn test_return_tracks_moving_player() {
        let clock = fixed_clock();
        let mut camera = CameraCoordinator::new(Uuid::new_v4(), player());
        camera.transition_to(Some(viewpoint()), 0.0, None, &clock);
        camera.transition_to_player(Some(player()), 1.0, None, &clock);
        let moved = Pose::new(Vec3::new(-4.0, 1.7, 2.0), 45.0, 0.0);

        camera.update(1.0, Some(moved), &clock);

        assert_eq!(camera.pose(), moved);
    }

    #[test]
    fn test_return_when_attached_completes_immediately() {
        let clock = fixed_clock();
        let mut camera = CameraCoordinator::new(Uuid::new_v4(), player());

        camera.transition_to_player(Some(player()), 1.0, None, &clock);

        assert!(!camera.is_transitioning());
        let done = arrivals(&mut camera);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].outcome, ArrivalOutcome::Skipped);
    }

    #[test]
    fn test_return_without_player_pose_restores_control_in_place() {
        let clock = fixed_clock();
        let mut camera = CameraCoordinator::new(Uuid::new_v4(), player());
        camera.transition_to(Some(viewpoint()), 0.0, None, &clock);

        camera.transition_to_player(None, 1.0, None, &clock);

        assert!(camera.is_attached());
        assert!(camera.look_enabled());
        assert_eq!(camera.pose(), viewpoint());
    }

    #[test]
    fn test_attached_camera_follows_player() {
        let clock = fixed_clock();
        let mut camera = CameraCoordinator::new(Uuid::new_v4(), Pose::default());

        camera.update(0.1, Some(player()), &clock);

        assert_eq!(camera.pose(), player());
    }
}
