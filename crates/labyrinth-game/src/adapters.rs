//! Port adapters for the headless driver. Nothing is rendered or played;
//! every call becomes a log line.

use labyrinth_core::geometry::Pose;
use labyrinth_core::mode::GameMode;
use labyrinth_core::ports::{AudioCue, AudioLayer, Capabilities, WorldLayer};
use labyrinth_core::sink::{EventSink, PublishedEvent};
use labyrinth_core::ticket::TriggerId;
use tracing::{debug, info, trace};

/// Publishes every event as a structured log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&mut self, event: &PublishedEvent) {
        info!(
            event_type = %event.event_type,
            source_id = %event.source_id,
            sequence_number = event.sequence_number,
            correlation_id = %event.correlation_id,
            payload = %event.payload,
            "event"
        );
    }
}

/// A world with a stationary player that logs what it is asked to do.
#[derive(Debug, Clone, Default)]
pub struct LoggingWorld {
    player: Pose,
    camera: Pose,
    controls: Capabilities,
}

impl LoggingWorld {
    /// Creates a world with the player standing at `player`.
    #[must_use]
    pub fn new(player: Pose) -> Self {
        Self {
            player,
            camera: player,
            controls: Capabilities::default(),
        }
    }

    /// The last pose the camera was moved to.
    #[must_use]
    pub fn camera_pose(&self) -> Pose {
        self.camera
    }

    /// The capabilities last handed to the player.
    #[must_use]
    pub fn controls(&self) -> Capabilities {
        self.controls
    }
}

impl WorldLayer for LoggingWorld {
    fn player_viewpoint(&self) -> Option<Pose> {
        Some(self.player)
    }

    fn apply_camera_pose(&mut self, pose: Pose) {
        if pose != self.camera {
            trace!(?pose, "camera moved");
        }
        self.camera = pose;
    }

    fn play_animation(&mut self, trigger: &TriggerId, animation: &str) {
        info!(%trigger, animation, "animation played");
    }

    fn transform_zone(&mut self, zone: &str) {
        info!(zone, "zone transformed");
    }

    fn reveal_path(&mut self, path: &str) {
        info!(path, "path revealed");
    }

    fn set_interaction_enabled(&mut self, trigger: &TriggerId, enabled: bool) {
        debug!(%trigger, enabled, "interaction prompt");
    }

    fn set_compass_available(&mut self, trigger: &TriggerId, available: bool) {
        info!(%trigger, available, "compass");
    }

    fn set_player_control(&mut self, capabilities: Capabilities) {
        self.controls = capabilities;
        debug!(
            movement = capabilities.movement,
            look = capabilities.look,
            cursor_locked = capabilities.cursor_locked,
            "player control"
        );
    }
}

/// Logs cues and music changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAudio;

impl AudioLayer for LoggingAudio {
    fn play_cue(&mut self, cue: AudioCue) {
        info!(%cue, "audio cue");
    }

    fn select_music(&mut self, mode: GameMode) {
        debug!(%mode, "music");
    }
}
