//! Recording fakes for the world, audio and event-sink ports.

use std::sync::{Arc, Mutex};

use labyrinth_core::geometry::Pose;
use labyrinth_core::mode::GameMode;
use labyrinth_core::ports::{AudioCue, AudioLayer, Capabilities, WorldLayer};
use labyrinth_core::sink::{EventSink, PublishedEvent};
use labyrinth_core::ticket::TriggerId;

/// One call made against `RecordingWorld`. Camera poses are tracked
/// separately because they arrive every tick.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldCall {
    /// `play_animation`.
    Animation {
        /// Target trigger.
        trigger: TriggerId,
        /// Animation name.
        name: String,
    },
    /// `transform_zone`.
    Zone(String),
    /// `reveal_path`.
    Path(String),
    /// `set_interaction_enabled`.
    Interaction {
        /// Target trigger.
        trigger: TriggerId,
        /// New state.
        enabled: bool,
    },
    /// `set_compass_available`.
    Compass {
        /// Target junction.
        trigger: TriggerId,
        /// New state.
        available: bool,
    },
    /// `set_player_control`.
    Control(Capabilities),
}

#[derive(Debug, Default)]
struct WorldState {
    player: Option<Pose>,
    calls: Vec<WorldCall>,
    camera_poses: Vec<Pose>,
}

/// A world layer that records every call. Clones share the same record, so
/// a test keeps one handle and gives the other to the game.
#[derive(Debug, Clone, Default)]
pub struct RecordingWorld {
    state: Arc<Mutex<WorldState>>,
}

impl RecordingWorld {
    /// Creates a world whose player stands at `player`.
    #[must_use]
    pub fn with_player(player: Pose) -> Self {
        let world = Self::default();
        world.state.lock().unwrap().player = Some(player);
        world
    }

    /// Returns a snapshot of all recorded calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<WorldCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Zones transformed so far.
    #[must_use]
    pub fn zones(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WorldCall::Zone(zone) => Some(zone),
                _ => None,
            })
            .collect()
    }

    /// Paths revealed so far.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WorldCall::Path(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    /// Animations played so far.
    #[must_use]
    pub fn animations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WorldCall::Animation { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Every capability set applied, in order.
    #[must_use]
    pub fn control_history(&self) -> Vec<Capabilities> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WorldCall::Control(caps) => Some(caps),
                _ => None,
            })
            .collect()
    }

    /// Latest compass availability for a junction.
    #[must_use]
    pub fn compass_available(&self, trigger: &TriggerId) -> Option<bool> {
        self.calls().into_iter().rev().find_map(|call| match call {
            WorldCall::Compass {
                trigger: target,
                available,
            } if &target == trigger => Some(available),
            _ => None,
        })
    }

    /// Latest interaction state for a trigger.
    #[must_use]
    pub fn interaction_enabled(&self, trigger: &TriggerId) -> Option<bool> {
        self.calls().into_iter().rev().find_map(|call| match call {
            WorldCall::Interaction {
                trigger: target,
                enabled,
            } if &target == trigger => Some(enabled),
            _ => None,
        })
    }

    /// Last pose applied to the camera.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn last_camera_pose(&self) -> Option<Pose> {
        self.state.lock().unwrap().camera_poses.last().copied()
    }

    fn push(&self, call: WorldCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl WorldLayer for RecordingWorld {
    fn player_viewpoint(&self) -> Option<Pose> {
        self.state.lock().unwrap().player
    }

    fn apply_camera_pose(&mut self, pose: Pose) {
        self.state.lock().unwrap().camera_poses.push(pose);
    }

    fn play_animation(&mut self, trigger: &TriggerId, animation: &str) {
        self.push(WorldCall::Animation {
            trigger: trigger.clone(),
            name: animation.to_owned(),
        });
    }

    fn transform_zone(&mut self, zone: &str) {
        self.push(WorldCall::Zone(zone.to_owned()));
    }

    fn reveal_path(&mut self, path: &str) {
        self.push(WorldCall::Path(path.to_owned()));
    }

    fn set_interaction_enabled(&mut self, trigger: &TriggerId, enabled: bool) {
        self.push(WorldCall::Interaction {
            trigger: trigger.clone(),
            enabled,
        });
    }

    fn set_compass_available(&mut self, trigger: &TriggerId, available: bool) {
        self.push(WorldCall::Compass {
            trigger: trigger.clone(),
            available,
        });
    }

    fn set_player_control(&mut self, capabilities: Capabilities) {
        self.push(WorldCall::Control(capabilities));
    }
}

/// One call made against `RecordingAudio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCall {
    /// `play_cue`.
    Cue(AudioCue),
    /// `select_music`.
    Music(GameMode),
}

/// An audio layer that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    calls: Arc<Mutex<Vec<AudioCall>>>,
}

impl RecordingAudio {
    /// Cues played so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn cues(&self) -> Vec<AudioCue> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                AudioCall::Cue(cue) => Some(*cue),
                AudioCall::Music(_) => None,
            })
            .collect()
    }

    /// Every call in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<AudioCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl AudioLayer for RecordingAudio {
    fn play_cue(&mut self, cue: AudioCue) {
        self.calls.lock().unwrap().push(AudioCall::Cue(cue));
    }

    fn select_music(&mut self, mode: GameMode) {
        self.calls.lock().unwrap().push(AudioCall::Music(mode));
    }
}

/// An event sink that keeps every published event.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<PublishedEvent>>>,
}

impl RecordingSink {
    /// Snapshot of all published events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<PublishedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Event type names in publication order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|event| event.event_type)
            .collect()
    }

    /// Events of one type.
    #[must_use]
    pub fn of_type(&self, event_type: &str) -> Vec<PublishedEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.event_type == event_type)
            .collect()
    }

    /// How many events of one type were published.
    #[must_use]
    pub fn count(&self, event_type: &str) -> usize {
        self.of_type(event_type).len()
    }
}

impl EventSink for RecordingSink {
    fn publish(&mut self, event: &PublishedEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
