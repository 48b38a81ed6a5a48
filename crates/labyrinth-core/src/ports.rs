//! Outbound ports to the excluded collaborators: the render/world layer and
//! the audio layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Pose;
use crate::mode::GameMode;
use crate::ticket::TriggerId;

/// What the player's input is currently allowed to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Walking through the labyrinth.
    pub movement: bool,
    /// Mouse/stick look.
    pub look: bool,
    /// Pointer captured by the game view.
    pub cursor_locked: bool,
}

impl Capabilities {
    /// Derives capabilities from the mode, whether any choreography holds
    /// the controls, and whether the camera is attached to the player.
    #[must_use]
    pub fn derive(mode: GameMode, controls_locked: bool, camera_attached: bool) -> Self {
        let movement = mode.allows_movement() && !controls_locked;
        Self {
            movement,
            look: movement && camera_attached,
            cursor_locked: !mode.shows_cursor(),
        }
    }
}

/// Semantic audio cues. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// A question was answered correctly.
    QuestionCorrect,
    /// A question was answered incorrectly.
    QuestionWrong,
    /// A chapter was completed.
    ChapterComplete,
    /// A book was added to the collection.
    BookCollected,
    /// The life pool ran out.
    GameOver,
    /// The last chapter was completed.
    Victory,
}

impl AudioCue {
    /// Stable cue name used by audio banks.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::QuestionCorrect => "question-correct",
            Self::QuestionWrong => "question-wrong",
            Self::ChapterComplete => "chapter-complete",
            Self::BookCollected => "book-collected",
            Self::GameOver => "game-over",
            Self::Victory => "victory",
        }
    }
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render/world collaborator.
pub trait WorldLayer: Send {
    /// The player's own eye pose, if a player exists.
    fn player_viewpoint(&self) -> Option<Pose>;

    /// Moves the live camera.
    fn apply_camera_pose(&mut self, pose: Pose);

    /// Plays a named removal/reveal animation on a trigger's object.
    fn play_animation(&mut self, trigger: &TriggerId, animation: &str);

    /// Transforms a named zone of world geometry.
    fn transform_zone(&mut self, zone: &str);

    /// Reveals a named path.
    fn reveal_path(&mut self, path: &str);

    /// Enables or disables a trigger's collider and interaction surface.
    fn set_interaction_enabled(&mut self, trigger: &TriggerId, enabled: bool);

    /// Shows or hides the compass control of a junction.
    fn set_compass_available(&mut self, trigger: &TriggerId, available: bool);

    /// Applies player input capabilities (cursor lock, input enable).
    fn set_player_control(&mut self, capabilities: Capabilities);
}

/// Audio collaborator.
pub trait AudioLayer: Send {
    /// Plays a cue.
    fn play_cue(&mut self, cue: AudioCue);

    /// Selects background music for a mode.
    fn select_music(&mut self, mode: GameMode);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_controls_disable_movement_in_roam() {
        let caps = Capabilities::derive(GameMode::Roam, true, true);

        assert!(!caps.movement);
        assert!(!caps.look);
        assert!(caps.cursor_locked);
    }

    #[test]
    fn test_detached_camera_disables_look_only() {
        let caps = Capabilities::derive(GameMode::Roam, false, false);

        assert!(caps.movement);
        assert!(!caps.look);
    }

    #[test]
    fn test_question_mode_frees_cursor() {
        let caps = Capabilities::derive(GameMode::Question, false, true);

        assert_eq!(caps, Capabilities::default());
    }
}
