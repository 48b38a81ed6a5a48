//! A read-only snapshot across every service.

use labyrinth_camera::application::query_handlers::{CameraView, get_camera_view};
use labyrinth_core::mode::GameMode;
use labyrinth_core::ports::Capabilities;
use labyrinth_dialogue::application::query_handlers::{DialogueView, get_dialogue_view};
use labyrinth_progression::application::query_handlers::{ProgressView, get_progress_view};
use labyrinth_question::application::query_handlers::{QuestionView, get_question_view};
use labyrinth_trigger::application::query_handlers::{TriggerView, list_triggers};
use serde::Serialize;

use super::Game;

/// Everything a HUD needs to draw the current frame.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    /// Active mode.
    pub mode: GameMode,
    /// Capabilities pushed to the world.
    pub capabilities: Capabilities,
    /// Dialogue panel.
    pub dialogue: DialogueView,
    /// Question panel, when one is open.
    pub question: Option<QuestionView>,
    /// Camera state.
    pub camera: CameraView,
    /// Chapter, lives and books.
    pub progress: ProgressView,
    /// The active chapter's triggers.
    pub triggers: Vec<TriggerView>,
}

impl Game {
    /// Takes a snapshot of every service.
    #[must_use]
    pub fn view(&self) -> GameView {
        GameView {
            mode: self.modes.current(),
            capabilities: self.capabilities(),
            dialogue: get_dialogue_view(&self.dialogue),
            question: get_question_view(&self.arbiter),
            camera: get_camera_view(&self.camera),
            progress: get_progress_view(&self.progression),
            triggers: list_triggers(&self.triggers),
        }
    }
}
