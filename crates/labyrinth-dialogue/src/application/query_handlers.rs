//! Query handlers for the Dialogue context.

use serde::Serialize;

use crate::domain::aggregates::DialogueSequencer;

/// Read-only view of the dialogue panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogueView {
    /// Whether the panel is showing.
    pub active: bool,
    /// The revealed part of the current line.
    pub visible_text: String,
    /// Whether the current line is still typing.
    pub typing: bool,
    /// Position of the current line within its request.
    pub line_index: Option<u32>,
    /// Lines still queued.
    pub remaining_lines: usize,
}

/// Returns the current state of the dialogue panel.
#[must_use]
pub fn get_dialogue_view(sequencer: &DialogueSequencer) -> DialogueView {
    DialogueView {
        active: sequencer.is_active(),
        visible_text: sequencer.visible_text().unwrap_or_default().to_owned(),
        typing: sequencer.is_typing(),
        line_index: sequencer.line_index(),
        remaining_lines: sequencer.remaining_lines(),
    }
}

#[cfg(test)]
mod tests {
    use labyrinth_core::mode::{GameMode, ModeMachine};
    use labyrinth_test_support::fixed_clock;
    use uuid::Uuid;

    use super::*;
    use crate::domain::commands::DialogueRequest;

    #[test]
    fn test_view_of_idle_sequencer_is_empty() {
        let sequencer = DialogueSequencer::new(Uuid::new_v4(), 20.0);

        let view = get_dialogue_view(&sequencer);

        assert!(!view.active);
        assert_eq!(view.visible_text, "");
        assert_eq!(view.line_index, None);
    }

    #[test]
    fn test_view_reflects_typing_line() {
        // Arrange
        let clock = fixed_clock();
        let mut modes = ModeMachine::new(GameMode::Roam);
        let mut sequencer = DialogueSequencer::new(Uuid::new_v4(), 20.0);
        sequencer.show_sequence(DialogueRequest::new(["Hello there", "Again"]), None, &mut modes, &clock);

        // Act
        sequencer.update(0.1, &clock);
        let view = get_dialogue_view(&sequencer);

        // Assert
        assert!(view.active);
        assert!(view.typing);
        assert_eq!(view.visible_text, "He");
        assert_eq!(view.line_index, Some(0));
        assert_eq!(view.remaining_lines, 1);
    }
}
