//! Command handlers for the Dialogue context.
//!
//! Handlers apply a command to the in-memory sequencer. Events stay in the
//! sequencer's outbox until the composition root drains them.

use labyrinth_core::clock::Clock;
use labyrinth_core::mode::ModeMachine;
use tracing::{debug, instrument};

use crate::domain::aggregates::{ContinueOutcome, DialogueSequencer};
use crate::domain::commands::{ContinueDialogue, ShowSequence, SkipTyping};

/// Handles the `ShowSequence` command.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, lines = command.request.messages().len()))]
pub fn handle_show_sequence(
    command: ShowSequence,
    sequencer: &mut DialogueSequencer,
    modes: &mut ModeMachine,
    clock: &dyn Clock,
) {
    if sequencer.is_active() {
        debug!("replacing pending dialogue");
    }
    sequencer.show_sequence(command.request, command.ticket, modes, clock);
}

/// Handles the `ContinueDialogue` command.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub fn handle_continue(
    command: &ContinueDialogue,
    sequencer: &mut DialogueSequencer,
    modes: &mut ModeMachine,
    clock: &dyn Clock,
) -> ContinueOutcome {
    let outcome = sequencer.continue_dialogue(modes, clock);
    debug!(?outcome, "dialogue continue");
    outcome
}

/// Handles the `SkipTyping` command. Returns whether a line was revealed.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub fn handle_skip(command: &SkipTyping, sequencer: &mut DialogueSequencer, clock: &dyn Clock) -> bool {
    sequencer.skip(clock)
}

#[cfg(test)]
mod tests {
    use labyrinth_core::event::DomainEvent;
    use labyrinth_core::mode::GameMode;
    use labyrinth_core::source::EventSource;
    use labyrinth_test_support::{correlation, fixed_clock};
    use uuid::Uuid;

    use super::*;
    use crate::domain::commands::DialogueRequest;

    #[test]
    fn test_handlers_drive_a_sequence_to_completion() {
        // Arrange
        let clock = fixed_clock();
        let mut modes = ModeMachine::new(GameMode::Roam);
        let mut sequencer = DialogueSequencer::new(Uuid::new_v4(), 30.0);
        let correlation_id = correlation();

        // Act
        handle_show_sequence(
            ShowSequence {
                correlation_id,
                request: DialogueRequest::new(["Welcome, traveller."]),
                ticket: None,
            },
            &mut sequencer,
            &mut modes,
            &clock,
        );
        let skipped = handle_skip(&SkipTyping { correlation_id }, &mut sequencer, &clock);
        let outcome = handle_continue(&ContinueDialogue { correlation_id }, &mut sequencer, &mut modes, &clock);

        // Assert
        assert!(skipped);
        assert_eq!(outcome, ContinueOutcome::Completed);
        assert_eq!(modes.current(), GameMode::Roam);
        let last = sequencer.pending_events().last().map(DomainEvent::event_type);
        assert_eq!(last, Some("dialogue.completed"));
    }

    #[test]
    fn test_continue_with_nothing_showing_is_idle() {
        let clock = fixed_clock();
        let mut modes = ModeMachine::new(GameMode::Roam);
        let mut sequencer = DialogueSequencer::new(Uuid::new_v4(), 30.0);

        let outcome = handle_continue(
            &ContinueDialogue { correlation_id: correlation() },
            &mut sequencer,
            &mut modes,
            &clock,
        );

        assert_eq!(outcome, ContinueOutcome::Idle);
        assert!(sequencer.pending_events().is_empty());
    }
}
