//! The Dialogue Sequencer.

use std::collections::VecDeque;

use labyrinth_core::clock::Clock;
use labyrinth_core::mode::{GameMode, ModeMachine};
use labyrinth_core::source::{EventSource, Outbox};
use labyrinth_core::ticket::Ticket;
use uuid::Uuid;

use super::commands::DialogueRequest;
use super::events::{
    DialogueCompleted, DialogueEvent, DialogueEventKind, DialogueOpened, DialogueSuperseded,
    LineRevealed, LineStarted,
};

/// The line currently on screen.
#[derive(Debug, Clone)]
struct ActiveLine {
    index: u32,
    text: String,
    char_count: usize,
    revealed: usize,
    carry: f32,
}

impl ActiveLine {
    fn is_typing(&self) -> bool {
        self.revealed < self.char_count
    }

    fn visible(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.revealed)
            .map_or(self.text.len(), |(offset, _)| offset);
        &self.text[..end]
    }
}

/// What a continue input did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueOutcome {
    /// Nothing is showing.
    Idle,
    /// The typing line was revealed in full.
    Revealed,
    /// The next line started.
    Advanced,
    /// The last line was dismissed and the sequence completed.
    Completed,
}

/// Plays dialogue requests one line at a time.
///
/// At most one request is active. A newer request replaces the pending
/// lines of the active one without interrupting the line on screen; the
/// replaced request's ticket is reported as superseded and never completes.
#[derive(Debug)]
pub struct DialogueSequencer {
    chars_per_second: f32,
    queue: VecDeque<String>,
    line: Option<ActiveLine>,
    ticket: Option<Ticket>,
    correlation_id: Uuid,
    stay_in_ui: bool,
    lines_shown: u32,
    outbox: Outbox<DialogueEventKind>,
}

impl DialogueSequencer {
    /// Creates an idle sequencer revealing `chars_per_second` characters per
    /// second.
    #[must_use]
    pub fn new(id: Uuid, chars_per_second: f32) -> Self {
        Self {
            chars_per_second: chars_per_second.max(f32::MIN_POSITIVE),
            queue: VecDeque::new(),
            line: None,
            ticket: None,
            correlation_id: Uuid::nil(),
            stay_in_ui: false,
            lines_shown: 0,
            outbox: Outbox::new(id),
        }
    }

    /// Starts playing `request`, completing `ticket` when it ends.
    ///
    /// An empty request completes synchronously without touching the panel
    /// or the mode.
    pub fn show_sequence(
        &mut self,
        request: DialogueRequest,
        ticket: Option<Ticket>,
        modes: &mut ModeMachine,
        clock: &dyn Clock,
    ) {
        let correlation_id = ticket.as_ref().map_or(Uuid::nil(), |t| t.correlation_id);
        if request.is_empty() {
            self.outbox.record(
                DialogueEventKind::Completed(DialogueCompleted {
                    ticket,
                    lines_shown: 0,
                }),
                correlation_id,
                clock,
            );
            return;
        }

        if self.is_active() {
            let previous = self.ticket.take();
            self.outbox.record(
                DialogueEventKind::Superseded(DialogueSuperseded { ticket: previous }),
                self.correlation_id,
                clock,
            );
        }

        let stay_in_ui = request.stays_in_ui();
        let keep_mode = request.keeps_mode();
        let messages = request.into_messages();
        self.outbox.record(
            DialogueEventKind::Opened(DialogueOpened {
                line_count: messages.len(),
                stay_in_ui,
            }),
            correlation_id,
            clock,
        );

        self.queue = messages.into();
        self.ticket = ticket;
        self.correlation_id = correlation_id;
        self.stay_in_ui = stay_in_ui;
        self.lines_shown = 0;

        if !keep_mode {
            modes.set_mode(GameMode::Dialogue);
        }
        if self.line.is_none() {
            self.start_next_line(clock);
        }
    }

    /// Advances the typewriter by `dt` seconds.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn update(&mut self, dt: f32, clock: &dyn Clock) {
        let Some(line) = self.line.as_mut() else {
            return;
        };
        if !line.is_typing() {
            return;
        }
        line.carry += dt.max(0.0) * self.chars_per_second;
        let whole = line.carry.floor();
        line.carry -= whole;
        let step = whole.min((line.char_count - line.revealed) as f32) as usize;
        line.revealed += step;
        if !line.is_typing() {
            let index = line.index;
            self.outbox.record(
                DialogueEventKind::LineRevealed(LineRevealed {
                    index,
                    skipped: false,
                }),
                self.correlation_id,
                clock,
            );
        }
    }

    /// Reveals the typing line in full. Returns `false` when no line is
    /// typing; a skip never advances to the next line.
    pub fn skip(&mut self, clock: &dyn Clock) -> bool {
        let Some(line) = self.line.as_mut() else {
            return false;
        };
        if !line.is_typing() {
            return false;
        }
        line.revealed = line.char_count;
        line.carry = 0.0;
        let index = line.index;
        self.outbox.record(
            DialogueEventKind::LineRevealed(LineRevealed {
                index,
                skipped: true,
            }),
            self.correlation_id,
            clock,
        );
        true
    }

    /// Handles a continue input: reveals a typing line, otherwise advances
    /// to the next line or completes the sequence.
    pub fn continue_dialogue(&mut self, modes: &mut ModeMachine, clock: &dyn Clock) -> ContinueOutcome {
        let typing = match &self.line {
            None => return ContinueOutcome::Idle,
            Some(line) => line.is_typing(),
        };
        if typing {
            self.skip(clock);
            return ContinueOutcome::Revealed;
        }
        if self.queue.is_empty() {
            self.finish(modes, clock);
            return ContinueOutcome::Completed;
        }
        self.start_next_line(clock);
        ContinueOutcome::Advanced
    }

    /// Drops the active request without completing it. Used on restart.
    pub fn clear(&mut self, clock: &dyn Clock) {
        if self.is_active() {
            let previous = self.ticket.take();
            self.outbox.record(
                DialogueEventKind::Superseded(DialogueSuperseded { ticket: previous }),
                self.correlation_id,
                clock,
            );
        }
        self.queue.clear();
        self.line = None;
        self.stay_in_ui = false;
        self.lines_shown = 0;
    }

    /// Whether a request is on screen.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.line.is_some()
    }

    /// Whether the current line is still typing.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.line.as_ref().is_some_and(ActiveLine::is_typing)
    }

    /// The revealed part of the current line.
    #[must_use]
    pub fn visible_text(&self) -> Option<&str> {
        self.line.as_ref().map(ActiveLine::visible)
    }

    /// The full text of the current line.
    #[must_use]
    pub fn full_text(&self) -> Option<&str> {
        self.line.as_ref().map(|line| line.text.as_str())
    }

    /// Position of the current line within its request.
    #[must_use]
    pub fn line_index(&self) -> Option<u32> {
        self.line.as_ref().map(|line| line.index)
    }

    /// Lines still waiting behind the current one.
    #[must_use]
    pub fn remaining_lines(&self) -> usize {
        self.queue.len()
    }

    fn start_next_line(&mut self, clock: &dyn Clock) {
        let Some(text) = self.queue.pop_front() else {
            return;
        };
        let index = self.lines_shown;
        self.lines_shown += 1;
        self.outbox.record(
            DialogueEventKind::LineStarted(LineStarted {
                index,
                text: text.clone(),
            }),
            self.correlation_id,
            clock,
        );
        self.line = Some(ActiveLine {
            index,
            char_count: text.chars().count(),
            text,
            revealed: 0,
            carry: 0.0,
        });
    }

    fn finish(&mut self, modes: &mut ModeMachine, clock: &dyn Clock) {
        self.line = None;
        let ticket = self.ticket.take();
        self.outbox.record(
            DialogueEventKind::Completed(DialogueCompleted {
                ticket,
                lines_shown: self.lines_shown,
            }),
            self.correlation_id,
            clock,
        );
        if !self.stay_in_ui && modes.current() == GameMode::Dialogue {
            modes.set_mode(GameMode::Roam);
        }
        self.stay_in_ui = false;
        self.lines_shown = 0;
    }
}

impl EventSource for DialogueSequencer {
    type Event = DialogueEvent;

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
    use labyrinth_core::ticket::{Owner, TicketIssuer};
    use labyrinth_test_support::{FixedClock, correlation, fixed_clock};

    use super::*;

    fn setup() -> (DialogueSequencer, ModeMachine, FixedClock) {
        (
            DialogueSequencer::new(Uuid::new_v4(), 10.0),
            ModeMachine::new(GameMode::Roam),
            fixed_clock(),
        )
    }

    fn ticket() -> Ticket {
        TicketIssuer::default().issue(Owner::Host, correlation())
    }

    fn completions(sequencer: &mut DialogueSequencer) -> Vec<DialogueCompleted> {
        sequencer
            .take_pending_events()
            .into_iter()
            .filter_map(|event| match event.kind {
                DialogueEventKind::Completed(done) => Some(done),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_show_sequence_enters_dialogue_and_starts_first_line() {
        // Arrange
        let (mut sequencer, mut modes, clock) = setup();

        // Act
        sequencer.show_sequence(DialogueRequest::new(["Hello", "World"]), Some(ticket()), &mut modes, &clock);

        // Assert
        assert_eq!(modes.current(), GameMode::Dialogue);
        assert_eq!(sequencer.full_text(), Some("Hello"));
        assert_eq!(sequencer.visible_text(), Some(""));
        assert_eq!(sequencer.remaining_lines(), 1);
        let types: Vec<_> = sequencer
            .pending_events()
            .iter()
            .map(DomainEvent::event_type)
            .collect();
        assert_eq!(types, vec!["dialogue.opened", "dialogue.line_started"]);
    }

    #[test]
    fn test_update_reveals_characters_progressively() {
        let (mut sequencer, mut modes, clock) = setup();
        sequencer.show_sequence(DialogueRequest::new(["abcdef"]), None, &mut modes, &clock);

        sequencer.update(0.25, &clock);
        assert_eq!(sequencer.visible_text(), Some("ab"));
        sequencer.update(0.05, &clock);
        assert_eq!(sequencer.visible_text(), Some("abc"));
        sequencer.update(1.0, &clock);

        assert_eq!(sequencer.visible_text(), Some("abcdef"));
        assert!(!sequencer.is_typing());
    }

    #[test]
    fn test_visible_text_respects_multibyte_characters() {
        let (mut sequencer, mut modes, clock) = setup();
        sequencer.show_sequence(DialogueRequest::new(["äöü"]), None, &mut modes, &clock);

        sequencer.update(0.2, &clock);

        assert_eq!(sequencer.visible_text(), Some("äö"));
    }

    #[test]
    fn test_n_lines_complete_after_n_advances_regardless_of_skips() {
        // Arrange
        let (mut sequencer, mut modes, clock) = setup();
        let issued = ticket();
        sequencer.show_sequence(
            DialogueRequest::new(["one", "two", "three"]),
            Some(issued.clone()),
            &mut modes,
            &clock,
        );

        // Act
        let mut advances = 0;
        loop {
            for _ in 0..3 {
                sequencer.skip(&clock);
            }
            match sequencer.continue_dialogue(&mut modes, &clock) {
                ContinueOutcome::Advanced | ContinueOutcome::Completed => advances += 1,
                ContinueOutcome::Revealed => {}
                ContinueOutcome::Idle => break,
            }
        }

        // Assert
        assert_eq!(advances, 3);
        let done = completions(&mut sequencer);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].ticket, Some(issued));
        assert_eq!(done[0].lines_shown, 3);
        assert_eq!(modes.current(), GameMode::Roam);
    }

    #[test]
    fn test_continue_while_typing_only_reveals() {
        let (mut sequencer, mut modes, clock) = setup();
        sequencer.show_sequence(DialogueRequest::new(["long line"]), None, &mut modes, &clock);

        let outcome = sequencer.continue_dialogue(&mut modes, &clock);

        assert_eq!(outcome, ContinueOutcome::Revealed);
        assert_eq!(sequencer.visible_text(), Some("long line"));
        assert!(sequencer.is_active());
    }

    #[test]
    fn test_skip_never_advances_revealed_line() {
        let (mut sequencer, mut modes, clock) = setup();
        sequencer.show_sequence(DialogueRequest::new(["a", "b"]), None, &mut modes, &clock);

        assert!(sequencer.skip(&clock));
        assert!(!sequencer.skip(&clock));

        assert_eq!(sequencer.full_text(), Some("a"));
    }

    #[test]
    fn test_empty_request_completes_synchronously_without_ui() {
        let (mut sequencer, mut modes, clock) = setup();
        let issued = ticket();

        sequencer.show_sequence(DialogueRequest::new(["", "   "]), Some(issued.clone()), &mut modes, &clock);

        assert_eq!(modes.current(), GameMode::Roam);
        assert!(!sequencer.is_active());
        let events = sequencer.take_pending_events();
        assert_eq!(events.len(), 1);
        match &events[0].kind {
            DialogueEventKind::Completed(done) => {
                assert_eq!(done.ticket, Some(issued));
                assert_eq!(done.lines_shown, 0);
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[test]
    fn test_stay_in_ui_keeps_mode_after_last_line() {
        let (mut sequencer, mut modes, clock) = setup();
        sequencer.show_sequence(DialogueRequest::new(["bye"]).stay_in_ui(), None, &mut modes, &clock);

        sequencer.skip(&clock);
        let outcome = sequencer.continue_dialogue(&mut modes, &clock);

        assert_eq!(outcome, ContinueOutcome::Completed);
        assert_eq!(modes.current(), GameMode::Dialogue);
    }

    #[test]
    fn test_keep_current_mode_leaves_mode_alone() {
        let mut modes = ModeMachine::new(GameMode::Question);
        let mut sequencer = DialogueSequencer::new(Uuid::new_v4(), 10.0);
        let clock = fixed_clock();

        sequencer.show_sequence(DialogueRequest::new(["hint"]).keep_current_mode(), None, &mut modes, &clock);

        assert_eq!(modes.current(), GameMode::Question);
    }

    #[test]
    fn test_overlapping_request_replaces_queue_and_supersedes_ticket() {
        // Arrange
        let (mut sequencer, mut modes, clock) = setup();
        let mut issuer = TicketIssuer::default();
        let first = issuer.issue(Owner::Host, correlation());
        let second = issuer.issue(Owner::Chapter, correlation());
        sequencer.show_sequence(DialogueRequest::new(["first-a", "first-b"]), Some(first.clone()), &mut modes, &clock);
        sequencer.update(0.2, &clock);
        sequencer.take_pending_events();

        // Act
        sequencer.show_sequence(DialogueRequest::new(["second"]), Some(second.clone()), &mut modes, &clock);

        // Assert: the typing line is untouched, the queue is the new one.
        assert_eq!(sequencer.full_text(), Some("first-a"));
        assert_eq!(sequencer.visible_text(), Some("fi"));
        assert_eq!(sequencer.remaining_lines(), 1);
        let superseded: Vec<_> = sequencer
            .pending_events()
            .iter()
            .filter_map(|event| match &event.kind {
                DialogueEventKind::Superseded(s) => Some(s.ticket.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(superseded, vec![Some(first)]);

        sequencer.skip(&clock);
        assert_eq!(sequencer.continue_dialogue(&mut modes, &clock), ContinueOutcome::Advanced);
        assert_eq!(sequencer.full_text(), Some("second"));
        sequencer.skip(&clock);
        assert_eq!(sequencer.continue_dialogue(&mut modes, &clock), ContinueOutcome::Completed);

        let done = completions(&mut sequencer);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].ticket, Some(second));
    }

    #[test]
    fn test_clear_abandons_request_without_completion() {
        let (mut sequencer, mut modes, clock) = setup();
        sequencer.show_sequence(DialogueRequest::new(["x"]), Some(ticket()), &mut modes, &clock);

        sequencer.clear(&clock);

        assert!(!sequencer.is_active());
        assert!(completions(&mut sequencer).is_empty());
        assert_eq!(sequencer.continue_dialogue(&mut modes, &clock), ContinueOutcome::Idle);
    }
}
