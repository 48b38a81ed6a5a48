//! Commands for the Dialogue context.

use labyrinth_core::command::Command;
use labyrinth_core::ticket::Ticket;
use uuid::Uuid;

/// An ordered, immutable list of non-empty lines plus presentation flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueRequest {
    messages: Vec<String>,
    stay_in_ui: bool,
    keep_mode: bool,
}

impl DialogueRequest {
    /// Builds a request; blank lines are dropped.
    #[must_use]
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: messages
                .into_iter()
                .map(Into::into)
                .filter(|line: &String| !line.trim().is_empty())
                .collect(),
            stay_in_ui: false,
            keep_mode: false,
        }
    }

    /// Keep the current mode after the last line instead of returning to
    /// `Roam`.
    #[must_use]
    pub fn stay_in_ui(mut self) -> Self {
        self.stay_in_ui = true;
        self
    }

    /// Do not switch to `Dialogue` when the request starts.
    #[must_use]
    pub fn keep_current_mode(mut self) -> Self {
        self.keep_mode = true;
        self
    }

    /// The lines to show.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether the mode is kept after the last line.
    #[must_use]
    pub fn stays_in_ui(&self) -> bool {
        self.stay_in_ui
    }

    /// Whether the mode is left alone on start.
    #[must_use]
    pub fn keeps_mode(&self) -> bool {
        self.keep_mode
    }

    pub(crate) fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// Command to play a dialogue sequence.
#[derive(Debug, Clone)]
pub struct ShowSequence {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// What to show.
    pub request: DialogueRequest,
    /// Continuation to complete when the sequence ends.
    pub ticket: Option<Ticket>,
}

impl Command for ShowSequence {
    fn command_type(&self) -> &'static str {
        "dialogue.show_sequence"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command issued when the player presses continue.
#[derive(Debug, Clone)]
pub struct ContinueDialogue {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ContinueDialogue {
    fn command_type(&self) -> &'static str {
        "dialogue.continue"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to cut the typing animation short.
#[derive(Debug, Clone)]
pub struct SkipTyping {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for SkipTyping {
    fn command_type(&self) -> &'static str {
        "dialogue.skip"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
