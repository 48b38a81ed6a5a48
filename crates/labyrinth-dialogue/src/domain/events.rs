//! Domain events for the Dialogue context.

use labyrinth_core::event::{Envelope, EventKind};
use labyrinth_core::ticket::Ticket;
use serde::Serialize;

/// Event type emitted when a sequence takes over the panel.
pub const DIALOGUE_OPENED_EVENT_TYPE: &str = "dialogue.opened";
/// Event type emitted when a line starts typing.
pub const LINE_STARTED_EVENT_TYPE: &str = "dialogue.line_started";
/// Event type emitted when a line is fully visible.
pub const LINE_REVEALED_EVENT_TYPE: &str = "dialogue.line_revealed";
/// Event type emitted when a newer request replaces a pending one.
pub const DIALOGUE_SUPERSEDED_EVENT_TYPE: &str = "dialogue.superseded";
/// Event type emitted when a sequence finishes.
pub const DIALOGUE_COMPLETED_EVENT_TYPE: &str = "dialogue.completed";

/// Emitted when a sequence takes over the dialogue panel.
#[derive(Debug, Clone, Serialize)]
pub struct DialogueOpened {
    /// Number of lines queued by the request.
    pub line_count: usize,
    /// Whether the mode stays put after the last line.
    pub stay_in_ui: bool,
}

/// Emitted when a line starts typing.
#[derive(Debug, Clone, Serialize)]
pub struct LineStarted {
    /// Zero-based position within the request.
    pub index: u32,
    /// The full line text.
    pub text: String,
}

/// Emitted when the current line is fully visible.
#[derive(Debug, Clone, Serialize)]
pub struct LineRevealed {
    /// Zero-based position within the request.
    pub index: u32,
    /// Whether a skip cut the animation short.
    pub skipped: bool,
}

/// Emitted when a request is replaced before it finished. Its ticket will
/// never complete.
#[derive(Debug, Clone, Serialize)]
pub struct DialogueSuperseded {
    /// Ticket of the replaced request.
    pub ticket: Option<Ticket>,
}

/// Emitted exactly once per accepted request.
#[derive(Debug, Clone, Serialize)]
pub struct DialogueCompleted {
    /// Ticket of the finished request.
    pub ticket: Option<Ticket>,
    /// How many lines of the request were shown.
    pub lines_shown: u32,
}

/// Event payload variants for the Dialogue context.
#[derive(Debug, Clone, Serialize)]
pub enum DialogueEventKind {
    /// A sequence took over the panel.
    Opened(DialogueOpened),
    /// A line started typing.
    LineStarted(LineStarted),
    /// A line is fully visible.
    LineRevealed(LineRevealed),
    /// A pending request was replaced.
    Superseded(DialogueSuperseded),
    /// A request finished.
    Completed(DialogueCompleted),
}

impl EventKind for DialogueEventKind {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Opened(_) => DIALOGUE_OPENED_EVENT_TYPE,
            Self::LineStarted(_) => LINE_STARTED_EVENT_TYPE,
            Self::LineRevealed(_) => LINE_REVEALED_EVENT_TYPE,
            Self::Superseded(_) => DIALOGUE_SUPERSEDED_EVENT_TYPE,
            Self::Completed(_) => DIALOGUE_COMPLETED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Dialogue context.
pub type DialogueEvent = Envelope<DialogueEventKind>;
