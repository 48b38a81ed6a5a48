//! Domain events for the Question context.

use labyrinth_content::domain::records::QuestionKind;
use labyrinth_core::event::{Envelope, EventKind};
use labyrinth_core::ticket::Ticket;
use serde::Serialize;

/// Event type emitted when a question is shown.
pub const QUESTION_PRESENTED_EVENT_TYPE: &str = "question.presented";
/// Event type emitted when an option is marked right or wrong.
pub const ANSWER_MARKED_EVENT_TYPE: &str = "question.answer_marked";
/// Event type emitted when a wrong answer costs lives.
pub const DAMAGE_APPLIED_EVENT_TYPE: &str = "question.damage_applied";
/// Event type emitted when wrong-answer feedback appears.
pub const FEEDBACK_SHOWN_EVENT_TYPE: &str = "question.feedback_shown";
/// Event type emitted when wrong-answer feedback disappears.
pub const FEEDBACK_CLEARED_EVENT_TYPE: &str = "question.feedback_cleared";
/// Event type emitted when the gate key flourish starts.
pub const FLOURISH_STARTED_EVENT_TYPE: &str = "question.flourish_started";
/// Event type emitted when the success panel is shown.
pub const SUCCESS_SHOWN_EVENT_TYPE: &str = "question.success_shown";
/// Event type emitted when the question panel closes.
pub const QUESTION_CLOSED_EVENT_TYPE: &str = "question.closed";
/// Event type emitted once per accepted question with its result.
pub const QUESTION_RESOLVED_EVENT_TYPE: &str = "question.resolved";

/// Emitted when a question is shown.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPresented {
    /// The question identifier.
    pub question_id: String,
    /// The question text.
    pub text: String,
    /// Answer options in display order.
    pub answers: Vec<String>,
    /// Presentation variant.
    pub kind: QuestionKind,
}

/// Emitted for every accepted answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerMarked {
    /// The question identifier.
    pub question_id: String,
    /// The chosen option.
    pub option: usize,
    /// Whether it was correct.
    pub correct: bool,
    /// One-based attempt number.
    pub attempt: u32,
}

/// Emitted when a wrong answer costs lives.
#[derive(Debug, Clone, Serialize)]
pub struct DamageApplied {
    /// Lives requested.
    pub amount: u32,
    /// Lives left afterwards.
    pub lives_left: u32,
}

/// Emitted when wrong-answer feedback appears.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackShown {
    /// Feedback text.
    pub text: String,
    /// How long it stays visible.
    pub seconds: f32,
}

/// Emitted when the gate key flourish starts.
#[derive(Debug, Clone, Serialize)]
pub struct FlourishStarted {
    /// Flourish duration.
    pub seconds: f32,
}

/// Emitted when the success panel waits for continue.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessShown {
    /// Success text.
    pub text: String,
}

/// Emitted when the panel closes.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionClosed {
    /// The question identifier.
    pub question_id: String,
}

/// Emitted exactly once per accepted question.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResolved {
    /// Ticket handed to `ask`.
    pub ticket: Option<Ticket>,
    /// The question identifier.
    pub question_id: String,
    /// Whether the question was answered correctly.
    pub correct: bool,
    /// Number of answers given.
    pub attempts: u32,
}

/// Event payload variants for the Question context.
#[derive(Debug, Clone, Serialize)]
pub enum QuestionEventKind {
    /// A question was shown.
    Presented(QuestionPresented),
    /// An answer was marked.
    AnswerMarked(AnswerMarked),
    /// Damage was applied.
    DamageApplied(DamageApplied),
    /// Wrong feedback appeared.
    FeedbackShown(FeedbackShown),
    /// Wrong feedback disappeared.
    FeedbackCleared,
    /// Key flourish started.
    FlourishStarted(FlourishStarted),
    /// Success panel shown.
    SuccessShown(SuccessShown),
    /// Panel closed.
    Closed(QuestionClosed),
    /// Question resolved.
    Resolved(QuestionResolved),
}

impl EventKind for QuestionEventKind {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Presented(_) => QUESTION_PRESENTED_EVENT_TYPE,
            Self::AnswerMarked(_) => ANSWER_MARKED_EVENT_TYPE,
            Self::DamageApplied(_) => DAMAGE_APPLIED_EVENT_TYPE,
            Self::FeedbackShown(_) => FEEDBACK_SHOWN_EVENT_TYPE,
            Self::FeedbackCleared => FEEDBACK_CLEARED_EVENT_TYPE,
            Self::FlourishStarted(_) => FLOURISH_STARTED_EVENT_TYPE,
            Self::SuccessShown(_) => SUCCESS_SHOWN_EVENT_TYPE,
            Self::Closed(_) => QUESTION_CLOSED_EVENT_TYPE,
            Self::Resolved(_) => QUESTION_RESOLVED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Question context.
pub type QuestionEvent = Envelope<QuestionEventKind>;
