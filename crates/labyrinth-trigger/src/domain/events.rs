//! Domain events for the Trigger context.

use labyrinth_content::domain::records::{Stage, TriggerKind};
use labyrinth_core::event::{Envelope, EventKind};
use labyrinth_core::ticket::TriggerId;
use serde::Serialize;

/// Event type emitted when a choreography starts.
pub const TRIGGER_ACTIVATED_EVENT_TYPE: &str = "trigger.activated";
/// Event type emitted when a choreography enters a stage.
pub const STAGE_ENTERED_EVENT_TYPE: &str = "trigger.stage_entered";
/// Event type emitted when configuration is missing something a stage needs.
pub const CONFIGURATION_GAP_EVENT_TYPE: &str = "trigger.configuration_gap";
/// Event type emitted when a wrong answer keeps the question open.
pub const ANSWER_RETRY_EVENT_TYPE: &str = "trigger.answer_retry";
/// Event type emitted when a choreography finishes.
pub const TRIGGER_RESOLVED_EVENT_TYPE: &str = "trigger.resolved";
/// Event type emitted when a choreography is cut short.
pub const TRIGGER_ABORTED_EVENT_TYPE: &str = "trigger.aborted";
/// Event type emitted when a trigger returns to its initial state.
pub const TRIGGER_RESET_EVENT_TYPE: &str = "trigger.reset";

/// Why a run ended early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// The question resolved unanswered.
    QuestionFailed,
    /// The question was refused.
    QuestionRejected,
    /// A newer dialogue replaced the run's dialogue.
    DialogueSuperseded,
}

/// Emitted when a choreography starts.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerActivated {
    /// The trigger.
    pub trigger_id: TriggerId,
    /// Its kind.
    pub kind: TriggerKind,
}

/// Emitted when a choreography enters a stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageEntered {
    /// The trigger.
    pub trigger_id: TriggerId,
    /// The stage entered.
    pub stage: Stage,
}

/// Emitted when configuration is missing something.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationGap {
    /// The trigger.
    pub trigger_id: TriggerId,
    /// What is missing.
    pub detail: String,
}

/// Emitted when a wrong answer keeps the question open.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRetry {
    /// The trigger.
    pub trigger_id: TriggerId,
    /// Wrong answers so far in this run.
    pub wrong_answers: u32,
}

/// Emitted when a choreography finishes.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerResolved {
    /// The trigger.
    pub trigger_id: TriggerId,
    /// Whether this run changed the world.
    pub mutated: bool,
}

/// Emitted when a choreography is cut short.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerAborted {
    /// The trigger.
    pub trigger_id: TriggerId,
    /// Why.
    pub reason: AbortReason,
}

/// Emitted when a trigger is reset.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerReset {
    /// The trigger.
    pub trigger_id: TriggerId,
}

/// Event payload variants for the Trigger context.
#[derive(Debug, Clone, Serialize)]
pub enum TriggerEventKind {
    /// A run started.
    Activated(TriggerActivated),
    /// A stage started.
    StageEntered(StageEntered),
    /// Something is missing from configuration.
    ConfigurationGap(ConfigurationGap),
    /// A wrong answer kept the question open.
    AnswerRetry(AnswerRetry),
    /// A run finished.
    Resolved(TriggerResolved),
    /// A run was cut short.
    Aborted(TriggerAborted),
    /// The trigger was reset.
    Reset(TriggerReset),
}

impl EventKind for TriggerEventKind {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Activated(_) => TRIGGER_ACTIVATED_EVENT_TYPE,
            Self::StageEntered(_) => STAGE_ENTERED_EVENT_TYPE,
            Self::ConfigurationGap(_) => CONFIGURATION_GAP_EVENT_TYPE,
            Self::AnswerRetry(_) => ANSWER_RETRY_EVENT_TYPE,
            Self::Resolved(_) => TRIGGER_RESOLVED_EVENT_TYPE,
            Self::Aborted(_) => TRIGGER_ABORTED_EVENT_TYPE,
            Self::Reset(_) => TRIGGER_RESET_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Trigger context.
pub type TriggerEvent = Envelope<TriggerEventKind>;
