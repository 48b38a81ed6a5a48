//! Trigger choreography state machines.

use std::fmt;

use labyrinth_content::domain::records::{Activation, Question, Stage, TriggerKind, TriggerSpec};
use labyrinth_core::clock::Clock;
use labyrinth_core::source::{EventSource, Outbox};
use labyrinth_core::ticket::{Owner, Ticket, TicketIssuer, TriggerId};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::directives::{Completion, Directive, WorldEffect};
use super::events::{
    AbortReason, AnswerRetry, ConfigurationGap, StageEntered, TriggerAborted, TriggerActivated,
    TriggerEvent, TriggerEventKind, TriggerReset, TriggerResolved,
};

/// What entered or left a trigger volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityTag {
    /// The player character.
    Player,
    /// Anything else; ignored.
    Other,
}

/// Where a trigger is in its choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPhase {
    /// Waiting to be activated.
    Idle,
    /// Controls taken.
    Arming,
    /// Camera moving to the viewpoint.
    CameraIn,
    /// Dialogue before the question.
    ApproachDialogue,
    /// Question open.
    Question,
    /// Camera returning.
    CameraOut,
    /// Dialogue after the answer.
    ResolutionDialogue,
    /// World changing.
    WorldMutation,
    /// Handing controls back.
    Release,
    /// Done for good.
    Resolved,
}

impl From<Stage> for TriggerPhase {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Arm => Self::Arming,
            Stage::CameraIn => Self::CameraIn,
            Stage::ApproachDialogue => Self::ApproachDialogue,
            Stage::Question => Self::Question,
            Stage::CameraOut => Self::CameraOut,
            Stage::ResolutionDialogue => Self::ResolutionDialogue,
            Stage::WorldMutation => Self::WorldMutation,
            Stage::Release => Self::Release,
        }
    }
}

impl fmt::Display for TriggerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Arming => "arming",
            Self::CameraIn => "camera_in",
            Self::ApproachDialogue => "approach_dialogue",
            Self::Question => "question",
            Self::CameraOut => "camera_out",
            Self::ResolutionDialogue => "resolution_dialogue",
            Self::WorldMutation => "world_mutation",
            Self::Release => "release",
            Self::Resolved => "resolved",
        };
        f.write_str(name)
    }
}

enum Step {
    Next,
    Wait,
    JumpTo(Stage),
}

/// One interactive object and its choreography.
///
/// Every method returns the directives the caller must execute, in order.
/// Long-running directives carry a ticket; the caller routes the matching
/// completion back through [`Trigger::on_completion`].
///
/// When the configured question is missing, arming records a configuration
/// gap and jumps directly to `WorldMutation`: the camera and the approach
/// dialogue are skipped, so a junction without a question reveals its path
/// as soon as the compass is used.
#[derive(Debug)]
pub struct Trigger {
    spec: TriggerSpec,
    question: Option<Question>,
    stages: Vec<Stage>,
    camera_seconds: f32,
    phase: TriggerPhase,
    stage_index: usize,
    awaiting: Option<u64>,
    tickets: TicketIssuer,
    correlation_id: Uuid,
    locked: bool,
    cleared: bool,
    mutated: bool,
    processing: bool,
    camera_away: bool,
    player_in_range: bool,
    compass_used: bool,
    wrong_answers: u32,
    outbox: Outbox<TriggerEventKind>,
}

impl Trigger {
    /// Creates an idle trigger. `question` is the resolved question record,
    /// `None` when the spec names none or names an unknown one.
    #[must_use]
    pub fn new(spec: TriggerSpec, question: Option<Question>, default_camera_seconds: f32) -> Self {
        let stages = spec.stages();
        let camera_seconds = spec.camera_seconds.unwrap_or(default_camera_seconds);
        Self {
            spec,
            question,
            stages,
            camera_seconds,
            phase: TriggerPhase::Idle,
            stage_index: 0,
            awaiting: None,
            tickets: TicketIssuer::default(),
            correlation_id: Uuid::nil(),
            locked: false,
            cleared: false,
            mutated: false,
            processing: false,
            camera_away: false,
            player_in_range: false,
            compass_used: false,
            wrong_answers: 0,
            outbox: Outbox::new(Uuid::new_v4()),
        }
    }

    /// Handles something entering the trigger volume.
    pub fn on_volume_entered(&mut self, tag: EntityTag, can_start: bool, clock: &dyn Clock) -> Vec<Directive> {
        if tag != EntityTag::Player {
            return Vec::new();
        }
        self.player_in_range = true;
        match self.spec.activation() {
            Activation::Enter => self.try_begin(can_start, clock),
            Activation::Interact => Vec::new(),
            Activation::Compass => {
                if self.compass_available() {
                    vec![Directive::SetCompassAvailable(true)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Handles something leaving the trigger volume.
    pub fn on_volume_exited(&mut self, tag: EntityTag) -> Vec<Directive> {
        if tag != EntityTag::Player || !self.player_in_range {
            return Vec::new();
        }
        let was_available = self.compass_available();
        self.player_in_range = false;
        if was_available {
            vec![Directive::SetCompassAvailable(false)]
        } else {
            Vec::new()
        }
    }

    /// Handles an explicit interact input.
    pub fn on_interact(&mut self, can_start: bool, clock: &dyn Clock) -> Vec<Directive> {
        if self.spec.activation() != Activation::Interact {
            debug!(trigger_id = %self.spec.id, "trigger is not interact-activated");
            return Vec::new();
        }
        self.try_begin(can_start, clock)
    }

    /// Handles the junction compass.
    pub fn on_compass_activated(&mut self, can_start: bool, clock: &dyn Clock) -> Vec<Directive> {
        if !self.compass_available() || !can_start {
            debug!(trigger_id = %self.spec.id, "compass unavailable");
            return Vec::new();
        }
        self.compass_used = true;
        self.begin(clock)
    }

    /// Routes a finished request back into the choreography. Completions for
    /// tickets this trigger is not waiting on are ignored.
    pub fn on_completion(&mut self, ticket: &Ticket, completion: Completion, clock: &dyn Clock) -> Vec<Directive> {
        if !self.processing || self.awaiting != Some(ticket.id) {
            debug!(trigger_id = %self.spec.id, ticket = ticket.id, "ignoring stale completion");
            return Vec::new();
        }
        self.awaiting = None;
        let Some(stage) = self.stages.get(self.stage_index).copied() else {
            return Vec::new();
        };
        let next = self.stage_index + 1;
        let mut out = Vec::new();
        match (stage, completion) {
            (_, Completion::DialogueSuperseded) => self.abort(AbortReason::DialogueSuperseded, &mut out, clock),
            (_, Completion::QuestionRejected) => self.abort(AbortReason::QuestionRejected, &mut out, clock),
            (Stage::Question, Completion::QuestionResolved { correct: true }) => {
                self.run_from(next, &mut out, clock);
            }
            (Stage::Question, Completion::QuestionResolved { correct: false }) => {
                self.abort(AbortReason::QuestionFailed, &mut out, clock);
            }
            (Stage::CameraIn, Completion::CameraArrived { moved }) => {
                if !moved {
                    self.camera_away = false;
                }
                self.run_from(next, &mut out, clock);
            }
            (Stage::CameraOut | Stage::Release, Completion::CameraArrived { .. }) => {
                self.camera_away = false;
                self.run_from(next, &mut out, clock);
            }
            (Stage::ApproachDialogue | Stage::ResolutionDialogue, Completion::DialogueFinished) => {
                self.run_from(next, &mut out, clock);
            }
            (stage, completion) => {
                debug!(trigger_id = %self.spec.id, ?stage, ?completion, "completion does not match stage");
                self.awaiting = Some(ticket.id);
            }
        }
        out
    }

    /// Notes a wrong answer that kept the question open.
    pub fn on_answer_retry(&mut self, clock: &dyn Clock) -> Vec<Directive> {
        if !self.processing || self.phase != TriggerPhase::Question {
            return Vec::new();
        }
        self.wrong_answers += 1;
        self.outbox.record(
            TriggerEventKind::AnswerRetry(AnswerRetry {
                trigger_id: self.spec.id.clone(),
                wrong_answers: self.wrong_answers,
            }),
            self.correlation_id,
            clock,
        );
        if self.spec.kind == TriggerKind::Junction {
            vec![Directive::SetCompassAvailable(false)]
        } else {
            Vec::new()
        }
    }

    /// Returns the trigger to its initial state and re-enables interaction.
    pub fn reset(&mut self, clock: &dyn Clock) -> Vec<Directive> {
        self.phase = TriggerPhase::Idle;
        self.stage_index = 0;
        self.awaiting = None;
        self.locked = false;
        self.cleared = false;
        self.mutated = false;
        self.processing = false;
        self.camera_away = false;
        self.compass_used = false;
        self.wrong_answers = 0;
        self.outbox.record(
            TriggerEventKind::Reset(TriggerReset {
                trigger_id: self.spec.id.clone(),
            }),
            self.correlation_id,
            clock,
        );
        let mut out = vec![Directive::SetInteractionEnabled(true)];
        if self.spec.kind == TriggerKind::Junction {
            out.push(Directive::SetCompassAvailable(self.player_in_range));
        }
        out
    }

    /// The trigger identifier.
    #[must_use]
    pub fn id(&self) -> &TriggerId {
        &self.spec.id
    }

    /// The object kind.
    #[must_use]
    pub fn kind(&self) -> TriggerKind {
        self.spec.kind
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TriggerPhase {
        self.phase
    }

    /// Whether a run is in progress.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Whether this trigger holds the control lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether the choreography completed.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Whether the world mutation ran.
    #[must_use]
    pub fn is_mutated(&self) -> bool {
        self.mutated
    }

    /// Whether the player is inside the volume.
    #[must_use]
    pub fn player_in_range(&self) -> bool {
        self.player_in_range
    }

    /// Whether the junction compass may be used right now.
    #[must_use]
    pub fn compass_available(&self) -> bool {
        self.spec.kind == TriggerKind::Junction
            && self.player_in_range
            && self.phase == TriggerPhase::Idle
            && !self.compass_used
    }

    /// Stage order of this trigger.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    fn try_begin(&mut self, can_start: bool, clock: &dyn Clock) -> Vec<Directive> {
        if self.phase != TriggerPhase::Idle {
            debug!(trigger_id = %self.spec.id, phase = %self.phase, "trigger busy or resolved");
            return Vec::new();
        }
        if !can_start {
            debug!(trigger_id = %self.spec.id, "another flow owns the game; not starting");
            return Vec::new();
        }
        self.begin(clock)
    }

    fn begin(&mut self, clock: &dyn Clock) -> Vec<Directive> {
        self.correlation_id = Uuid::new_v4();
        self.processing = true;
        self.wrong_answers = 0;
        self.outbox.record(
            TriggerEventKind::Activated(TriggerActivated {
                trigger_id: self.spec.id.clone(),
                kind: self.spec.kind,
            }),
            self.correlation_id,
            clock,
        );
        info!(trigger_id = %self.spec.id, kind = ?self.spec.kind, "choreography started");
        let mut out = Vec::new();
        if self.spec.kind == TriggerKind::Junction {
            out.push(Directive::SetCompassAvailable(false));
        }
        self.run_from(0, &mut out, clock);
        out
    }

    fn run_from(&mut self, start: usize, out: &mut Vec<Directive>, clock: &dyn Clock) {
        let mut index = start;
        while let Some(stage) = self.stages.get(index).copied() {
            self.stage_index = index;
            self.phase = TriggerPhase::from(stage);
            self.outbox.record(
                TriggerEventKind::StageEntered(StageEntered {
                    trigger_id: self.spec.id.clone(),
                    stage,
                }),
                self.correlation_id,
                clock,
            );
            match self.enter_stage(stage, out, clock) {
                Step::Wait => return,
                Step::Next => index += 1,
                Step::JumpTo(target) => index = self.index_of(target),
            }
        }
        self.finish(out, clock);
    }

    fn enter_stage(&mut self, stage: Stage, out: &mut Vec<Directive>, clock: &dyn Clock) -> Step {
        match stage {
            // A run with no question to ask goes straight from arming to the
            // world mutation, without camera or dialogue.
            Stage::Arm => {
                self.locked = true;
                out.push(Directive::LockControls);
                if self.question.is_none() && self.stages.contains(&Stage::Question) {
                    let detail = match &self.spec.question {
                        Some(id) => format!("question {id} not found; skipping to world mutation"),
                        None => "no question configured; skipping to world mutation".to_owned(),
                    };
                    self.gap(detail, clock);
                    return Step::JumpTo(Stage::WorldMutation);
                }
                Step::Next
            }
            Stage::CameraIn => {
                let Some(target) = self.spec.viewpoint else {
                    return Step::Next;
                };
                let ticket = self.await_ticket();
                self.camera_away = true;
                out.push(Directive::MoveCamera {
                    target: Some(target),
                    duration: self.camera_seconds,
                    ticket,
                });
                Step::Wait
            }
            Stage::ApproachDialogue => {
                let lines = self.spec.approach_dialogue.clone();
                self.dialogue(lines, out)
            }
            Stage::Question => {
                let Some(question) = self.question.clone() else {
                    return Step::Next;
                };
                let ticket = self.await_ticket();
                out.push(Directive::AskQuestion {
                    question: Box::new(question),
                    ticket,
                });
                Step::Wait
            }
            Stage::CameraOut | Stage::Release => {
                if !self.camera_away {
                    return Step::Next;
                }
                let ticket = self.await_ticket();
                out.push(Directive::ReturnCamera {
                    duration: self.camera_seconds,
                    ticket: Some(ticket),
                });
                Step::Wait
            }
            Stage::ResolutionDialogue => {
                let lines = self.spec.resolution_dialogue.clone();
                self.dialogue(lines, out)
            }
            Stage::WorldMutation => {
                self.mutate(out, clock);
                Step::Next
            }
        }
    }

    fn dialogue(&mut self, lines: Vec<String>, out: &mut Vec<Directive>) -> Step {
        if lines.iter().all(|line| line.trim().is_empty()) {
            return Step::Next;
        }
        let ticket = self.await_ticket();
        out.push(Directive::ShowDialogue {
            lines,
            stay_in_ui: true,
            ticket,
        });
        Step::Wait
    }

    fn mutate(&mut self, out: &mut Vec<Directive>, clock: &dyn Clock) {
        if self.mutated {
            debug!(trigger_id = %self.spec.id, "world already mutated");
            return;
        }
        self.mutated = true;
        match self.spec.kind {
            TriggerKind::Chest => {
                match self.spec.reward.clone() {
                    Some(book) => out.push(Directive::Mutate(WorldEffect::AwardBook(book))),
                    None => self.gap("chest has no reward".to_owned(), clock),
                }
                out.push(Directive::ScheduleCompletionCheck);
            }
            TriggerKind::Obstacle | TriggerKind::Gate => {
                match self.spec.removal_animation.clone() {
                    Some(name) => out.push(Directive::Mutate(WorldEffect::PlayAnimation(name))),
                    None => self.gap("no removal animation configured".to_owned(), clock),
                }
                self.transform_zone(out, clock);
            }
            TriggerKind::Junction => {
                match self.spec.path.clone() {
                    Some(name) => out.push(Directive::Mutate(WorldEffect::RevealPath(name))),
                    None => self.gap("no path configured".to_owned(), clock),
                }
                self.transform_zone(out, clock);
            }
        }
    }

    fn transform_zone(&mut self, out: &mut Vec<Directive>, clock: &dyn Clock) {
        match self.spec.zone.clone() {
            Some(name) => out.push(Directive::Mutate(WorldEffect::TransformZone(name))),
            None => self.gap("no zone configured".to_owned(), clock),
        }
    }

    fn finish(&mut self, out: &mut Vec<Directive>, clock: &dyn Clock) {
        self.phase = TriggerPhase::Resolved;
        self.processing = false;
        self.cleared = true;
        self.locked = false;
        self.awaiting = None;
        out.push(Directive::ReleaseControls { restore_roam: true });
        out.push(Directive::SetInteractionEnabled(false));
        if self.spec.kind == TriggerKind::Junction {
            out.push(Directive::SetCompassAvailable(false));
        }
        self.outbox.record(
            TriggerEventKind::Resolved(TriggerResolved {
                trigger_id: self.spec.id.clone(),
                mutated: self.mutated,
            }),
            self.correlation_id,
            clock,
        );
        info!(trigger_id = %self.spec.id, "choreography resolved");
    }

    fn abort(&mut self, reason: AbortReason, out: &mut Vec<Directive>, clock: &dyn Clock) {
        self.phase = TriggerPhase::Idle;
        self.stage_index = 0;
        self.processing = false;
        self.awaiting = None;
        self.wrong_answers = 0;
        if self.locked {
            self.locked = false;
            out.push(Directive::ReleaseControls { restore_roam: false });
        }
        if self.camera_away {
            self.camera_away = false;
            out.push(Directive::ReturnCamera {
                duration: self.camera_seconds,
                ticket: None,
            });
        }
        if self.spec.kind == TriggerKind::Junction {
            self.compass_used = false;
            if self.player_in_range {
                out.push(Directive::SetCompassAvailable(true));
            }
        }
        self.outbox.record(
            TriggerEventKind::Aborted(TriggerAborted {
                trigger_id: self.spec.id.clone(),
                reason,
            }),
            self.correlation_id,
            clock,
        );
        info!(trigger_id = %self.spec.id, ?reason, "choreography aborted");
    }

    fn gap(&mut self, detail: String, clock: &dyn Clock) {
        warn!(trigger_id = %self.spec.id, %detail, "configuration gap");
        self.outbox.record(
            TriggerEventKind::ConfigurationGap(ConfigurationGap {
                trigger_id: self.spec.id.clone(),
                detail,
            }),
            self.correlation_id,
            clock,
        );
    }

    fn await_ticket(&mut self) -> Ticket {
        let ticket = self
            .tickets
            .issue(Owner::Trigger(self.spec.id.clone()), self.correlation_id);
        self.awaiting = Some(ticket.id);
        ticket
    }

    fn index_of(&self, target: Stage) -> usize {
        self.stages
            .iter()
            .position(|stage| *stage == target)
            .or_else(|| self.stages.iter().position(|stage| *stage == Stage::Release))
            .unwrap_or(self.stages.len())
    }
}

impl EventSource for Trigger {
    type Event = TriggerEvent;

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
