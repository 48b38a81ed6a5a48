//! The Question Arbiter.

use std::collections::BTreeSet;

use labyrinth_content::domain::records::{Question, QuestionKind};
use labyrinth_content::domain::settings::GameSettings;
use labyrinth_core::clock::Clock;
use labyrinth_core::error::DomainError;
use labyrinth_core::life::LifePool;
use labyrinth_core::mode::{GameMode, ModeMachine};
use labyrinth_core::source::{EventSource, Outbox};
use labyrinth_core::ticket::Ticket;
use labyrinth_core::timer::Countdown;
use uuid::Uuid;

use super::events::{
    AnswerMarked, DamageApplied, FeedbackShown, FlourishStarted, QuestionClosed, QuestionEvent,
    QuestionEventKind, QuestionPresented, QuestionResolved, SuccessShown,
};

/// Arbiter tuning taken from the campaign settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbiterSettings {
    /// Lives lost per wrong answer.
    pub damage_per_wrong_answer: u32,
    /// Duration of the gate key flourish.
    pub flourish_seconds: f32,
    /// How long wrong feedback stays visible.
    pub feedback_seconds: f32,
}

impl From<&GameSettings> for ArbiterSettings {
    fn from(settings: &GameSettings) -> Self {
        Self {
            damage_per_wrong_answer: settings.damage_per_wrong_answer,
            flourish_seconds: settings.flourish_seconds,
            feedback_seconds: settings.feedback_seconds,
        }
    }
}

impl Default for ArbiterSettings {
    fn default() -> Self {
        Self::from(&GameSettings::default())
    }
}

/// Presentation phase of the open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionPhase {
    /// Waiting for the player to pick an option.
    AwaitingAnswer,
    /// Gate key flourish playing; closes on its own.
    Flourish,
    /// Success panel waiting for continue.
    AwaitingContinue,
}

/// Result of a selected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum AnswerOutcome {
    /// The answer was right.
    Correct,
    /// The answer was wrong; the session stays open.
    Wrong {
        /// Lives left after the damage.
        lives_left: u32,
    },
    /// The answer was wrong and emptied the life pool; the session closed.
    Fatal,
}

#[derive(Debug)]
struct QuestionSession {
    question: Question,
    ticket: Option<Ticket>,
    correlation_id: Uuid,
    phase: QuestionPhase,
    wrong_options: BTreeSet<usize>,
    attempts: u32,
    feedback: Option<Countdown>,
    flourish: Option<Countdown>,
}

/// Arbitrates the single active question.
#[derive(Debug)]
pub struct QuestionArbiter {
    settings: ArbiterSettings,
    session: Option<QuestionSession>,
    outbox: Outbox<QuestionEventKind>,
}

impl QuestionArbiter {
    /// Creates an arbiter with no open session.
    #[must_use]
    pub fn new(id: Uuid, settings: ArbiterSettings) -> Self {
        Self {
            settings,
            session: None,
            outbox: Outbox::new(id),
        }
    }

    /// Opens a session for `question`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if a session is already open and
    /// `DomainError::Validation` if the question is malformed.
    pub fn ask(
        &mut self,
        question: Question,
        ticket: Option<Ticket>,
        modes: &mut ModeMachine,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if let Some(open) = &self.session {
            return Err(DomainError::Rejected(format!(
                "question {} is already open",
                open.question.id
            )));
        }
        question.validate()?;

        let correlation_id = ticket.as_ref().map_or(Uuid::nil(), |t| t.correlation_id);
        self.outbox.record(
            QuestionEventKind::Presented(QuestionPresented {
                question_id: question.id.clone(),
                text: question.text.clone(),
                answers: question.answers.clone(),
                kind: question.kind,
            }),
            correlation_id,
            clock,
        );
        self.session = Some(QuestionSession {
            question,
            ticket,
            correlation_id,
            phase: QuestionPhase::AwaitingAnswer,
            wrong_options: BTreeSet::new(),
            attempts: 0,
            feedback: None,
            flourish: None,
        });
        modes.set_mode(GameMode::Question);
        Ok(())
    }

    /// Handles the player's choice of `option`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if no session is waiting for an
    /// answer or the option was already marked wrong, and
    /// `DomainError::Validation` if the option is out of range.
    pub fn select_answer(
        &mut self,
        option: usize,
        lives: &mut dyn LifePool,
        clock: &dyn Clock,
    ) -> Result<AnswerOutcome, DomainError> {
        let settings = self.settings;
        let Some(session) = self.session.as_mut() else {
            return Err(DomainError::Rejected("no question is open".to_owned()));
        };
        if session.phase != QuestionPhase::AwaitingAnswer {
            return Err(DomainError::Rejected(format!(
                "question {} is not waiting for an answer",
                session.question.id
            )));
        }
        if option >= session.question.answers.len() {
            return Err(DomainError::Validation(format!(
                "option {option} is out of range for question {}",
                session.question.id
            )));
        }
        if session.wrong_options.contains(&option) {
            return Err(DomainError::Rejected(format!(
                "option {option} was already marked wrong"
            )));
        }

        session.attempts += 1;
        let correct = session.question.is_correct(option);
        let correlation_id = session.correlation_id;
        self.outbox.record(
            QuestionEventKind::AnswerMarked(AnswerMarked {
                question_id: session.question.id.clone(),
                option,
                correct,
                attempt: session.attempts,
            }),
            correlation_id,
            clock,
        );

        if correct {
            session.feedback = None;
            if session.question.kind == QuestionKind::Gate {
                session.phase = QuestionPhase::Flourish;
                session.flourish = Some(Countdown::new(settings.flourish_seconds));
                self.outbox.record(
                    QuestionEventKind::FlourishStarted(FlourishStarted {
                        seconds: settings.flourish_seconds,
                    }),
                    correlation_id,
                    clock,
                );
            } else {
                session.phase = QuestionPhase::AwaitingContinue;
                self.outbox.record(
                    QuestionEventKind::SuccessShown(SuccessShown {
                        text: session.question.feedback.correct.clone(),
                    }),
                    correlation_id,
                    clock,
                );
            }
            return Ok(AnswerOutcome::Correct);
        }

        session.wrong_options.insert(option);
        let change = lives.take_damage(settings.damage_per_wrong_answer, clock);
        self.outbox.record(
            QuestionEventKind::DamageApplied(DamageApplied {
                amount: settings.damage_per_wrong_answer,
                lives_left: change.after,
            }),
            correlation_id,
            clock,
        );

        if lives.is_depleted() {
            self.close(false, clock);
            return Ok(AnswerOutcome::Fatal);
        }

        session.feedback = Some(Countdown::new(settings.feedback_seconds));
        self.outbox.record(
            QuestionEventKind::FeedbackShown(FeedbackShown {
                text: session.question.feedback.wrong.clone(),
                seconds: settings.feedback_seconds,
            }),
            correlation_id,
            clock,
        );
        Ok(AnswerOutcome::Wrong {
            lives_left: change.after,
        })
    }

    /// Dismisses the success panel. Returns `false` unless a session was
    /// waiting for continue.
    pub fn continue_question(&mut self, clock: &dyn Clock) -> bool {
        let waiting = self
            .session
            .as_ref()
            .is_some_and(|session| session.phase == QuestionPhase::AwaitingContinue);
        if waiting {
            self.close(true, clock);
        }
        waiting
    }

    /// Advances the flourish and feedback countdowns by `dt` seconds.
    pub fn update(&mut self, dt: f32, clock: &dyn Clock) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let correlation_id = session.correlation_id;
        if session.feedback.as_mut().is_some_and(|timer| timer.tick(dt)) {
            session.feedback = None;
            self.outbox
                .record(QuestionEventKind::FeedbackCleared, correlation_id, clock);
        }
        if session.flourish.as_mut().is_some_and(|timer| timer.tick(dt)) {
            self.close(true, clock);
        }
    }

    /// Resolves an open session as unanswered. Used on restart.
    pub fn abandon(&mut self, clock: &dyn Clock) {
        if self.session.is_some() {
            self.close(false, clock);
        }
    }

    /// Whether a session is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The open question.
    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.session.as_ref().map(|session| &session.question)
    }

    /// Presentation phase of the open session.
    #[must_use]
    pub fn phase(&self) -> Option<QuestionPhase> {
        self.session.as_ref().map(|session| session.phase)
    }

    /// Options already marked wrong.
    #[must_use]
    pub fn wrong_options(&self) -> Vec<usize> {
        self.session
            .as_ref()
            .map(|session| session.wrong_options.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Answers given so far.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.session.as_ref().map_or(0, |session| session.attempts)
    }

    /// Whether wrong feedback is visible.
    #[must_use]
    pub fn feedback_visible(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.feedback.is_some())
    }

    fn close(&mut self, correct: bool, clock: &dyn Clock) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.outbox.record(
            QuestionEventKind::Closed(QuestionClosed {
                question_id: session.question.id.clone(),
            }),
            session.correlation_id,
            clock,
        );
        self.outbox.record(
            QuestionEventKind::Resolved(QuestionResolved {
                ticket: session.ticket,
                question_id: session.question.id,
                correct,
                attempts: session.attempts,
            }),
            session.correlation_id,
            clock,
        );
    }
}

impl EventSource for QuestionArbiter {
    type Event = QuestionEvent;

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
