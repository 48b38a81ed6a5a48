//! Drains every outbox, publishes the events and routes completions.

use std::sync::Arc;

use labyrinth_camera::domain::events::{ArrivalOutcome, CameraEventKind};
use labyrinth_core::event::DomainEvent;
use labyrinth_core::ports::{AudioCue, Capabilities};
use labyrinth_core::sink::PublishedEvent;
use labyrinth_core::source::EventSource;
use labyrinth_core::ticket::{Owner, Ticket};
use labyrinth_dialogue::domain::events::DialogueEventKind;
use labyrinth_progression::domain::events::ProgressionEventKind;
use labyrinth_question::domain::events::QuestionEventKind;
use labyrinth_trigger::domain::directives::Completion;
use tracing::{debug, warn};
use uuid::Uuid;

use super::Game;
use crate::events::{GameConfigurationGap, GameEvent, GameEventKind};

/// Upper bound on drain rounds per pump.
const MAX_PUMP_ROUNDS: usize = 64;

impl Game {
    /// Drains and routes until no service has anything left to say.
    pub(super) fn pump(&mut self) {
        for _ in 0..MAX_PUMP_ROUNDS {
            let mut drained = self.drain_dialogue();
            drained += self.drain_questions();
            drained += self.drain_camera();
            drained += self.drain_progression();
            drained += self.drain_triggers();
            drained += self.drain_mode_changes();
            self.refresh_capabilities();
            drained += self.drain_own();
            if drained == 0 {
                return;
            }
        }
        warn!(rounds = MAX_PUMP_ROUNDS, "event pump did not settle");
    }

    /// Publishes the events of every trigger in the registry.
    pub(super) fn drain_triggers(&mut self) -> usize {
        let events: Vec<_> = self
            .triggers
            .iter_mut()
            .flat_map(|trigger| trigger.take_pending_events())
            .collect();
        for event in &events {
            self.publish(event);
        }
        events.len()
    }

    /// Records a configuration gap the game degrades around.
    pub(super) fn gap(&mut self, detail: String) {
        warn!(%detail, "configuration gap");
        self.outbox.record(
            GameEventKind::ConfigurationGap(GameConfigurationGap { detail }),
            Uuid::nil(),
            self.clock.as_ref(),
        );
    }

    /// Hands a completion to whoever holds its ticket.
    pub(super) fn route(&mut self, ticket: &Ticket, completion: Completion) {
        match &ticket.owner {
            Owner::Trigger(id) => {
                let clock = Arc::clone(&self.clock);
                match self.triggers.get_mut(id) {
                    Ok(trigger) => {
                        let directives = trigger.on_completion(ticket, completion, clock.as_ref());
                        self.execute(id, directives);
                    }
                    Err(err) => debug!(%err, ticket = ticket.id, "completion outlived its trigger"),
                }
            }
            Owner::Chapter => self.on_chapter_completion(ticket, completion),
            Owner::Host => debug!(ticket = ticket.id, ?completion, "host completion"),
        }
    }

    fn drain_dialogue(&mut self) -> usize {
        let events = self.dialogue.take_pending_events();
        for event in &events {
            self.publish(event);
            match &event.kind {
                DialogueEventKind::Completed(done) => {
                    if let Some(ticket) = &done.ticket {
                        self.route(ticket, Completion::DialogueFinished);
                    }
                }
                DialogueEventKind::Superseded(superseded) => {
                    if let Some(ticket) = &superseded.ticket {
                        self.route(ticket, Completion::DialogueSuperseded);
                    }
                }
                _ => {}
            }
        }
        events.len()
    }

    fn drain_questions(&mut self) -> usize {
        let events = self.arbiter.take_pending_events();
        for event in &events {
            self.publish(event);
            match &event.kind {
                QuestionEventKind::AnswerMarked(marked) => {
                    let cue = if marked.correct {
                        AudioCue::QuestionCorrect
                    } else {
                        AudioCue::QuestionWrong
                    };
                    self.audio.play_cue(cue);
                }
                QuestionEventKind::Resolved(resolved) => {
                    self.question_owner = None;
                    if let Some(ticket) = &resolved.ticket {
                        self.route(
                            ticket,
                            Completion::QuestionResolved {
                                correct: resolved.correct,
                            },
                        );
                    }
                }
                _ => {}
            }
        }
        events.len()
    }

    fn drain_camera(&mut self) -> usize {
        let events = self.camera.take_pending_events();
        for event in &events {
            self.publish(event);
            if let CameraEventKind::Arrived(arrived) = &event.kind {
                if let Some(ticket) = &arrived.ticket {
                    let moved = arrived.outcome != ArrivalOutcome::Skipped;
                    self.route(ticket, Completion::CameraArrived { moved });
                }
            }
        }
        events.len()
    }

    fn drain_progression(&mut self) -> usize {
        let events = self.progression.take_pending_events();
        for event in &events {
            self.publish(event);
            match &event.kind {
                ProgressionEventKind::Died => {
                    if self.progression.handle_death(&mut self.modes) {
                        self.audio.play_cue(AudioCue::GameOver);
                    }
                }
                ProgressionEventKind::BookCollected(_) => self.audio.play_cue(AudioCue::BookCollected),
                ProgressionEventKind::ChapterCompleted(completed) if completed.next_chapter.is_some() => {
                    self.audio.play_cue(AudioCue::ChapterComplete);
                }
                ProgressionEventKind::Victory => self.audio.play_cue(AudioCue::Victory),
                ProgressionEventKind::CompletionCheckDue(check) => self.on_completion_check(check.complete),
                _ => {}
            }
        }
        events.len()
    }

    fn drain_mode_changes(&mut self) -> usize {
        let changes = self.modes.take_changes();
        for change in &changes {
            self.audio.select_music(change.current);
            self.outbox
                .record(GameEventKind::ModeChanged(*change), Uuid::nil(), self.clock.as_ref());
        }
        changes.len()
    }

    fn drain_own(&mut self) -> usize {
        let events: Vec<GameEvent> = self.outbox.take();
        for event in &events {
            self.publish(event);
        }
        events.len()
    }

    fn refresh_capabilities(&mut self) {
        let capabilities = Capabilities::derive(
            self.modes.current(),
            self.controls_locked(),
            self.camera.is_attached() && self.camera.look_enabled(),
        );
        if self.capabilities == Some(capabilities) {
            return;
        }
        self.capabilities = Some(capabilities);
        self.world.set_player_control(capabilities);
        self.outbox.record(
            GameEventKind::CapabilitiesChanged(capabilities),
            Uuid::nil(),
            self.clock.as_ref(),
        );
    }

    fn publish(&mut self, event: &dyn DomainEvent) {
        self.sink.publish(&PublishedEvent::from_event(event));
    }
}
