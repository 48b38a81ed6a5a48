//! Executes the directives trigger choreographies return.

use std::sync::Arc;

use labyrinth_camera::application::command_handlers::{handle_move_camera, handle_return_camera};
use labyrinth_camera::domain::commands::{MoveCamera, ReturnCamera};
use labyrinth_core::mode::GameMode;
use labyrinth_core::ticket::{Owner, TriggerId};
use labyrinth_dialogue::application::command_handlers::handle_show_sequence;
use labyrinth_dialogue::domain::commands::{DialogueRequest, ShowSequence};
use labyrinth_progression::application::command_handlers::{
    handle_collect_book, handle_schedule_completion_check,
};
use labyrinth_progression::domain::commands::{CollectBook, ScheduleCompletionCheck};
use labyrinth_question::application::command_handlers::handle_ask;
use labyrinth_question::domain::commands::AskQuestion;
use labyrinth_trigger::domain::directives::{Completion, Directive, WorldEffect};
use tracing::debug;
use uuid::Uuid;

use super::Game;

impl Game {
    /// Runs `directives` on behalf of `trigger`, in order.
    pub(super) fn execute(&mut self, trigger: &TriggerId, directives: Vec<Directive>) {
        for directive in directives {
            self.execute_one(trigger, directive);
        }
    }

    fn execute_one(&mut self, trigger: &TriggerId, directive: Directive) {
        let clock = Arc::clone(&self.clock);
        let clock = clock.as_ref();
        match directive {
            Directive::LockControls => {
                self.control_locks.insert(Owner::Trigger(trigger.clone()));
            }
            Directive::MoveCamera {
                target,
                duration,
                ticket,
            } => {
                let command = MoveCamera {
                    correlation_id: ticket.correlation_id,
                    target,
                    duration,
                    ticket: Some(ticket),
                };
                handle_move_camera(command, &mut self.camera, clock);
            }
            Directive::ReturnCamera { duration, ticket } => {
                let command = ReturnCamera {
                    correlation_id: ticket.as_ref().map_or(Uuid::nil(), |t| t.correlation_id),
                    duration,
                    ticket,
                };
                let player = self.world.player_viewpoint();
                handle_return_camera(command, &mut self.camera, player, clock);
            }
            Directive::ShowDialogue {
                lines,
                stay_in_ui,
                ticket,
            } => {
                let mut request = DialogueRequest::new(lines);
                if stay_in_ui {
                    request = request.stay_in_ui();
                }
                let command = ShowSequence {
                    correlation_id: ticket.correlation_id,
                    request,
                    ticket: Some(ticket),
                };
                handle_show_sequence(command, &mut self.dialogue, &mut self.modes, clock);
            }
            Directive::AskQuestion { question, ticket } => {
                let command = AskQuestion {
                    correlation_id: ticket.correlation_id,
                    question: *question,
                    ticket: Some(ticket.clone()),
                };
                match handle_ask(command, &mut self.arbiter, &mut self.modes, clock) {
                    Ok(()) => self.question_owner = Some(trigger.clone()),
                    Err(err) => {
                        debug!(%err, %trigger, "question refused");
                        self.route(&ticket, Completion::QuestionRejected);
                    }
                }
            }
            Directive::Mutate(effect) => self.apply_effect(trigger, effect),
            Directive::ScheduleCompletionCheck => {
                let command = ScheduleCompletionCheck {
                    correlation_id: Uuid::new_v4(),
                    delay: self.campaign.settings.completion_check_delay,
                };
                handle_schedule_completion_check(&command, &mut self.progression);
            }
            Directive::SetInteractionEnabled(enabled) => self.world.set_interaction_enabled(trigger, enabled),
            Directive::SetCompassAvailable(available) => self.world.set_compass_available(trigger, available),
            Directive::ReleaseControls { restore_roam } => {
                self.control_locks.remove(&Owner::Trigger(trigger.clone()));
                if restore_roam && matches!(self.modes.current(), GameMode::Dialogue | GameMode::Question) {
                    self.modes.set_mode(GameMode::Roam);
                }
            }
        }
    }

    fn apply_effect(&mut self, trigger: &TriggerId, effect: WorldEffect) {
        match effect {
            WorldEffect::AwardBook(book_id) => self.award_book(&book_id),
            WorldEffect::PlayAnimation(name) => self.world.play_animation(trigger, &name),
            WorldEffect::TransformZone(zone) => self.world.transform_zone(&zone),
            WorldEffect::RevealPath(path) => self.world.reveal_path(&path),
        }
    }

    /// Adds a campaign book to the collection. Unknown books degrade to a
    /// configuration gap.
    pub(super) fn award_book(&mut self, book_id: &str) {
        let Some(book) = self.campaign.book(book_id).cloned() else {
            self.gap(format!("book {book_id} is not defined"));
            return;
        };
        let clock = Arc::clone(&self.clock);
        let command = CollectBook {
            correlation_id: Uuid::new_v4(),
            book,
        };
        if !handle_collect_book(&command, &mut self.progression, clock.as_ref()) {
            debug!(book_id, "book already collected");
        }
    }
}
