//! Chapter start and completion choreographies.

use std::sync::Arc;

use labyrinth_content::domain::records::Chapter;
use labyrinth_core::error::DomainError;
use labyrinth_core::mode::GameMode;
use labyrinth_core::ticket::{Owner, Ticket};
use labyrinth_dialogue::application::command_handlers::handle_show_sequence;
use labyrinth_dialogue::domain::commands::{DialogueRequest, ShowSequence};
use labyrinth_progression::application::command_handlers::handle_begin_chapter;
use labyrinth_progression::domain::aggregates::ChapterOutcome;
use labyrinth_progression::domain::commands::BeginChapter;
use labyrinth_trigger::domain::directives::Completion;
use labyrinth_trigger::domain::registry::TriggerRegistry;
use tracing::{debug, info};
use uuid::Uuid;

use super::Game;

/// Which chapter dialogue, if any, the game is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum ChapterFlow {
    #[default]
    Idle,
    Intro {
        ticket: u64,
    },
    Completion {
        ticket: u64,
    },
}

impl Game {
    /// Loads chapter `number`: fresh triggers, the required books, then the
    /// intro dialogue. The player roams once the intro ends.
    pub(super) fn start_chapter(&mut self, number: u32) -> Result<(), DomainError> {
        let clock = Arc::clone(&self.clock);
        let clock = clock.as_ref();
        let chapter = self.campaign.chapter(number)?.clone();
        let command = BeginChapter {
            correlation_id: Uuid::new_v4(),
            chapter: number,
            required_books: self.required_orders(&chapter),
        };
        handle_begin_chapter(command, &mut self.progression, clock)?;

        self.drain_triggers();
        self.triggers = TriggerRegistry::for_chapter(&chapter, &self.campaign);
        self.control_locks.clear();
        for (id, directives) in self.triggers.reset_all(clock) {
            self.execute(&id, directives);
        }
        info!(chapter = number, title = %chapter.title, triggers = self.triggers.len(), "chapter loaded");

        let ticket = self.tickets.issue(Owner::Chapter, Uuid::new_v4());
        self.chapter_flow = ChapterFlow::Intro { ticket: ticket.id };
        self.show_chapter_dialogue(chapter.intro_dialogue, ticket);
        Ok(())
    }

    /// Reacts to the delayed completion check. A chapter only finishes while
    /// the player roams; otherwise the check runs again later.
    pub(super) fn on_completion_check(&mut self, complete: bool) {
        if !complete {
            debug!(chapter = self.progression.chapter(), "chapter not complete yet");
            return;
        }
        if self.modes.current().is_terminal() || self.chapter_flow != ChapterFlow::Idle {
            return;
        }
        if self.modes.current() != GameMode::Roam || self.controls_locked() || self.triggers.any_processing() {
            debug!("chapter complete while a choreography runs; checking again later");
            self.progression
                .schedule_completion_check(self.campaign.settings.completion_check_delay);
            return;
        }

        let lines = self
            .campaign
            .chapter(self.progression.chapter())
            .map(|chapter| chapter.completion_dialogue.clone())
            .unwrap_or_default();
        let ticket = self.tickets.issue(Owner::Chapter, Uuid::new_v4());
        self.chapter_flow = ChapterFlow::Completion { ticket: ticket.id };
        self.show_chapter_dialogue(lines, ticket);
    }

    /// Routes a completion whose ticket the chapter flow issued.
    pub(super) fn on_chapter_completion(&mut self, ticket: &Ticket, completion: Completion) {
        match self.chapter_flow {
            ChapterFlow::Intro { ticket: id } if id == ticket.id => {
                self.chapter_flow = ChapterFlow::Idle;
                if !self.modes.current().is_terminal() {
                    self.modes.set_mode(GameMode::Roam);
                }
            }
            ChapterFlow::Completion { ticket: id } if id == ticket.id => {
                self.chapter_flow = ChapterFlow::Idle;
                self.finish_chapter();
            }
            _ => debug!(ticket = ticket.id, ?completion, "ignoring stale chapter completion"),
        }
    }

    fn finish_chapter(&mut self) {
        let clock = Arc::clone(&self.clock);
        let reward = self
            .campaign
            .chapter(self.progression.chapter())
            .ok()
            .and_then(|chapter| chapter.reward.clone());
        if let Some(book_id) = reward {
            self.award_book(&book_id);
        }
        match self.progression.complete_chapter(&mut self.modes, clock.as_ref()) {
            ChapterOutcome::Advanced { next } => debug!(next, "waiting for continue"),
            ChapterOutcome::Victory => debug!("campaign won"),
        }
    }

    fn show_chapter_dialogue(&mut self, lines: Vec<String>, ticket: Ticket) {
        let clock = Arc::clone(&self.clock);
        let command = ShowSequence {
            correlation_id: ticket.correlation_id,
            request: DialogueRequest::new(lines).stay_in_ui(),
            ticket: Some(ticket),
        };
        handle_show_sequence(command, &mut self.dialogue, &mut self.modes, clock.as_ref());
    }

    fn required_orders(&mut self, chapter: &Chapter) -> Vec<u32> {
        let mut orders = Vec::new();
        for book_id in chapter.required_books() {
            let order = self.campaign.book(&book_id).map(|book| book.order);
            match order {
                Some(order) => orders.push(order),
                None => self.gap(format!(
                    "chapter {} requires unknown book {book_id}",
                    chapter.number
                )),
            }
        }
        orders
    }
}
