//! The Progression Controller.

use std::collections::{BTreeMap, BTreeSet};

use labyrinth_content::domain::records::Book;
use labyrinth_content::domain::settings::GameSettings;
use labyrinth_core::clock::Clock;
use labyrinth_core::error::DomainError;
use labyrinth_core::life::{LifeChange, LifePool, Lives};
use labyrinth_core::mode::{GameMode, ModeMachine};
use labyrinth_core::source::{EventSource, Outbox};
use labyrinth_core::timer::Countdown;
use tracing::info;
use uuid::Uuid;

use super::events::{
    BookCollected, ChapterCompleted, ChapterStarted, CompletionCheckDue, LivesChanged,
    ProgressionEvent, ProgressionEventKind,
};

/// What finishing a chapter led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ChapterOutcome {
    /// Another chapter follows; the game waits in `ChapterTransition`.
    Advanced {
        /// The chapter that is next.
        next: u32,
    },
    /// The last chapter is done.
    Victory,
}

/// Owns the run's progress: chapter, lives and collected books.
#[derive(Debug)]
pub struct ProgressionController {
    chapter: u32,
    chapter_count: u32,
    lives: Lives,
    books: BTreeMap<u32, String>,
    required: BTreeSet<u32>,
    completion_check: Option<Countdown>,
    correlation_id: Uuid,
    outbox: Outbox<ProgressionEventKind>,
}

impl ProgressionController {
    /// Creates a controller at chapter 1 with a full life pool.
    #[must_use]
    pub fn new(id: Uuid, settings: &GameSettings, chapter_count: u32) -> Self {
        Self {
            chapter: 1,
            chapter_count: chapter_count.max(1),
            lives: Lives::full(settings.max_lives),
            books: BTreeMap::new(),
            required: BTreeSet::new(),
            completion_check: None,
            correlation_id: Uuid::nil(),
            outbox: Outbox::new(id),
        }
    }

    /// Makes `number` the current chapter and records which books it
    /// requires.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownChapter` if `number` is outside
    /// `1..=chapter_count`.
    pub fn begin_chapter(
        &mut self,
        number: u32,
        required_books: impl IntoIterator<Item = u32>,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if number == 0 || number > self.chapter_count {
            return Err(DomainError::UnknownChapter(number));
        }
        self.chapter = number;
        self.required = required_books.into_iter().collect();
        self.completion_check = None;
        self.correlation_id = Uuid::new_v4();
        self.outbox.record(
            ProgressionEventKind::ChapterStarted(ChapterStarted {
                chapter: number,
                required_books: self.required.iter().copied().collect(),
            }),
            self.correlation_id,
            clock,
        );
        info!(chapter = number, "chapter started");
        Ok(())
    }

    /// Finishes the current chapter: the last one wins the game, any other
    /// advances the chapter index and waits in `ChapterTransition`.
    pub fn complete_chapter(&mut self, modes: &mut ModeMachine, clock: &dyn Clock) -> ChapterOutcome {
        let finished = self.chapter;
        self.completion_check = None;
        if finished >= self.chapter_count {
            self.outbox.record(
                ProgressionEventKind::ChapterCompleted(ChapterCompleted {
                    chapter: finished,
                    next_chapter: None,
                }),
                self.correlation_id,
                clock,
            );
            self.outbox
                .record(ProgressionEventKind::Victory, self.correlation_id, clock);
            modes.set_mode(GameMode::Victory);
            info!(chapter = finished, "campaign complete");
            return ChapterOutcome::Victory;
        }

        let next = finished + 1;
        self.chapter = next;
        self.outbox.record(
            ProgressionEventKind::ChapterCompleted(ChapterCompleted {
                chapter: finished,
                next_chapter: Some(next),
            }),
            self.correlation_id,
            clock,
        );
        modes.set_mode(GameMode::ChapterTransition);
        info!(chapter = finished, next, "chapter complete");
        ChapterOutcome::Advanced { next }
    }

    /// Restores up to `amount` lives, never beyond the maximum.
    pub fn heal(&mut self, amount: u32, clock: &dyn Clock) -> LifeChange {
        let change = self.lives.heal(amount);
        self.record_life_change(change, clock);
        change
    }

    /// Enters `GameOver` once the pool is empty. Returns whether it did.
    pub fn handle_death(&mut self, modes: &mut ModeMachine) -> bool {
        if !self.lives.is_depleted() {
            return false;
        }
        self.completion_check = None;
        modes.set_mode(GameMode::GameOver);
        info!(chapter = self.chapter, "game over");
        true
    }

    /// Adds `book` to the collection. Returns `false` for a book already
    /// held.
    pub fn collect_book(&mut self, book: &Book, clock: &dyn Clock) -> bool {
        if self.books.contains_key(&book.order) {
            return false;
        }
        self.books.insert(book.order, book.id.clone());
        self.outbox.record(
            ProgressionEventKind::BookCollected(BookCollected {
                book_id: book.id.clone(),
                order: book.order,
            }),
            self.correlation_id,
            clock,
        );
        true
    }

    /// Runs the completion check after `delay` seconds. A pending check is
    /// restarted.
    pub fn schedule_completion_check(&mut self, delay: f32) {
        self.completion_check = Some(Countdown::new(delay));
    }

    /// Advances the pending completion check by `dt` seconds.
    pub fn update(&mut self, dt: f32, clock: &dyn Clock) {
        if !self.completion_check.as_mut().is_some_and(|timer| timer.tick(dt)) {
            return;
        }
        self.completion_check = None;
        let complete = self.is_chapter_complete();
        self.outbox.record(
            ProgressionEventKind::CompletionCheckDue(CompletionCheckDue {
                chapter: self.chapter,
                complete,
            }),
            self.correlation_id,
            clock,
        );
    }

    /// Whether every book the current chapter requires is collected.
    #[must_use]
    pub fn is_chapter_complete(&self) -> bool {
        self.required.iter().all(|order| self.books.contains_key(order))
    }

    /// Starts a fresh run from `settings`: chapter 1, full lives, no books.
    pub fn restart(&mut self, settings: &GameSettings, chapter_count: u32, clock: &dyn Clock) {
        self.chapter = 1;
        self.chapter_count = chapter_count.max(1);
        self.lives = Lives::full(settings.max_lives);
        self.books.clear();
        self.required.clear();
        self.completion_check = None;
        self.correlation_id = Uuid::new_v4();
        self.outbox
            .record(ProgressionEventKind::Restarted, self.correlation_id, clock);
    }

    /// Current 1-based chapter.
    #[must_use]
    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    /// Number of chapters in the campaign.
    #[must_use]
    pub fn chapter_count(&self) -> u32 {
        self.chapter_count
    }

    /// Pool capacity.
    #[must_use]
    pub fn max_lives(&self) -> u32 {
        self.lives.max()
    }

    /// Collected book identifiers in order.
    #[must_use]
    pub fn books(&self) -> Vec<&str> {
        self.books.values().map(String::as_str).collect()
    }

    /// Whether a completion check is pending.
    #[must_use]
    pub fn completion_check_pending(&self) -> bool {
        self.completion_check.is_some()
    }

    fn record_life_change(&mut self, change: LifeChange, clock: &dyn Clock) {
        if !change.changed() {
            return;
        }
        self.outbox.record(
            ProgressionEventKind::LivesChanged(LivesChanged {
                before: change.before,
                after: change.after,
                max: self.lives.max(),
            }),
            self.correlation_id,
            clock,
        );
        if change.died {
            self.outbox
                .record(ProgressionEventKind::Died, self.correlation_id, clock);
        }
    }
}

impl LifePool for ProgressionController {
    fn lives(&self) -> u32 {
        self.lives.current()
    }

    /// Removes up to `amount` lives. Damage at zero is a no-op.
    fn take_damage(&mut self, amount: u32, clock: &dyn Clock) -> LifeChange {
        let change = self.lives.damage(amount);
        self.record_life_change(change, clock);
        change
    }
}

impl EventSource for ProgressionController {
    type Event = ProgressionEvent;

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
    use labyrinth_test_support::{FixedClock, book, fixed_clock};
    use proptest::prelude::*;

    use super::*;

    fn setup(chapters: u32) -> (ProgressionController, ModeMachine, FixedClock) {
        (
            ProgressionController::new(Uuid::new_v4(), &GameSettings::default(), chapters),
            ModeMachine::new(GameMode::Roam),
            fixed_clock(),
        )
    }

    fn event_types(progression: &ProgressionController) -> Vec<&'static str> {
        progression
            .pending_events()
            .iter()
            .map(DomainEvent::event_type)
            .collect()
    }

    #[test]
    fn test_begin_chapter_rejects_unknown_number() {
        let (mut progression, _, clock) = setup(2);

        let result = progression.begin_chapter(3, [], &clock);

        assert_eq!(result, Err(DomainError::UnknownChapter(3)));
        assert_eq!(progression.chapter(), 1);
    }

    #[test]
    fn test_complete_chapter_advances_into_transition() {
        // Arrange
        let (mut progression, mut modes, clock) = setup(2);
        progression.begin_chapter(1, [], &clock).unwrap();

        // Act
        let outcome = progression.complete_chapter(&mut modes, &clock);

        // Assert
        assert_eq!(outcome, ChapterOutcome::Advanced { next: 2 });
        assert_eq!(progression.chapter(), 2);
        assert_eq!(modes.current(), GameMode::ChapterTransition);
    }

    #[test]
    fn test_completing_last_chapter_is_victory() {
        let (mut progression, mut modes, clock) = setup(2);
        progression.begin_chapter(2, [], &clock).unwrap();

        let outcome = progression.complete_chapter(&mut modes, &clock);

        assert_eq!(outcome, ChapterOutcome::Victory);
        assert_eq!(modes.current(), GameMode::Victory);
        assert!(event_types(&progression).contains(&"progression.victory"));
    }

    #[test]
    fn test_damage_to_zero_reports_death_once() {
        // Arrange
        let (mut progression, mut modes, clock) = setup(1);

        // Act
        for _ in 0..5 {
            progression.take_damage(1, &clock);
        }
        let entered = progression.handle_death(&mut modes);

        // Assert
        assert!(entered);
        assert_eq!(progression.lives(), 0);
        assert_eq!(modes.current(), GameMode::GameOver);
        let types = event_types(&progression);
        assert_eq!(types.iter().filter(|t| **t == "progression.died").count(), 1);
        assert_eq!(types.iter().filter(|t| **t == "progression.lives_changed").count(), 3);
    }

    #[test]
    fn test_handle_death_with_lives_left_is_noop() {
        let (mut progression, mut modes, _) = setup(1);

        assert!(!progression.handle_death(&mut modes));
        assert_eq!(modes.current(), GameMode::Roam);
    }

    #[test]
    fn test_heal_is_clamped_and_silent_at_max() {
        let (mut progression, _, clock) = setup(1);

        let change = progression.heal(2, &clock);

        assert!(!change.changed());
        assert!(progression.pending_events().is_empty());
    }

    #[test]
    fn test_collect_book_ignores_duplicates() {
        let (mut progression, _, clock) = setup(1);
        let tome = book("book-a", 4);

        assert!(progression.collect_book(&tome, &clock));
        assert!(!progression.collect_book(&tome, &clock));

        assert_eq!(progression.books(), vec!["book-a"]);
    }

    #[test]
    fn test_books_are_ordered_by_order_index() {
        let (mut progression, _, clock) = setup(1);

        progression.collect_book(&book("late", 9), &clock);
        progression.collect_book(&book("early", 2), &clock);

        assert_eq!(progression.books(), vec!["early", "late"]);
    }

    #[test]
    fn test_completion_check_fires_once_after_delay() {
        // Arrange
        let (mut progression, _, clock) = setup(1);
        progression.begin_chapter(1, [1], &clock).unwrap();
        progression.collect_book(&book("book-a", 1), &clock);
        progression.take_pending_events();

        // Act
        progression.schedule_completion_check(1.0);
        progression.update(0.6, &clock);
        let early = event_types(&progression);
        progression.update(0.6, &clock);
        progression.update(5.0, &clock);

        // Assert
        assert!(early.is_empty());
        let checks: Vec<_> = progression
            .take_pending_events()
            .into_iter()
            .filter_map(|event| match event.kind {
                ProgressionEventKind::CompletionCheckDue(check) => Some(check),
                _ => None,
            })
            .collect();
        assert_eq!(checks.len(), 1);
        assert!(checks[0].complete);
    }

    #[test]
    fn test_chapter_incomplete_until_required_books_collected() {
        let (mut progression, _, clock) = setup(1);
        progression.begin_chapter(1, [1, 2], &clock).unwrap();

        progression.collect_book(&book("a", 1), &clock);

        assert!(!progression.is_chapter_complete());
        progression.collect_book(&book("b", 2), &clock);
        assert!(progression.is_chapter_complete());
    }

    #[test]
    fn test_restart_rereads_defaults() {
        // Arrange
        let (mut progression, mut modes, clock) = setup(2);
        progression.collect_book(&book("a", 1), &clock);
        progression.take_damage(2, &clock);
        let _ = progression.complete_chapter(&mut modes, &clock);
        let settings = GameSettings {
            max_lives: 5,
            ..GameSettings::default()
        };

        // Act
        progression.restart(&settings, 3, &clock);

        // Assert
        assert_eq!(progression.chapter(), 1);
        assert_eq!(progression.chapter_count(), 3);
        assert_eq!(progression.lives(), 5);
        assert_eq!(progression.max_lives(), 5);
        assert!(progression.books().is_empty());
    }

    proptest! {
        #[test]
        fn prop_lives_stay_within_bounds(
            ops in proptest::collection::vec((any::<bool>(), 0u32..5), 0..40),
            max in 1u32..6,
        ) {
            let settings = GameSettings { max_lives: max, ..GameSettings::default() };
            let mut progression = ProgressionController::new(Uuid::new_v4(), &settings, 1);
            let clock = fixed_clock();

            for (damage, amount) in ops {
                let before = progression.lives();
                if damage {
                    progression.take_damage(amount, &clock);
                    if before == 0 {
                        prop_assert_eq!(progression.lives(), 0);
                    }
                } else {
                    progression.heal(amount, &clock);
                }
                prop_assert!(progression.lives() <= max);
            }
        }
    }
}
