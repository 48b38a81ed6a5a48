//! Command handlers for the Progression context.

use labyrinth_core::clock::Clock;
use labyrinth_core::error::DomainError;
use tracing::{debug, info, instrument};

use crate::domain::aggregates::ProgressionController;
use crate::domain::commands::{BeginChapter, CollectBook, ScheduleCompletionCheck};

/// Handles the `BeginChapter` command.
///
/// # Errors
///
/// Returns `DomainError::UnknownChapter` if the chapter does not exist.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, chapter = command.chapter))]
pub fn handle_begin_chapter(
    command: BeginChapter,
    progression: &mut ProgressionController,
    clock: &dyn Clock,
) -> Result<(), DomainError> {
    progression.begin_chapter(command.chapter, command.required_books, clock)
}

/// Handles the `CollectBook` command. Returns whether the book was new.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, book_id = %command.book.id))]
pub fn handle_collect_book(
    command: &CollectBook,
    progression: &mut ProgressionController,
    clock: &dyn Clock,
) -> bool {
    let added = progression.collect_book(&command.book, clock);
    if added {
        info!("book collected");
    } else {
        debug!("book already collected");
    }
    added
}

/// Handles the `ScheduleCompletionCheck` command.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, delay = command.delay))]
pub fn handle_schedule_completion_check(command: &ScheduleCompletionCheck, progression: &mut ProgressionController) {
    progression.schedule_completion_check(command.delay);
}

#[cfg(test)]
mod tests {
    use labyrinth_content::domain::settings::GameSettings;
    use labyrinth_test_support::{book, correlation, fixed_clock};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_collect_then_check_completes_chapter() {
        // Arrange
        let clock = fixed_clock();
        let mut progression = ProgressionController::new(Uuid::new_v4(), &GameSettings::default(), 1);
        let correlation_id = correlation();
        handle_begin_chapter(
            BeginChapter {
                correlation_id,
                chapter: 1,
                required_books: vec![3],
            },
            &mut progression,
            &clock,
        )
        .unwrap();

        // Act
        let added = handle_collect_book(
            &CollectBook {
                correlation_id,
                book: book("book-c", 3),
            },
            &mut progression,
            &clock,
        );
        handle_schedule_completion_check(&ScheduleCompletionCheck { correlation_id, delay: 0.5 }, &mut progression);

        // Assert
        assert!(added);
        assert!(progression.completion_check_pending());
        assert!(progression.is_chapter_complete());
    }

    #[test]
    fn test_begin_unknown_chapter_fails() {
        let clock = fixed_clock();
        let mut progression = ProgressionController::new(Uuid::new_v4(), &GameSettings::default(), 1);

        let result = handle_begin_chapter(
            BeginChapter {
                correlation_id: correlation(),
                chapter: 0,
                required_books: Vec::new(),
            },
            &mut progression,
            &clock,
        );

        assert_eq!(result, Err(DomainError::UnknownChapter(0)));
    }
}
