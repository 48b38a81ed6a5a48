//! Query handlers for the Progression context.

use labyrinth_core::life::LifePool;
use serde::Serialize;

use crate::domain::aggregates::ProgressionController;

/// Read-only view of the run's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    /// Current 1-based chapter.
    pub chapter: u32,
    /// Number of chapters.
    pub chapter_count: u32,
    /// Lives left.
    pub lives: u32,
    /// Pool capacity.
    pub max_lives: u32,
    /// Collected book identifiers in order.
    pub books: Vec<String>,
    /// Whether the current chapter's books are all collected.
    pub chapter_complete: bool,
}

/// Returns the current progress.
#[must_use]
pub fn get_progress_view(progression: &ProgressionController) -> ProgressView {
    ProgressView {
        chapter: progression.chapter(),
        chapter_count: progression.chapter_count(),
        lives: progression.lives(),
        max_lives: progression.max_lives(),
        books: progression.books().into_iter().map(str::to_owned).collect(),
        chapter_complete: progression.is_chapter_complete(),
    }
}

#[cfg(test)]
mod tests {
    use labyrinth_content::domain::settings::GameSettings;
    use labyrinth_test_support::fixed_clock;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_view_reports_lives_and_chapter() {
        let clock = fixed_clock();
        let mut progression = ProgressionController::new(Uuid::new_v4(), &GameSettings::default(), 4);
        progression.take_damage(1, &clock);

        let view = get_progress_view(&progression);

        assert_eq!(view.chapter, 1);
        assert_eq!(view.chapter_count, 4);
        assert_eq!(view.lives, 2);
        assert_eq!(view.max_lives, 3);
        assert!(view.chapter_complete);
    }
}
