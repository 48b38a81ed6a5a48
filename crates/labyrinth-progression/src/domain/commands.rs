//! Commands for the Progression context.

use labyrinth_content::domain::records::Book;
use labyrinth_core::command::Command;
use uuid::Uuid;

/// Command to begin a chapter.
#[derive(Debug, Clone)]
pub struct BeginChapter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// 1-based chapter number.
    pub chapter: u32,
    /// Order indices of the books the chapter requires.
    pub required_books: Vec<u32>,
}

impl Command for BeginChapter {
    fn command_type(&self) -> &'static str {
        "progression.begin_chapter"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add a book to the collection.
#[derive(Debug, Clone)]
pub struct CollectBook {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The book awarded.
    pub book: Book,
}

impl Command for CollectBook {
    fn command_type(&self) -> &'static str {
        "progression.collect_book"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to run the chapter-completion check after a delay.
#[derive(Debug, Clone)]
pub struct ScheduleCompletionCheck {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Delay in seconds.
    pub delay: f32,
}

impl Command for ScheduleCompletionCheck {
    fn command_type(&self) -> &'static str {
        "progression.schedule_completion_check"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
