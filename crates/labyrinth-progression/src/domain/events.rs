//! Domain events for the Progression context.

use labyrinth_core::event::{Envelope, EventKind};
use serde::Serialize;

/// Event type emitted when a chapter begins.
pub const CHAPTER_STARTED_EVENT_TYPE: &str = "progression.chapter_started";
/// Event type emitted when a chapter is finished.
pub const CHAPTER_COMPLETED_EVENT_TYPE: &str = "progression.chapter_completed";
/// Event type emitted when the last chapter is finished.
pub const VICTORY_EVENT_TYPE: &str = "progression.victory";
/// Event type emitted when the life pool changes.
pub const LIVES_CHANGED_EVENT_TYPE: &str = "progression.lives_changed";
/// Event type emitted once when the life pool runs out.
pub const DIED_EVENT_TYPE: &str = "progression.died";
/// Event type emitted when a book joins the collection.
pub const BOOK_COLLECTED_EVENT_TYPE: &str = "progression.book_collected";
/// Event type emitted when the delayed completion check runs.
pub const COMPLETION_CHECK_DUE_EVENT_TYPE: &str = "progression.completion_check_due";
/// Event type emitted when a run restarts.
pub const RESTARTED_EVENT_TYPE: &str = "progression.restarted";

/// Emitted when a chapter begins.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterStarted {
    /// 1-based chapter number.
    pub chapter: u32,
    /// Order indices of the books the chapter requires.
    pub required_books: Vec<u32>,
}

/// Emitted when a chapter is finished.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterCompleted {
    /// The finished chapter.
    pub chapter: u32,
    /// The chapter that follows, if any.
    pub next_chapter: Option<u32>,
}

/// Emitted when the life pool changes.
#[derive(Debug, Clone, Serialize)]
pub struct LivesChanged {
    /// Lives before the change.
    pub before: u32,
    /// Lives after the change.
    pub after: u32,
    /// Pool capacity.
    pub max: u32,
}

/// Emitted when a book joins the collection.
#[derive(Debug, Clone, Serialize)]
pub struct BookCollected {
    /// Book identifier.
    pub book_id: String,
    /// Order index the collection is keyed by.
    pub order: u32,
}

/// Emitted when the delayed completion check runs.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionCheckDue {
    /// Chapter being checked.
    pub chapter: u32,
    /// Whether every required book is collected.
    pub complete: bool,
}

/// Event payload variants for the Progression context.
#[derive(Debug, Clone, Serialize)]
pub enum ProgressionEventKind {
    /// A chapter began.
    ChapterStarted(ChapterStarted),
    /// A chapter finished.
    ChapterCompleted(ChapterCompleted),
    /// The campaign is won.
    Victory,
    /// The life pool changed.
    LivesChanged(LivesChanged),
    /// The life pool ran out.
    Died,
    /// A book was collected.
    BookCollected(BookCollected),
    /// The completion check ran.
    CompletionCheckDue(CompletionCheckDue),
    /// The run restarted.
    Restarted,
}

impl EventKind for ProgressionEventKind {
    fn event_type(&self) -> &'static str {
        match self {
            Self::ChapterStarted(_) => CHAPTER_STARTED_EVENT_TYPE,
            Self::ChapterCompleted(_) => CHAPTER_COMPLETED_EVENT_TYPE,
            Self::Victory => VICTORY_EVENT_TYPE,
            Self::LivesChanged(_) => LIVES_CHANGED_EVENT_TYPE,
            Self::Died => DIED_EVENT_TYPE,
            Self::BookCollected(_) => BOOK_COLLECTED_EVENT_TYPE,
            Self::CompletionCheckDue(_) => COMPLETION_CHECK_DUE_EVENT_TYPE,
            Self::Restarted => RESTARTED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Progression context.
pub type ProgressionEvent = Envelope<ProgressionEventKind>;
