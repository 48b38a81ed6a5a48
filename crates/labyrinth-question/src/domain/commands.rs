//! Commands for the Question context.

use labyrinth_content::domain::records::Question;
use labyrinth_core::command::Command;
use labyrinth_core::ticket::Ticket;
use uuid::Uuid;

/// Command to open a question session.
#[derive(Debug, Clone)]
pub struct AskQuestion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The question to show.
    pub question: Question,
    /// Continuation resolved when the question closes.
    pub ticket: Option<Ticket>,
}

impl Command for AskQuestion {
    fn command_type(&self) -> &'static str {
        "question.ask"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command issued when the player picks an option.
#[derive(Debug, Clone)]
pub struct SelectAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Zero-based option index.
    pub option: usize,
}

impl Command for SelectAnswer {
    fn command_type(&self) -> &'static str {
        "question.select_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command issued when the player dismisses the success panel.
#[derive(Debug, Clone)]
pub struct ContinueQuestion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ContinueQuestion {
    fn command_type(&self) -> &'static str {
        "question.continue"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
