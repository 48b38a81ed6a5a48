//! Command handlers for the Question context.

use labyrinth_core::clock::Clock;
use labyrinth_core::error::DomainError;
use labyrinth_core::life::LifePool;
use labyrinth_core::mode::ModeMachine;
use tracing::{debug, info, instrument};

use crate::domain::aggregates::{AnswerOutcome, QuestionArbiter};
use crate::domain::commands::{AskQuestion, ContinueQuestion, SelectAnswer};

/// Handles the `AskQuestion` command.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if a question is already open and
/// `DomainError::Validation` if the question is malformed.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, question_id = %command.question.id))]
pub fn handle_ask(
    command: AskQuestion,
    arbiter: &mut QuestionArbiter,
    modes: &mut ModeMachine,
    clock: &dyn Clock,
) -> Result<(), DomainError> {
    arbiter.ask(command.question, command.ticket, modes, clock)?;
    info!("question presented");
    Ok(())
}

/// Handles the `SelectAnswer` command.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if no question is waiting for an answer
/// and `DomainError::Validation` if the option is out of range.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, option = command.option))]
pub fn handle_select_answer(
    command: &SelectAnswer,
    arbiter: &mut QuestionArbiter,
    lives: &mut dyn LifePool,
    clock: &dyn Clock,
) -> Result<AnswerOutcome, DomainError> {
    let outcome = arbiter.select_answer(command.option, lives, clock)?;
    debug!(?outcome, "answer selected");
    Ok(outcome)
}

/// Handles the `ContinueQuestion` command. Returns whether the session
/// closed.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub fn handle_continue(command: &ContinueQuestion, arbiter: &mut QuestionArbiter, clock: &dyn Clock) -> bool {
    arbiter.continue_question(clock)
}
