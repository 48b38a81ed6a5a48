//! Query handlers for the Question context.

use serde::Serialize;

use crate::domain::aggregates::{QuestionArbiter, QuestionPhase};

/// Read-only view of the question panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// The question identifier.
    pub question_id: String,
    /// The question text.
    pub text: String,
    /// Answer options with whether each was already marked wrong.
    pub answers: Vec<AnswerView>,
    /// `awaiting_answer`, `flourish` or `awaiting_continue`.
    pub phase: &'static str,
    /// Answers given so far.
    pub attempts: u32,
    /// Whether wrong feedback is visible.
    pub feedback_visible: bool,
}

/// One answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerView {
    /// Option label.
    pub label: String,
    /// Whether the option was marked wrong.
    pub marked_wrong: bool,
}

/// Returns the open question, if any.
#[must_use]
pub fn get_question_view(arbiter: &QuestionArbiter) -> Option<QuestionView> {
    let question = arbiter.question()?;
    let phase = arbiter.phase()?;
    let wrong = arbiter.wrong_options();
    Some(QuestionView {
        question_id: question.id.clone(),
        text: question.text.clone(),
        answers: question
            .answers
            .iter()
            .enumerate()
            .map(|(index, label)| AnswerView {
                label: label.clone(),
                marked_wrong: wrong.contains(&index),
            })
            .collect(),
        phase: match phase {
            QuestionPhase::AwaitingAnswer => "awaiting_answer",
            QuestionPhase::Flourish => "flourish",
            QuestionPhase::AwaitingContinue => "awaiting_continue",
        },
        attempts: arbiter.attempts(),
        feedback_visible: arbiter.feedback_visible(),
    })
}
