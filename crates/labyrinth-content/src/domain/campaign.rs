//! The campaign: every chapter, question and book of a run.

use std::collections::HashSet;

use labyrinth_core::error::DomainError;
use labyrinth_core::ticket::TriggerId;
use serde::{Deserialize, Serialize};

use super::records::{Book, Chapter, Question, TriggerKind, TriggerSpec};
use super::settings::GameSettings;

/// Complete campaign configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Campaign {
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Tuning settings.
    #[serde(default)]
    pub settings: GameSettings,
    /// Collectible books.
    #[serde(default)]
    pub books: Vec<Book>,
    /// Question bank.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Chapters in play order.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Campaign {
    /// Looks up a question by identifier.
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// Looks up a book by identifier.
    #[must_use]
    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Looks up a chapter by number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownChapter` if no chapter has that number.
    pub fn chapter(&self, number: u32) -> Result<&Chapter, DomainError> {
        self.chapters
            .iter()
            .find(|chapter| chapter.number == number)
            .ok_or(DomainError::UnknownChapter(number))
    }

    /// Number of the last chapter.
    #[must_use]
    pub fn last_chapter(&self) -> u32 {
        self.chapters
            .iter()
            .map(|chapter| chapter.number)
            .max()
            .unwrap_or(0)
    }

    /// Looks up a trigger in any chapter.
    #[must_use]
    pub fn trigger(&self, id: &TriggerId) -> Option<&TriggerSpec> {
        self.chapters
            .iter()
            .flat_map(|chapter| chapter.triggers.iter())
            .find(|trigger| &trigger.id == id)
    }

    /// Validates the campaign.
    ///
    /// Structural problems are errors. Missing references (a trigger naming
    /// an unknown question, a chest naming an unknown book) are configuration
    /// gaps the orchestrator degrades around, so they are returned as
    /// warnings instead.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the campaign has no chapters,
    /// chapter numbers are not `1..=n`, trigger identifiers repeat, a
    /// question is malformed, or a tuning value is unusable.
    pub fn validate(&self) -> Result<Vec<String>, DomainError> {
        if self.chapters.is_empty() {
            return Err(DomainError::Configuration(
                "campaign has no chapters".to_owned(),
            ));
        }
        if self.settings.max_lives == 0 {
            return Err(DomainError::Configuration(
                "settings.max_lives must be positive".to_owned(),
            ));
        }
        if self.settings.damage_per_wrong_answer == 0 {
            return Err(DomainError::Configuration(
                "settings.damage_per_wrong_answer must be positive".to_owned(),
            ));
        }
        if self.settings.chars_per_second <= 0.0 {
            return Err(DomainError::Configuration(
                "settings.chars_per_second must be positive".to_owned(),
            ));
        }

        for (expected, chapter) in (1u32..).zip(&self.chapters) {
            if chapter.number != expected {
                return Err(DomainError::Configuration(format!(
                    "chapter numbers must run 1..n in order; found {} at position {expected}",
                    chapter.number
                )));
            }
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            question
                .validate()
                .map_err(|e| DomainError::Configuration(e.to_string()))?;
            if !question_ids.insert(question.id.as_str()) {
                return Err(DomainError::Configuration(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
        }

        let mut trigger_ids = HashSet::new();
        let mut warnings = Vec::new();
        for chapter in &self.chapters {
            for id in &chapter.questions {
                if self.question(id).is_none() {
                    warnings.push(format!(
                        "chapter {} lists unknown question {id}",
                        chapter.number
                    ));
                }
            }
            if let Some(reward) = &chapter.reward {
                if self.book(reward).is_none() {
                    warnings.push(format!(
                        "chapter {} rewards unknown book {reward}",
                        chapter.number
                    ));
                }
            }
            for trigger in &chapter.triggers {
                if !trigger_ids.insert(trigger.id.clone()) {
                    return Err(DomainError::Configuration(format!(
                        "duplicate trigger id {}",
                        trigger.id
                    )));
                }
                warnings.extend(self.trigger_gaps(trigger));
            }
        }
        Ok(warnings)
    }

    fn trigger_gaps(&self, trigger: &TriggerSpec) -> Vec<String> {
        let mut gaps = Vec::new();
        match &trigger.question {
            Some(id) if self.question(id).is_none() => {
                gaps.push(format!("trigger {} references unknown question {id}", trigger.id));
            }
            None => gaps.push(format!("trigger {} has no question", trigger.id)),
            Some(_) => {}
        }
        match trigger.kind {
            TriggerKind::Chest => match &trigger.reward {
                Some(book) if self.book(book).is_none() => {
                    gaps.push(format!("chest {} awards unknown book {book}", trigger.id));
                }
                None => gaps.push(format!("chest {} has no reward", trigger.id)),
                Some(_) => {}
            },
            TriggerKind::Junction if trigger.path.is_none() => {
                gaps.push(format!("junction {} has no path to reveal", trigger.id));
            }
            TriggerKind::Obstacle | TriggerKind::Gate if trigger.removal_animation.is_none() => {
                gaps.push(format!("{} has no removal animation", trigger.id));
            }
            _ => {}
        }
        gaps
    }
}
