//! Reference records: questions, books, chapters and interactive objects.

use labyrinth_core::error::DomainError;
use labyrinth_core::geometry::Pose;
use labyrinth_core::ticket::TriggerId;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of answer options a question may offer.
pub const MAX_ANSWERS: usize = 3;

/// Selects the post-answer presentation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Correct answers show a short key flourish and close on their own.
    Gate,
    /// Obstacle in the way.
    Obstacle,
    /// Path choice at a junction.
    Junction,
    /// Locked chest.
    Chest,
}

/// Per-outcome feedback text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Shown after a correct answer.
    #[serde(default)]
    pub correct: String,
    /// Shown briefly after a wrong answer.
    #[serde(default)]
    pub wrong: String,
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier referenced by triggers and chapters.
    pub id: String,
    /// Question text.
    pub text: String,
    /// Answer options, `1..=MAX_ANSWERS`.
    pub answers: Vec<String>,
    /// Zero-based index of the correct option.
    pub correct_index: usize,
    /// Presentation variant.
    pub kind: QuestionKind,
    /// Feedback strings.
    #[serde(default)]
    pub feedback: Feedback,
}

impl Question {
    /// Checks the question's shape.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the text is blank, the answer
    /// count is outside `1..=MAX_ANSWERS`, or the correct index is out of
    /// range.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.text.trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "question {} has no text",
                self.id
            )));
        }
        if self.answers.is_empty() || self.answers.len() > MAX_ANSWERS {
            return Err(DomainError::Validation(format!(
                "question {} must have between 1 and {MAX_ANSWERS} answers, has {}",
                self.id,
                self.answers.len()
            )));
        }
        if self.correct_index >= self.answers.len() {
            return Err(DomainError::Validation(format!(
                "question {} correct index {} is out of range",
                self.id, self.correct_index
            )));
        }
        Ok(())
    }

    /// Whether `option` is the correct answer.
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }
}

/// A collectible book awarded by chests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Stable order index; the collection is keyed by it.
    pub order: u32,
    /// Short description shown in the collection view.
    #[serde(default)]
    pub description: String,
}

/// The kind of interactive object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Awards a book.
    Chest,
    /// Removed by an animation, transforms a zone.
    Obstacle,
    /// An obstacle whose correct answer shows the key flourish.
    Gate,
    /// Reveals a path, transforms a zone. Gated by the compass.
    Junction,
}

/// What starts a choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Entering the trigger volume.
    Enter,
    /// An explicit interact input while inside the volume.
    Interact,
    /// The compass control, available while inside the volume.
    Compass,
}

/// One stage of a choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Take the controls and mark the trigger as processing.
    Arm,
    /// Move the camera to the scripted viewpoint.
    CameraIn,
    /// Dialogue before the question.
    ApproachDialogue,
    /// The question itself.
    Question,
    /// Return the camera to the player.
    CameraOut,
    /// Dialogue after a correct answer.
    ResolutionDialogue,
    /// The terminal world effect.
    WorldMutation,
    /// Hand the controls back.
    Release,
}

/// Default stage order shared by every trigger kind.
pub const DEFAULT_STAGES: [Stage; 8] = [
    Stage::Arm,
    Stage::CameraIn,
    Stage::ApproachDialogue,
    Stage::Question,
    Stage::CameraOut,
    Stage::ResolutionDialogue,
    Stage::WorldMutation,
    Stage::Release,
];

/// Definition of one interactive object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerSpec {
    /// Stable identifier.
    pub id: TriggerId,
    /// Object kind.
    pub kind: TriggerKind,
    /// Question identifier.
    #[serde(default)]
    pub question: Option<String>,
    /// Overrides the kind's default activation.
    #[serde(default)]
    pub activation: Option<Activation>,
    /// Scripted camera viewpoint.
    #[serde(default)]
    pub viewpoint: Option<Pose>,
    /// Camera transition duration; falls back to the campaign setting.
    #[serde(default)]
    pub camera_seconds: Option<f32>,
    /// Lines shown before the question.
    #[serde(default)]
    pub approach_dialogue: Vec<String>,
    /// Lines shown after a correct answer.
    #[serde(default)]
    pub resolution_dialogue: Vec<String>,
    /// Removal animation played on obstacles and gates.
    #[serde(default)]
    pub removal_animation: Option<String>,
    /// Zone transformed on resolution.
    #[serde(default)]
    pub zone: Option<String>,
    /// Path revealed by junctions.
    #[serde(default)]
    pub path: Option<String>,
    /// Book awarded by chests.
    #[serde(default)]
    pub reward: Option<String>,
    /// Overrides the default stage order.
    #[serde(default)]
    pub stages: Option<Vec<Stage>>,
}

impl TriggerSpec {
    /// Creates a spec with every optional field empty.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: TriggerKind) -> Self {
        Self {
            id: TriggerId::new(id),
            kind,
            question: None,
            activation: None,
            viewpoint: None,
            camera_seconds: None,
            approach_dialogue: Vec::new(),
            resolution_dialogue: Vec::new(),
            removal_animation: None,
            zone: None,
            path: None,
            reward: None,
            stages: None,
        }
    }

    /// The effective activation: junctions always use the compass, other
    /// kinds default to entering the volume.
    #[must_use]
    pub fn activation(&self) -> Activation {
        if self.kind == TriggerKind::Junction {
            return Activation::Compass;
        }
        match self.activation {
            Some(Activation::Compass) | None => Activation::Enter,
            Some(other) => other,
        }
    }

    /// The effective stage order. `Arm` always comes first, `Release` always
    /// last, and duplicates are dropped. `WorldMutation` is added before
    /// `Release` when the configured order leaves it out.
    #[must_use]
    pub fn stages(&self) -> Vec<Stage> {
        let configured = self.stages.as_deref().unwrap_or(&DEFAULT_STAGES);
        let mut stages = vec![Stage::Arm];
        for stage in configured {
            if matches!(stage, Stage::Arm | Stage::Release) || stages.contains(stage) {
                continue;
            }
            stages.push(*stage);
        }
        if !stages.contains(&Stage::WorldMutation) {
            stages.push(Stage::WorldMutation);
        }
        stages.push(Stage::Release);
        stages
    }
}

/// A chapter of the campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based chapter number.
    pub number: u32,
    /// Display title.
    pub title: String,
    /// Ordered question set used in this chapter.
    #[serde(default)]
    pub questions: Vec<String>,
    /// Book awarded for finishing the chapter.
    #[serde(default)]
    pub reward: Option<String>,
    /// Lines played before the player gets control.
    #[serde(default)]
    pub intro_dialogue: Vec<String>,
    /// Lines played once the chapter is complete.
    #[serde(default)]
    pub completion_dialogue: Vec<String>,
    /// Interactive objects placed in this chapter.
    #[serde(default)]
    pub triggers: Vec<TriggerSpec>,
}

impl Chapter {
    /// Books that must be collected to complete the chapter: every chest
    /// reward, without duplicates. The chapter's own reward is handed out
    /// on completion and is not required.
    #[must_use]
    pub fn required_books(&self) -> Vec<String> {
        let mut books: Vec<String> = Vec::new();
        let chest_rewards = self
            .triggers
            .iter()
            .filter(|trigger| trigger.kind == TriggerKind::Chest)
            .filter_map(|trigger| trigger.reward.as_ref());
        for book in chest_rewards {
            if !books.contains(book) {
                books.push(book.clone());
            }
        }
        books
    }
}
