//! Content fixtures shared by the test suites.

use labyrinth_content::domain::campaign::Campaign;
use labyrinth_content::domain::records::{
    Activation, Book, Chapter, Feedback, Question, QuestionKind, TriggerKind, TriggerSpec,
};
use labyrinth_content::domain::settings::GameSettings;
use labyrinth_core::geometry::{Pose, Vec3};
use uuid::Uuid;

/// A fresh correlation ID.
#[must_use]
pub fn correlation() -> Uuid {
    Uuid::new_v4()
}

/// A three-option question whose correct answer is option 1.
#[must_use]
pub fn question(id: &str, kind: QuestionKind) -> Question {
    question_with_answers(id, kind, &["Left", "Right", "Back"], 1)
}

/// A question with explicit answers.
#[must_use]
pub fn question_with_answers(
    id: &str,
    kind: QuestionKind,
    answers: &[&str],
    correct_index: usize,
) -> Question {
    Question {
        id: id.to_owned(),
        text: format!("Question {id}?"),
        answers: answers.iter().map(|answer| (*answer).to_owned()).collect(),
        correct_index,
        kind,
        feedback: Feedback {
            correct: "Well done.".to_owned(),
            wrong: "Not quite.".to_owned(),
        },
    }
}

/// A book with the given order index.
#[must_use]
pub fn book(id: &str, order: u32) -> Book {
    Book {
        id: id.to_owned(),
        title: format!("Book {id}"),
        order,
        description: String::new(),
    }
}

/// A trigger with dialogue on both sides of the question, a viewpoint and
/// every kind-specific field filled in.
#[must_use]
pub fn trigger(id: &str, kind: TriggerKind, question: Option<&str>) -> TriggerSpec {
    let mut spec = TriggerSpec::new(id, kind);
    spec.question = question.map(str::to_owned);
    spec.viewpoint = Some(Pose::new(Vec3::new(0.0, 2.0, 5.0), 180.0, -10.0));
    spec.approach_dialogue = vec![format!("{id} blocks the way."), "Answer to pass.".to_owned()];
    spec.resolution_dialogue = vec![format!("{id} gives way.")];
    match kind {
        TriggerKind::Chest => spec.reward = Some(format!("book-{id}")),
        TriggerKind::Obstacle | TriggerKind::Gate => {
            spec.removal_animation = Some("crumble".to_owned());
            spec.zone = Some(format!("zone-{id}"));
        }
        TriggerKind::Junction => {
            spec.activation = Some(Activation::Compass);
            spec.path = Some(format!("path-{id}"));
            spec.zone = Some(format!("zone-{id}"));
        }
    }
    spec
}

/// A chapter holding the given triggers.
#[must_use]
pub fn chapter(number: u32, triggers: Vec<TriggerSpec>) -> Chapter {
    Chapter {
        number,
        title: format!("Chapter {number}"),
        questions: triggers
            .iter()
            .filter_map(|trigger| trigger.question.clone())
            .collect(),
        reward: None,
        intro_dialogue: vec![format!("Chapter {number} begins.")],
        completion_dialogue: vec![format!("Chapter {number} is done.")],
        triggers,
    }
}

/// Two chapters: the first holds a chest, an obstacle, a gate and a junction
/// without a question; the second holds a single chest.
#[must_use]
pub fn sample_campaign() -> Campaign {
    let chapter_one = chapter(
        1,
        vec![
            trigger("chest-1", TriggerKind::Chest, Some("q-chest")),
            trigger("rock-1", TriggerKind::Obstacle, Some("q-rock")),
            trigger("gate-1", TriggerKind::Gate, Some("q-gate")),
            trigger("junction-1", TriggerKind::Junction, None),
        ],
    );
    let chapter_two = chapter(2, vec![trigger("chest-2", TriggerKind::Chest, Some("q-chest-2"))]);
    Campaign {
        title: "Sample".to_owned(),
        settings: GameSettings::default(),
        books: vec![book("book-chest-1", 1), book("book-chest-2", 2)],
        questions: vec![
            question("q-chest", QuestionKind::Chest),
            question("q-rock", QuestionKind::Obstacle),
            question("q-gate", QuestionKind::Gate),
            question("q-chest-2", QuestionKind::Chest),
        ],
        chapters: vec![chapter_one, chapter_two],
    }
}
