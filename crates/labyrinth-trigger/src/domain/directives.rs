//! What a choreography asks the composition root to do.

use labyrinth_content::domain::records::Question;
use labyrinth_core::geometry::Pose;
use labyrinth_core::ticket::Ticket;
use serde::Serialize;

/// A one-shot change to the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldEffect {
    /// Add a book to the collection.
    AwardBook(String),
    /// Play the trigger's removal animation.
    PlayAnimation(String),
    /// Swap a zone to its transformed state.
    TransformZone(String),
    /// Reveal a hidden path.
    RevealPath(String),
}

/// A step the composition root executes on behalf of a trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Take movement away from the player.
    LockControls,
    /// Move the camera to a viewpoint.
    MoveCamera {
        /// Target viewpoint; `None` completes at once.
        target: Option<Pose>,
        /// Transition length in seconds.
        duration: f32,
        /// Completed on arrival.
        ticket: Ticket,
    },
    /// Bring the camera back to the player.
    ReturnCamera {
        /// Transition length in seconds.
        duration: f32,
        /// Completed on arrival; `None` when nobody waits.
        ticket: Option<Ticket>,
    },
    /// Play dialogue lines.
    ShowDialogue {
        /// Lines to show.
        lines: Vec<String>,
        /// Keep the current mode after the last line.
        stay_in_ui: bool,
        /// Completed when the dialogue ends.
        ticket: Ticket,
    },
    /// Open a question session.
    AskQuestion {
        /// The question to show.
        question: Box<Question>,
        /// Resolved when the session closes.
        ticket: Ticket,
    },
    /// Change the world.
    Mutate(WorldEffect),
    /// Run the chapter-completion check after the configured delay.
    ScheduleCompletionCheck,
    /// Enable or disable the trigger's interaction prompt.
    SetInteractionEnabled(bool),
    /// Show or hide the junction compass.
    SetCompassAvailable(bool),
    /// Give movement back to the player.
    ReleaseControls {
        /// Return to `Roam` as well; `false` when the run was aborted and
        /// someone else owns the mode.
        restore_roam: bool,
    },
}

/// A finished request routed back to the trigger that issued its ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The camera transition ended. `moved` is `false` when there was
    /// nothing to move to.
    CameraArrived {
        /// Whether the camera actually left its previous place.
        moved: bool,
    },
    /// The dialogue finished.
    DialogueFinished,
    /// A newer dialogue replaced this one.
    DialogueSuperseded,
    /// The question closed.
    QuestionResolved {
        /// Whether it was answered correctly.
        correct: bool,
    },
    /// The question was refused because another one is open.
    QuestionRejected,
}
