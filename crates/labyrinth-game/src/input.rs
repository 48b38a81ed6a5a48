//! Player input and the console command parser.

use std::str::FromStr;

use labyrinth_core::error::DomainError;
use labyrinth_core::mode::GameMode;
use labyrinth_core::ticket::TriggerId;
use labyrinth_trigger::domain::aggregates::EntityTag;

/// Everything the player (or the world, for volumes) can tell the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Something entered a trigger volume.
    VolumeEntered {
        /// The trigger whose volume was entered.
        trigger: TriggerId,
        /// What entered it.
        tag: EntityTag,
    },
    /// Something left a trigger volume.
    VolumeExited {
        /// The trigger whose volume was left.
        trigger: TriggerId,
        /// What left it.
        tag: EntityTag,
    },
    /// The interact control, aimed at a trigger.
    Interact(TriggerId),
    /// The junction compass, aimed at a trigger.
    ActivateCompass(TriggerId),
    /// A zero-based answer choice.
    SelectAnswer(usize),
    /// Advance dialogue, close a success panel, or leave a chapter transition.
    Continue,
    /// Reveal the typing line at once.
    Skip,
    /// Pause the game.
    Pause,
    /// Resume a paused game.
    Resume,
    /// Start over from the first chapter.
    Restart,
    /// Leave the menu.
    StartGame,
}

impl InputEvent {
    /// Short name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::VolumeEntered { .. } => "volume_entered",
            Self::VolumeExited { .. } => "volume_exited",
            Self::Interact(_) => "interact",
            Self::ActivateCompass(_) => "activate_compass",
            Self::SelectAnswer(_) => "select_answer",
            Self::Continue => "continue",
            Self::Skip => "skip",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Restart => "restart",
            Self::StartGame => "start_game",
        }
    }

    /// Whether the input means anything in `mode`. Volume events are always
    /// accepted so triggers keep track of the player's position.
    #[must_use]
    pub fn allowed_in(&self, mode: GameMode) -> bool {
        let playing = matches!(
            mode,
            GameMode::Roam | GameMode::Dialogue | GameMode::Question | GameMode::ChapterTransition
        );
        match self {
            Self::VolumeEntered { .. } | Self::VolumeExited { .. } => true,
            Self::StartGame => mode == GameMode::Menu,
            Self::Resume => mode == GameMode::Paused,
            Self::Restart => mode != GameMode::Menu,
            Self::Interact(_)
            | Self::ActivateCompass(_)
            | Self::SelectAnswer(_)
            | Self::Continue
            | Self::Skip
            | Self::Pause => playing,
        }
    }
}

/// One line typed at the headless driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Forward to the game.
    Input(InputEvent),
    /// Print a snapshot of every service.
    Status,
    /// Stop the driver.
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = DomainError;

    /// Parses `enter <id>`, `exit <id>`, `interact <id>`, `compass <id>`,
    /// `answer <n>` (1-based), `continue`, `skip`, `pause`, `resume`,
    /// `restart`, `start`, `status` and `quit`. A blank line continues.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Input(InputEvent::Continue));
        };
        let argument = words.next();
        if words.next().is_some() {
            return Err(DomainError::Validation(format!("too many arguments: {line}")));
        }

        let input = match (verb.to_ascii_lowercase().as_str(), argument) {
            ("enter", Some(id)) => InputEvent::VolumeEntered {
                trigger: TriggerId::new(id),
                tag: EntityTag::Player,
            },
            ("exit", Some(id)) => InputEvent::VolumeExited {
                trigger: TriggerId::new(id),
                tag: EntityTag::Player,
            },
            ("interact", Some(id)) => InputEvent::Interact(TriggerId::new(id)),
            ("compass", Some(id)) => InputEvent::ActivateCompass(TriggerId::new(id)),
            ("answer", Some(choice)) => InputEvent::SelectAnswer(parse_choice(choice)?),
            ("continue" | "c", None) => InputEvent::Continue,
            ("skip", None) => InputEvent::Skip,
            ("pause", None) => InputEvent::Pause,
            ("resume", None) => InputEvent::Resume,
            ("restart", None) => InputEvent::Restart,
            ("start", None) => InputEvent::StartGame,
            ("status", None) => return Ok(Self::Status),
            ("quit" | "q", None) => return Ok(Self::Quit),
            _ => return Err(DomainError::Validation(format!("unrecognised command: {line}"))),
        };
        Ok(Self::Input(input))
    }
}

fn parse_choice(raw: &str) -> Result<usize, DomainError> {
    match raw.parse::<usize>() {
        Ok(choice) if choice > 0 => Ok(choice - 1),
        _ => Err(DomainError::Validation(format!(
            "answer must be a number starting at 1, got {raw}"
        ))),
    }
}
