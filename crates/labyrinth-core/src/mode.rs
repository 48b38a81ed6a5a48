//! The game mode authority.
//!
//! Exactly one `GameMode` is active at a time. `ModeMachine` is the only
//! writer; every other service receives it by reference when it needs to
//! change the mode, and collaborators learn about changes through
//! subscriptions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the player may currently do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title menu before a run starts.
    #[default]
    Menu,
    /// Free movement through the labyrinth.
    Roam,
    /// Gameplay suspended by the player.
    Paused,
    /// A question panel is blocking the game.
    Question,
    /// A dialogue panel is blocking the game.
    Dialogue,
    /// Between chapters.
    ChapterTransition,
    /// The life pool ran out.
    GameOver,
    /// The last chapter was completed.
    Victory,
}

impl GameMode {
    /// Movement and look input are only accepted while roaming.
    #[must_use]
    pub fn allows_movement(self) -> bool {
        self == Self::Roam
    }

    /// Whether the mode ends a run until an explicit restart.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }

    /// Whether a UI panel owns the pointer.
    #[must_use]
    pub fn shows_cursor(self) -> bool {
        !self.allows_movement()
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Menu => "menu",
            Self::Roam => "roam",
            Self::Paused => "paused",
            Self::Question => "question",
            Self::Dialogue => "dialogue",
            Self::ChapterTransition => "chapter_transition",
            Self::GameOver => "game_over",
            Self::Victory => "victory",
        };
        f.write_str(name)
    }
}

/// A completed mode swap, delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeChange {
    /// Mode before the swap.
    pub previous: GameMode,
    /// Mode after the swap.
    pub current: GameMode,
}

/// Handle returned by `ModeMachine::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ModeObserver = Box<dyn FnMut(&ModeChange) + Send>;

/// Single authority over the current `GameMode`.
pub struct ModeMachine {
    current: GameMode,
    observers: Vec<(SubscriptionId, ModeObserver)>,
    next_subscription: u64,
    changes: Vec<ModeChange>,
}

impl ModeMachine {
    /// Creates a machine in the given mode.
    #[must_use]
    pub fn new(initial: GameMode) -> Self {
        Self {
            current: initial,
            observers: Vec::new(),
            next_subscription: 0,
            changes: Vec::new(),
        }
    }

    /// Returns the active mode.
    #[must_use]
    pub fn current(&self) -> GameMode {
        self.current
    }

    /// Swaps to `mode` and notifies every subscriber before returning.
    ///
    /// Returns `false` without notifying anyone when `mode` is already
    /// active.
    pub fn set_mode(&mut self, mode: GameMode) -> bool {
        if mode == self.current {
            return false;
        }
        let change = ModeChange {
            previous: self.current,
            current: mode,
        };
        self.current = mode;
        for (_, observer) in &mut self.observers {
            observer(&change);
        }
        self.changes.push(change);
        true
    }

    /// Registers an observer for every future mode change.
    pub fn subscribe(&mut self, observer: impl FnMut(&ModeChange) + Send + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(subscription, _)| *subscription != id);
        self.observers.len() != before
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Drains the log of changes made since the last call.
    pub fn take_changes(&mut self) -> Vec<ModeChange> {
        std::mem::take(&mut self.changes)
    }
}

impl fmt::Debug for ModeMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeMachine")
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .field("changes", &self.changes)
            .finish()
    }
}
