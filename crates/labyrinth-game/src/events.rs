//! Events the composition root records about itself.

use labyrinth_core::event::{Envelope, EventKind};
use labyrinth_core::mode::ModeChange;
use labyrinth_core::ports::Capabilities;
use serde::Serialize;

/// Event type emitted for every mode swap.
pub const MODE_CHANGED_EVENT_TYPE: &str = "game.mode_changed";
/// Event type emitted when the capabilities pushed to the world change.
pub const CAPABILITIES_CHANGED_EVENT_TYPE: &str = "game.capabilities_changed";
/// Event type emitted when content the game needs is missing.
pub const CONFIGURATION_GAP_EVENT_TYPE: &str = "game.configuration_gap";

/// Emitted when a content reference cannot be resolved.
#[derive(Debug, Clone, Serialize)]
pub struct GameConfigurationGap {
    /// What was missing.
    pub detail: String,
}

/// Event payload variants for the composition root.
#[derive(Debug, Clone, Serialize)]
pub enum GameEventKind {
    /// The mode machine swapped modes.
    ModeChanged(ModeChange),
    /// Movement, look or cursor state changed.
    CapabilitiesChanged(Capabilities),
    /// A content reference was missing.
    ConfigurationGap(GameConfigurationGap),
}

impl EventKind for GameEventKind {
    fn event_type(&self) -> &'static str {
        match self {
            Self::ModeChanged(_) => MODE_CHANGED_EVENT_TYPE,
            Self::CapabilitiesChanged(_) => CAPABILITIES_CHANGED_EVENT_TYPE,
            Self::ConfigurationGap(_) => CONFIGURATION_GAP_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the composition root.
pub type GameEvent = Envelope<GameEventKind>;
