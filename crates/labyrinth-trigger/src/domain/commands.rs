//! Commands for the Trigger context.

use labyrinth_core::command::Command;
use labyrinth_core::ticket::TriggerId;
use uuid::Uuid;

use super::aggregates::EntityTag;

/// Something entered a trigger volume.
#[derive(Debug, Clone)]
pub struct EnterVolume {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The trigger whose volume was entered.
    pub trigger_id: TriggerId,
    /// What entered it.
    pub tag: EntityTag,
}

impl Command for EnterVolume {
    fn command_type(&self) -> &'static str {
        "trigger.enter_volume"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Something left a trigger volume.
#[derive(Debug, Clone)]
pub struct ExitVolume {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The trigger whose volume was left.
    pub trigger_id: TriggerId,
    /// What left it.
    pub tag: EntityTag,
}

impl Command for ExitVolume {
    fn command_type(&self) -> &'static str {
        "trigger.exit_volume"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// The player pressed interact on a trigger.
#[derive(Debug, Clone)]
pub struct Interact {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The trigger.
    pub trigger_id: TriggerId,
}

impl Command for Interact {
    fn command_type(&self) -> &'static str {
        "trigger.interact"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// The player used the compass at a junction.
#[derive(Debug, Clone)]
pub struct ActivateCompass {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The junction.
    pub trigger_id: TriggerId,
}

impl Command for ActivateCompass {
    fn command_type(&self) -> &'static str {
        "trigger.activate_compass"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
