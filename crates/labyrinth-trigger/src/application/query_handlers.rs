//! Query handlers for the Trigger context.

use labyrinth_content::domain::records::TriggerKind;
use labyrinth_core::ticket::TriggerId;
use serde::Serialize;

use crate::domain::aggregates::{Trigger, TriggerPhase};
use crate::domain::registry::TriggerRegistry;

/// Read-only view of one trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerView {
    /// Identifier.
    pub trigger_id: TriggerId,
    /// Object kind.
    pub kind: TriggerKind,
    /// Current phase.
    pub phase: TriggerPhase,
    /// Whether the choreography completed.
    pub cleared: bool,
    /// Whether the world mutation ran.
    pub mutated: bool,
    /// Whether the player is inside the volume.
    pub player_in_range: bool,
    /// Whether the junction compass may be used.
    pub compass_available: bool,
}

impl From<&Trigger> for TriggerView {
    fn from(trigger: &Trigger) -> Self {
        Self {
            trigger_id: trigger.id().clone(),
            kind: trigger.kind(),
            phase: trigger.phase(),
            cleared: trigger.is_cleared(),
            mutated: trigger.is_mutated(),
            player_in_range: trigger.player_in_range(),
            compass_available: trigger.compass_available(),
        }
    }
}

/// Returns every trigger in identifier order.
#[must_use]
pub fn list_triggers(registry: &TriggerRegistry) -> Vec<TriggerView> {
    registry.iter().map(TriggerView::from).collect()
}

#[cfg(test)]
mod tests {
    use labyrinth_test_support::sample_campaign;

    use super::*;

    #[test]
    fn test_list_triggers_reports_idle_chapter() {
        let campaign = sample_campaign();
        let registry = TriggerRegistry::for_chapter(campaign.chapter(1).unwrap(), &campaign);

        let views = list_triggers(&registry);

        assert_eq!(views.len(), 4);
        assert!(views.iter().all(|view| view.phase == TriggerPhase::Idle && !view.cleared));
        assert_eq!(views[0].trigger_id.as_str(), "chest-1");
    }
}
