//! Typed lookup of the triggers placed in a chapter.

use std::collections::BTreeMap;

use labyrinth_content::domain::campaign::Campaign;
use labyrinth_content::domain::records::Chapter;
use labyrinth_core::clock::Clock;
use labyrinth_core::error::DomainError;
use labyrinth_core::ticket::TriggerId;

use super::aggregates::Trigger;
use super::directives::Directive;

/// Every trigger of the current chapter, keyed by identifier.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    triggers: BTreeMap<TriggerId, Trigger>,
}

impl TriggerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the triggers of `chapter`, resolving question references
    /// against `campaign`.
    #[must_use]
    pub fn for_chapter(chapter: &Chapter, campaign: &Campaign) -> Self {
        let mut registry = Self::new();
        for spec in &chapter.triggers {
            let question = spec
                .question
                .as_deref()
                .and_then(|id| campaign.question(id))
                .cloned();
            registry.insert(Trigger::new(spec.clone(), question, campaign.settings.camera_seconds));
        }
        registry
    }

    /// Adds a trigger, replacing any with the same identifier.
    pub fn insert(&mut self, trigger: Trigger) {
        self.triggers.insert(trigger.id().clone(), trigger);
    }

    /// Looks up a trigger.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownTrigger` if no trigger has that id.
    pub fn get(&self, id: &TriggerId) -> Result<&Trigger, DomainError> {
        self.triggers
            .get(id)
            .ok_or_else(|| DomainError::UnknownTrigger(id.to_string()))
    }

    /// Looks up a trigger for mutation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownTrigger` if no trigger has that id.
    pub fn get_mut(&mut self, id: &TriggerId) -> Result<&mut Trigger, DomainError> {
        self.triggers
            .get_mut(id)
            .ok_or_else(|| DomainError::UnknownTrigger(id.to_string()))
    }

    /// Iterates over every trigger in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.values()
    }

    /// Iterates mutably over every trigger in identifier order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Trigger> {
        self.triggers.values_mut()
    }

    /// Number of triggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Whether there are no triggers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Whether any trigger is mid-run.
    #[must_use]
    pub fn any_processing(&self) -> bool {
        self.triggers.values().any(Trigger::is_processing)
    }

    /// Resets every trigger, returning each one's directives.
    pub fn reset_all(&mut self, clock: &dyn Clock) -> Vec<(TriggerId, Vec<Directive>)> {
        self.triggers
            .iter_mut()
            .map(|(id, trigger)| (id.clone(), trigger.reset(clock)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use labyrinth_test_support::{fixed_clock, sample_campaign};

    use super::*;
    use crate::domain::aggregates::{EntityTag, TriggerPhase};

    #[test]
    fn test_for_chapter_builds_every_trigger() {
        // Arrange
        let campaign = sample_campaign();
        let chapter = campaign.chapter(1).unwrap();

        // Act
        let registry = TriggerRegistry::for_chapter(chapter, &campaign);

        // Assert
        assert_eq!(registry.len(), 4);
        assert!(registry.get(&"gate-1".into()).is_ok());
    }

    #[test]
    fn test_unknown_trigger_is_an_error() {
        let registry = TriggerRegistry::new();

        let result = registry.get(&"nowhere".into());

        assert_eq!(
            result.err(),
            Some(DomainError::UnknownTrigger("nowhere".to_owned()))
        );
    }

    #[test]
    fn test_reset_all_returns_triggers_to_idle() {
        // Arrange
        let clock = fixed_clock();
        let campaign = sample_campaign();
        let mut registry = TriggerRegistry::for_chapter(campaign.chapter(1).unwrap(), &campaign);
        registry
            .get_mut(&"rock-1".into())
            .unwrap()
            .on_volume_entered(EntityTag::Player, true, &clock);
        assert!(registry.any_processing());

        // Act
        let directives = registry.reset_all(&clock);

        // Assert
        assert_eq!(directives.len(), 4);
        assert!(!registry.any_processing());
        assert!(registry.iter().all(|trigger| trigger.phase() == TriggerPhase::Idle));
    }
}
