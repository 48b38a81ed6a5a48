//! Command handlers for the Trigger context.
//!
//! `can_start` tells the trigger whether a new choreography may begin; the
//! composition root decides it from the game mode and the control lock.

use labyrinth_core::clock::Clock;
use labyrinth_core::command::Command;
use labyrinth_core::error::DomainError;
use tracing::instrument;

use crate::domain::commands::{ActivateCompass, EnterVolume, ExitVolume, Interact};
use crate::domain::directives::Directive;
use crate::domain::registry::TriggerRegistry;

/// Handles the `EnterVolume` command.
///
/// # Errors
///
/// Returns `DomainError::UnknownTrigger` if the trigger does not exist.
#[instrument(skip_all, fields(command = command.command_type(), correlation_id = %command.correlation_id, trigger_id = %command.trigger_id))]
pub fn handle_enter_volume(
    command: &EnterVolume,
    registry: &mut TriggerRegistry,
    can_start: bool,
    clock: &dyn Clock,
) -> Result<Vec<Directive>, DomainError> {
    let trigger = registry.get_mut(&command.trigger_id)?;
    Ok(trigger.on_volume_entered(command.tag, can_start, clock))
}

/// Handles the `ExitVolume` command.
///
/// # Errors
///
/// Returns `DomainError::UnknownTrigger` if the trigger does not exist.
#[instrument(skip_all, fields(command = command.command_type(), correlation_id = %command.correlation_id, trigger_id = %command.trigger_id))]
pub fn handle_exit_volume(command: &ExitVolume, registry: &mut TriggerRegistry) -> Result<Vec<Directive>, DomainError> {
    let trigger = registry.get_mut(&command.trigger_id)?;
    Ok(trigger.on_volume_exited(command.tag))
}

/// Handles the `Interact` command.
///
/// # Errors
///
/// Returns `DomainError::UnknownTrigger` if the trigger does not exist.
#[instrument(skip_all, fields(command = command.command_type(), correlation_id = %command.correlation_id, trigger_id = %command.trigger_id))]
pub fn handle_interact(
    command: &Interact,
    registry: &mut TriggerRegistry,
    can_start: bool,
    clock: &dyn Clock,
) -> Result<Vec<Directive>, DomainError> {
    let trigger = registry.get_mut(&command.trigger_id)?;
    Ok(trigger.on_interact(can_start, clock))
}

/// Handles the `ActivateCompass` command.
///
/// # Errors
///
/// Returns `DomainError::UnknownTrigger` if the trigger does not exist.
#[instrument(skip_all, fields(command = command.command_type(), correlation_id = %command.correlation_id, trigger_id = %command.trigger_id))]
pub fn handle_activate_compass(
    command: &ActivateCompass,
    registry: &mut TriggerRegistry,
    can_start: bool,
    clock: &dyn Clock,
) -> Result<Vec<Directive>, DomainError> {
    let trigger = registry.get_mut(&command.trigger_id)?;
    Ok(trigger.on_compass_activated(can_start, clock))
}
