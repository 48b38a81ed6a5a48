//! Junction compass flow through the game.

mod common;

use labyrinth_core::error::DomainError;
use labyrinth_core::mode::GameMode;
use labyrinth_core::ticket::TriggerId;
use labyrinth_game::input::InputEvent;
use labyrinth_test_support::sample_campaign;
use labyrinth_trigger::domain::aggregates::TriggerPhase;

fn junction() -> TriggerId {
    TriggerId::new("junction-1")
}

#[test]
fn test_compass_becomes_available_only_inside_the_volume() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();

    // Act
    h.enter("junction-1");
    let inside = h.world.compass_available(&junction());
    h.exit("junction-1");

    // Assert
    assert_eq!(inside, Some(true));
    assert_eq!(h.world.compass_available(&junction()), Some(false));
    assert_eq!(h.phase("junction-1"), TriggerPhase::Idle);
}

#[test]
fn test_compass_reveals_path_when_no_question_is_configured() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();
    h.enter("junction-1");

    // Act
    h.send(InputEvent::ActivateCompass(junction())).unwrap();

    // Assert
    assert_eq!(h.world.paths(), vec!["path-junction-1"]);
    assert_eq!(h.world.zones(), vec!["zone-junction-1"]);
    assert_eq!(h.sink.count("question.presented"), 0);
    assert_eq!(h.sink.count("trigger.configuration_gap"), 1);
    assert_eq!(h.phase("junction-1"), TriggerPhase::Resolved);
    assert!(!h.game.controls_locked());
    assert_eq!(h.world.compass_available(&junction()), Some(false));
    assert_eq!(h.game.mode(), GameMode::Roam);
}

#[test]
fn test_compass_outside_the_volume_does_nothing() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();

    // Act
    let result = h.send(InputEvent::ActivateCompass(junction()));

    // Assert
    assert!(result.is_ok());
    assert!(h.world.paths().is_empty());
    assert_eq!(h.phase("junction-1"), TriggerPhase::Idle);
}

#[test]
fn test_compass_for_unknown_trigger_is_an_error() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();

    // Act
    let result = h.send(InputEvent::ActivateCompass(TriggerId::new("nowhere")));

    // Assert
    assert!(matches!(result, Err(DomainError::UnknownTrigger(_))));
}
