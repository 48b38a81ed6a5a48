//! Obstacle and gate choreographies driven through the game.

mod common;

use labyrinth_core::mode::GameMode;
use labyrinth_core::ticket::TriggerId;
use labyrinth_game::input::InputEvent;
use labyrinth_question::domain::aggregates::QuestionPhase;
use labyrinth_test_support::sample_campaign;
use labyrinth_trigger::domain::aggregates::TriggerPhase;

#[test]
fn test_obstacle_walks_through_modes_and_keeps_movement_locked() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();
    let modes = h.record_modes();
    let controls_before = h.world.control_history().len();

    // Act
    h.solve("rock-1", 1);

    // Assert
    assert_eq!(
        *modes.lock().unwrap(),
        vec![GameMode::Dialogue, GameMode::Question, GameMode::Dialogue, GameMode::Roam]
    );
    let history = h.world.control_history();
    let during = &history[controls_before..];
    let (last, locked) = during.split_last().unwrap();
    assert!(!locked.is_empty());
    assert!(locked.iter().all(|caps| !caps.movement));
    assert!(last.movement);
    assert!(last.look);
}

#[test]
fn test_obstacle_removal_plays_animation_and_transforms_zone() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();

    // Act
    h.solve("rock-1", 1);

    // Assert
    assert_eq!(h.world.animations(), vec!["crumble"]);
    assert_eq!(h.world.zones(), vec!["zone-rock-1"]);
    assert_eq!(h.phase("rock-1"), TriggerPhase::Resolved);
    assert_eq!(h.world.interaction_enabled(&TriggerId::new("rock-1")), Some(false));
    assert!(!h.game.progression().completion_check_pending());
}

#[test]
fn test_trigger_entered_twice_mutates_world_once() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();

    // Act: bounce in and out while the first run is underway, finish it,
    // then come back.
    h.enter("rock-1");
    h.exit("rock-1");
    h.enter("rock-1");
    h.tick(1.2);
    h.read_dialogue();
    h.answer(1).unwrap();
    h.send(InputEvent::Continue).unwrap();
    h.tick(1.2);
    h.read_dialogue();
    h.exit("rock-1");
    h.enter("rock-1");

    // Assert
    assert_eq!(h.world.animations().len(), 1);
    assert_eq!(h.world.zones().len(), 1);
    assert_eq!(h.sink.count("trigger.activated"), 1);
    assert_eq!(h.sink.count("trigger.resolved"), 1);
    assert_eq!(h.game.mode(), GameMode::Roam);
}

#[test]
fn test_gate_flourish_closes_the_question_without_continue() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();
    h.enter("gate-1");
    h.tick(1.2);
    h.read_dialogue();

    // Act
    h.answer(1).unwrap();

    // Assert
    assert_eq!(h.game.arbiter().phase(), Some(QuestionPhase::Flourish));
    assert_eq!(h.sink.count("question.flourish_started"), 1);

    // Act: the flourish runs out, then the camera comes home.
    h.tick(1.6);
    assert!(!h.game.arbiter().is_open());
    h.tick(1.2);
    h.read_dialogue();

    // Assert
    assert_eq!(h.phase("gate-1"), TriggerPhase::Resolved);
    assert_eq!(h.world.zones(), vec!["zone-gate-1"]);
    assert_eq!(h.game.mode(), GameMode::Roam);
}

#[test]
fn test_wrong_answer_keeps_same_question_open() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();
    h.enter("rock-1");
    h.tick(1.2);
    h.read_dialogue();

    // Act
    h.answer(0).unwrap();
    let repeated = h.answer(0);
    h.tick(2.5);

    // Assert
    assert!(repeated.is_err());
    assert_eq!(h.game.arbiter().question().unwrap().id, "q-rock");
    assert_eq!(h.game.arbiter().attempts(), 1);
    assert!(!h.game.arbiter().feedback_visible());
    assert_eq!(h.game.mode(), GameMode::Question);
    assert_eq!(h.sink.count("question.feedback_cleared"), 1);
}
