//! Menu, pause, skip and restart handling.

mod common;

use labyrinth_core::error::DomainError;
use labyrinth_core::life::LifePool;
use labyrinth_core::mode::GameMode;
use labyrinth_core::ticket::TriggerId;
use labyrinth_game::input::InputEvent;
use labyrinth_test_support::sample_campaign;
use labyrinth_trigger::domain::aggregates::EntityTag;

#[test]
fn test_menu_rejects_gameplay_input() {
    // Arrange
    let mut h = common::harness(sample_campaign());

    // Act
    let continued = h.send(InputEvent::Continue);
    let restarted = h.send(InputEvent::Restart);
    let entered = h.send(InputEvent::VolumeEntered {
        trigger: TriggerId::new("chest-1"),
        tag: EntityTag::Player,
    });

    // Assert
    assert!(matches!(continued, Err(DomainError::Rejected(_))));
    assert!(matches!(restarted, Err(DomainError::Rejected(_))));
    assert!(matches!(entered, Err(DomainError::UnknownTrigger(_))));
    assert_eq!(h.game.mode(), GameMode::Menu);
    assert!(!h.game.capabilities().cursor_locked);
}

#[test]
fn test_start_game_plays_intro_then_hands_over_control() {
    // Arrange
    let mut h = common::harness(sample_campaign());

    // Act
    h.send(InputEvent::StartGame).unwrap();

    // Assert
    assert_eq!(h.game.mode(), GameMode::Dialogue);
    assert_eq!(h.game.dialogue().full_text(), Some("Chapter 1 begins."));
    assert!(!h.game.capabilities().movement);
    assert!(h.send(InputEvent::StartGame).is_err());

    h.read_dialogue();
    assert_eq!(h.game.mode(), GameMode::Roam);
    assert!(h.game.capabilities().movement);
    assert_eq!(h.sink.count("game.mode_changed"), 2);
    assert_eq!(h.sink.count("progression.chapter_started"), 1);
}

#[test]
fn test_pause_freezes_dialogue_until_resume() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.send(InputEvent::StartGame).unwrap();
    h.tick(0.2);
    let before = h.game.dialogue().visible_text().map(str::to_owned);

    // Act
    h.send(InputEvent::Pause).unwrap();
    h.tick(1.0);
    let continued = h.send(InputEvent::Continue);

    // Assert
    assert_eq!(h.game.mode(), GameMode::Paused);
    assert_eq!(h.game.dialogue().visible_text().map(str::to_owned), before);
    assert!(continued.is_err());
    assert!(!h.game.capabilities().cursor_locked);

    // Act
    h.send(InputEvent::Resume).unwrap();

    // Assert
    assert_eq!(h.game.mode(), GameMode::Dialogue);
    assert!(h.game.dialogue().is_typing());
}

#[test]
fn test_resume_is_rejected_unless_paused() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();

    // Act
    let result = h.send(InputEvent::Resume);

    // Assert
    assert!(result.is_err());
    assert_eq!(h.game.mode(), GameMode::Roam);
}

#[test]
fn test_skip_reveals_the_line_without_advancing() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.send(InputEvent::StartGame).unwrap();

    // Act
    h.send(InputEvent::Skip).unwrap();

    // Assert
    assert!(!h.game.dialogue().is_typing());
    assert_eq!(h.game.dialogue().visible_text(), Some("Chapter 1 begins."));
    assert!(h.game.dialogue().is_active());
}

#[test]
fn test_restart_during_question_resolves_it_and_refills_lives() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();
    h.enter("chest-1");
    h.tick(1.2);
    h.read_dialogue();
    h.answer(0).unwrap();
    assert_eq!(h.game.progression().lives(), 2);

    // Act
    h.send(InputEvent::Restart).unwrap();

    // Assert
    assert_eq!(h.sink.count("question.resolved"), 1);
    assert!(!h.game.arbiter().is_open());
    assert_eq!(h.game.progression().lives(), 3);
    assert!(!h.game.controls_locked());
    assert_eq!(h.game.mode(), GameMode::Dialogue);
    assert_eq!(h.sink.count("trigger.resolved"), 0);

    h.read_dialogue();
    h.tick(0.2);
    assert!(h.game.camera().is_attached());
    assert_eq!(h.world.last_camera_pose(), Some(common::player_pose()));
}

#[test]
fn test_mode_observer_stops_after_unsubscribe() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    let seen = std::sync::Arc::new(std::sync::Mutex::new(0_u32));
    let counter = std::sync::Arc::clone(&seen);
    let id = h.game.subscribe_mode(move |_| *counter.lock().unwrap() += 1);

    // Act
    h.send(InputEvent::StartGame).unwrap();
    assert!(h.game.unsubscribe_mode(id));
    h.read_dialogue();

    // Assert
    assert_eq!(*seen.lock().unwrap(), 1);
    assert_eq!(h.game.mode(), GameMode::Roam);
}

#[test]
fn test_status_view_serializes_current_state() {
    // Arrange
    let mut h = common::harness(sample_campaign());
    h.start();
    h.enter("rock-1");

    // Act
    let view = serde_json::to_value(h.game.view()).unwrap();

    // Assert
    assert_eq!(view["mode"], "Roam");
    assert_eq!(view["progress"]["lives"], 3);
    assert_eq!(view["triggers"].as_array().map(Vec::len), Some(4));
}
