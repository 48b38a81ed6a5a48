//! Shared harness for the game-flow scenario tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use labyrinth_content::domain::campaign::Campaign;
use labyrinth_core::error::DomainError;
use labyrinth_core::geometry::{Pose, Vec3};
use labyrinth_core::mode::GameMode;
use labyrinth_core::ticket::TriggerId;
use labyrinth_game::game::Game;
use labyrinth_game::input::InputEvent;
use labyrinth_test_support::{RecordingAudio, RecordingSink, RecordingWorld, fixed_clock};
use labyrinth_trigger::domain::aggregates::{EntityTag, TriggerPhase};

/// Simulation step used by `tick`.
pub const STEP: f32 = 0.1;

/// Where the player stands in every scenario.
#[must_use]
pub fn player_pose() -> Pose {
    Pose::new(Vec3::new(0.0, 1.7, 0.0), 0.0, 0.0)
}

/// A game wired to recording fakes.
pub struct Harness {
    pub game: Game,
    pub world: RecordingWorld,
    pub audio: RecordingAudio,
    pub sink: RecordingSink,
}

/// Builds a game in `Menu` mode around `campaign`.
pub fn harness(campaign: Campaign) -> Harness {
    let world = RecordingWorld::with_player(player_pose());
    let audio = RecordingAudio::default();
    let sink = RecordingSink::default();
    let game = Game::new(
        campaign,
        Arc::new(fixed_clock()),
        Box::new(world.clone()),
        Box::new(audio.clone()),
        Box::new(sink.clone()),
    );
    Harness {
        game,
        world,
        audio,
        sink,
    }
}

impl Harness {
    /// Sends one input.
    pub fn send(&mut self, input: InputEvent) -> Result<(), DomainError> {
        self.game.handle_input(input)
    }

    /// The player walks into a trigger volume.
    pub fn enter(&mut self, id: &str) {
        self.send(InputEvent::VolumeEntered {
            trigger: TriggerId::new(id),
            tag: EntityTag::Player,
        })
        .unwrap();
    }

    /// The player walks out of a trigger volume.
    pub fn exit(&mut self, id: &str) {
        self.send(InputEvent::VolumeExited {
            trigger: TriggerId::new(id),
            tag: EntityTag::Player,
        })
        .unwrap();
    }

    /// Picks a zero-based answer.
    pub fn answer(&mut self, option: usize) -> Result<(), DomainError> {
        self.send(InputEvent::SelectAnswer(option))
    }

    /// Advances time by `seconds` in fixed steps.
    pub fn tick(&mut self, seconds: f32) {
        let mut elapsed = 0.0;
        while elapsed < seconds {
            self.game.update(STEP);
            elapsed += STEP;
        }
    }

    /// Presses continue until the dialogue panel closes. Returns the number
    /// of presses.
    pub fn read_dialogue(&mut self) -> usize {
        let mut presses = 0;
        while self.game.dialogue().is_active() {
            self.send(InputEvent::Continue).unwrap();
            presses += 1;
            assert!(presses < 100, "dialogue never finished");
        }
        presses
    }

    /// Leaves the menu and reads the first chapter's intro.
    pub fn start(&mut self) {
        self.send(InputEvent::StartGame).unwrap();
        self.read_dialogue();
        assert_eq!(self.game.mode(), GameMode::Roam);
    }

    /// Plays a fixture chest (or obstacle) through a correct first answer.
    pub fn solve(&mut self, id: &str, correct: usize) {
        self.enter(id);
        self.tick(1.2);
        self.read_dialogue();
        self.answer(correct).unwrap();
        self.send(InputEvent::Continue).unwrap();
        self.tick(1.2);
        self.read_dialogue();
    }

    /// Records every mode the game enters from now on.
    pub fn record_modes(&mut self) -> Arc<Mutex<Vec<GameMode>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        self.game.subscribe_mode(move |change| {
            sink.lock().unwrap().push(change.current);
        });
        seen
    }

    /// The phase of a trigger in the active chapter.
    pub fn phase(&self, id: &str) -> TriggerPhase {
        self.game.triggers().get(&TriggerId::new(id)).unwrap().phase()
    }
}
