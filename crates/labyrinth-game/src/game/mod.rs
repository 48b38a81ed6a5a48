//! The composition root: owns every service and drives them.

mod chapter;
mod directives;
mod pump;
mod view;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use labyrinth_camera::domain::aggregates::CameraCoordinator;
use labyrinth_content::domain::campaign::Campaign;
use labyrinth_core::clock::Clock;
use labyrinth_core::error::DomainError;
use labyrinth_core::mode::{GameMode, ModeChange, ModeMachine, SubscriptionId};
use labyrinth_core::ports::{AudioLayer, Capabilities, WorldLayer};
use labyrinth_core::sink::EventSink;
use labyrinth_core::source::Outbox;
use labyrinth_core::ticket::{Owner, TicketIssuer, TriggerId};
use labyrinth_dialogue::application::command_handlers as dialogue_handlers;
use labyrinth_dialogue::domain::aggregates::DialogueSequencer;
use labyrinth_dialogue::domain::commands::{ContinueDialogue, SkipTyping};
use labyrinth_progression::domain::aggregates::ProgressionController;
use labyrinth_question::application::command_handlers as question_handlers;
use labyrinth_question::domain::aggregates::{AnswerOutcome, ArbiterSettings, QuestionArbiter, QuestionPhase};
use labyrinth_question::domain::commands::{ContinueQuestion, SelectAnswer};
use labyrinth_trigger::application::command_handlers as trigger_handlers;
use labyrinth_trigger::domain::commands::{ActivateCompass, EnterVolume, ExitVolume, Interact};
use labyrinth_trigger::domain::registry::TriggerRegistry;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::events::GameEventKind;
use crate::input::InputEvent;

use self::chapter::ChapterFlow;
pub use self::view::GameView;

/// Owns the mode machine, every orchestration service, the active
/// chapter's triggers and the external layers.
///
/// Input and time enter through [`Game::handle_input`] and
/// [`Game::update`]. Both finish by pumping: outboxes are drained, every
/// event is published, completions are routed to the owner of their ticket
/// and the directives that produces are executed, until nothing is left.
pub struct Game {
    campaign: Campaign,
    clock: Arc<dyn Clock>,
    modes: ModeMachine,
    dialogue: DialogueSequencer,
    arbiter: QuestionArbiter,
    camera: CameraCoordinator,
    progression: ProgressionController,
    triggers: TriggerRegistry,
    chapter_flow: ChapterFlow,
    tickets: TicketIssuer,
    control_locks: BTreeSet<Owner>,
    question_owner: Option<TriggerId>,
    paused_from: Option<GameMode>,
    capabilities: Option<Capabilities>,
    world: Box<dyn WorldLayer>,
    audio: Box<dyn AudioLayer>,
    sink: Box<dyn EventSink>,
    outbox: Outbox<GameEventKind>,
}

impl Game {
    /// Wires a game in `Menu` mode around `campaign`.
    #[must_use]
    pub fn new(
        campaign: Campaign,
        clock: Arc<dyn Clock>,
        world: Box<dyn WorldLayer>,
        audio: Box<dyn AudioLayer>,
        sink: Box<dyn EventSink>,
    ) -> Self {
        let settings = &campaign.settings;
        let dialogue = DialogueSequencer::new(Uuid::new_v4(), settings.chars_per_second);
        let arbiter = QuestionArbiter::new(Uuid::new_v4(), ArbiterSettings::from(settings));
        let camera = CameraCoordinator::new(Uuid::new_v4(), world.player_viewpoint().unwrap_or_default());
        let progression = ProgressionController::new(Uuid::new_v4(), settings, campaign.last_chapter());

        let mut game = Self {
            campaign,
            clock,
            modes: ModeMachine::new(GameMode::Menu),
            dialogue,
            arbiter,
            camera,
            progression,
            triggers: TriggerRegistry::new(),
            chapter_flow: ChapterFlow::Idle,
            tickets: TicketIssuer::default(),
            control_locks: BTreeSet::new(),
            question_owner: None,
            paused_from: None,
            capabilities: None,
            world,
            audio,
            sink,
            outbox: Outbox::new(Uuid::new_v4()),
        };
        game.audio.select_music(GameMode::Menu);
        game.pump();
        game
    }

    /// Applies one input and pumps until the game is quiet again.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` when the input means nothing in the
    /// current mode or the service it targets refuses it,
    /// `DomainError::Validation` for an out-of-range answer and
    /// `DomainError::UnknownTrigger` for a trigger the chapter does not
    /// hold. The game state is untouched in every case.
    #[instrument(skip_all, fields(input = input.name(), mode = %self.modes.current()))]
    pub fn handle_input(&mut self, input: InputEvent) -> Result<(), DomainError> {
        let result = self.dispatch(input);
        if let Err(err) = &result {
            debug!(%err, "input dropped");
        }
        self.pump();
        result
    }

    /// Advances every timed service by `dt` seconds, then pumps. Time stands
    /// still while paused.
    pub fn update(&mut self, dt: f32) {
        if self.modes.current() == GameMode::Paused {
            return;
        }
        let clock = Arc::clone(&self.clock);
        let clock = clock.as_ref();
        self.dialogue.update(dt, clock);
        self.arbiter.update(dt, clock);
        let player = self.world.player_viewpoint();
        self.camera.update(dt, player, clock);
        self.world.apply_camera_pose(self.camera.pose());
        self.progression.update(dt, clock);
        self.pump();
    }

    /// Registers an observer for every future mode change.
    pub fn subscribe_mode(&mut self, observer: impl FnMut(&ModeChange) + Send + 'static) -> SubscriptionId {
        self.modes.subscribe(observer)
    }

    /// Removes a mode observer.
    pub fn unsubscribe_mode(&mut self, id: SubscriptionId) -> bool {
        self.modes.unsubscribe(id)
    }

    /// The active mode.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.modes.current()
    }

    /// The capabilities last pushed to the world layer.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities.unwrap_or_default()
    }

    /// Whether a control lock is held.
    #[must_use]
    pub fn controls_locked(&self) -> bool {
        !self.control_locks.is_empty()
    }

    /// The loaded campaign.
    #[must_use]
    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    /// The dialogue sequencer.
    #[must_use]
    pub fn dialogue(&self) -> &DialogueSequencer {
        &self.dialogue
    }

    /// The question arbiter.
    #[must_use]
    pub fn arbiter(&self) -> &QuestionArbiter {
        &self.arbiter
    }

    /// The camera coordinator.
    #[must_use]
    pub fn camera(&self) -> &CameraCoordinator {
        &self.camera
    }

    /// The progression controller.
    #[must_use]
    pub fn progression(&self) -> &ProgressionController {
        &self.progression
    }

    /// The active chapter's triggers.
    #[must_use]
    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    fn dispatch(&mut self, input: InputEvent) -> Result<(), DomainError> {
        let mode = self.modes.current();
        if !input.allowed_in(mode) {
            return Err(DomainError::Rejected(format!("{} is not accepted in {mode}", input.name())));
        }
        let clock = Arc::clone(&self.clock);
        let clock = clock.as_ref();

        match input {
            InputEvent::VolumeEntered { trigger, tag } => {
                let command = EnterVolume {
                    correlation_id: Uuid::new_v4(),
                    trigger_id: trigger,
                    tag,
                };
                let can_start = self.can_start();
                let directives = trigger_handlers::handle_enter_volume(&command, &mut self.triggers, can_start, clock)?;
                self.execute(&command.trigger_id, directives);
            }
            InputEvent::VolumeExited { trigger, tag } => {
                let command = ExitVolume {
                    correlation_id: Uuid::new_v4(),
                    trigger_id: trigger,
                    tag,
                };
                let directives = trigger_handlers::handle_exit_volume(&command, &mut self.triggers)?;
                self.execute(&command.trigger_id, directives);
            }
            InputEvent::Interact(trigger) => {
                let command = Interact {
                    correlation_id: Uuid::new_v4(),
                    trigger_id: trigger,
                };
                let can_start = self.can_start();
                let directives = trigger_handlers::handle_interact(&command, &mut self.triggers, can_start, clock)?;
                self.execute(&command.trigger_id, directives);
            }
            InputEvent::ActivateCompass(trigger) => {
                let command = ActivateCompass {
                    correlation_id: Uuid::new_v4(),
                    trigger_id: trigger,
                };
                let can_start = self.can_start();
                let directives =
                    trigger_handlers::handle_activate_compass(&command, &mut self.triggers, can_start, clock)?;
                self.execute(&command.trigger_id, directives);
            }
            InputEvent::SelectAnswer(option) => self.select_answer(option)?,
            InputEvent::Continue => self.continue_pressed()?,
            InputEvent::Skip => {
                let command = SkipTyping {
                    correlation_id: Uuid::new_v4(),
                };
                if !dialogue_handlers::handle_skip(&command, &mut self.dialogue, clock) {
                    debug!("nothing to skip");
                }
            }
            InputEvent::Pause => {
                self.paused_from = Some(mode);
                self.modes.set_mode(GameMode::Paused);
            }
            InputEvent::Resume => {
                let previous = self.paused_from.take().unwrap_or(GameMode::Roam);
                self.modes.set_mode(previous);
            }
            InputEvent::Restart => self.restart()?,
            InputEvent::StartGame => {
                info!(title = %self.campaign.title, "starting game");
                self.start_chapter(1)?;
            }
        }
        Ok(())
    }

    fn select_answer(&mut self, option: usize) -> Result<(), DomainError> {
        let clock = Arc::clone(&self.clock);
        let command = SelectAnswer {
            correlation_id: Uuid::new_v4(),
            option,
        };
        let outcome =
            question_handlers::handle_select_answer(&command, &mut self.arbiter, &mut self.progression, clock.as_ref())?;
        if let AnswerOutcome::Wrong { lives_left } = outcome {
            debug!(lives_left, "wrong answer; question stays open");
            if let Some(owner) = self.question_owner.clone() {
                let directives = self.triggers.get_mut(&owner)?.on_answer_retry(clock.as_ref());
                self.execute(&owner, directives);
            }
        }
        Ok(())
    }

    fn continue_pressed(&mut self) -> Result<(), DomainError> {
        let clock = Arc::clone(&self.clock);
        let clock = clock.as_ref();
        if self.dialogue.is_active() {
            let command = ContinueDialogue {
                correlation_id: Uuid::new_v4(),
            };
            let outcome = dialogue_handlers::handle_continue(&command, &mut self.dialogue, &mut self.modes, clock);
            debug!(?outcome, "dialogue continued");
            return Ok(());
        }
        if self.arbiter.phase() == Some(QuestionPhase::AwaitingContinue) {
            let command = ContinueQuestion {
                correlation_id: Uuid::new_v4(),
            };
            question_handlers::handle_continue(&command, &mut self.arbiter, clock);
            return Ok(());
        }
        if self.modes.current() == GameMode::ChapterTransition {
            return self.start_chapter(self.progression.chapter());
        }
        Err(DomainError::Rejected("nothing to continue".to_owned()))
    }

    fn restart(&mut self) -> Result<(), DomainError> {
        let clock = Arc::clone(&self.clock);
        let clock = clock.as_ref();
        info!("restarting run");
        self.arbiter.abandon(clock);
        self.dialogue.clear(clock);
        let player = self.world.player_viewpoint();
        self.camera.transition_to_player(player, 0.0, None, clock);

        self.drain_triggers();
        self.triggers = TriggerRegistry::new();
        self.control_locks.clear();
        self.question_owner = None;
        self.paused_from = None;
        self.chapter_flow = ChapterFlow::Idle;
        self.progression
            .restart(&self.campaign.settings, self.campaign.last_chapter(), clock);
        // Completions for the abandoned run find nobody waiting.
        self.pump();
        self.modes.set_mode(GameMode::ChapterTransition);
        self.start_chapter(1)
    }

    /// A new choreography may only begin while the player roams freely.
    fn can_start(&self) -> bool {
        self.modes.current() == GameMode::Roam
            && self.control_locks.is_empty()
            && !self.dialogue.is_active()
            && !self.arbiter.is_open()
            && self.chapter_flow == ChapterFlow::Idle
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("campaign", &self.campaign.title)
            .field("mode", &self.modes.current())
            .field("chapter", &self.progression.chapter())
            .field("triggers", &self.triggers.len())
            .field("chapter_flow", &self.chapter_flow)
            .field("control_locks", &self.control_locks)
            .finish_non_exhaustive()
    }
}
