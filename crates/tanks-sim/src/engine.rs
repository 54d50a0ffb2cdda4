//! Round engine: the round/screen state machine.
//!
//! `RoundEngine` owns the engine host, the tank roster and the Firestorm
//! scheduler, processes queued commands at tick boundaries and produces a
//! `RoundSnapshot` per tick. It has no UI or engine dependency of its own,
//! so a whole session can be driven headless and deterministically.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, warn};

use tanks_core::commands::RoundCommand;
use tanks_core::config::SessionConfig;
use tanks_core::constants::SPEED_INCREMENT;
use tanks_core::enums::{FirestormActivation, RoundState};
use tanks_core::error::Result;
use tanks_core::events::RoundEvent;
use tanks_core::host::EngineHost;
use tanks_core::state::RoundSnapshot;
use tanks_core::types::SimTime;

use crate::roster::TankRoster;
use crate::systems;
use crate::systems::firestorm::Firestorm;

/// The round state machine and everything it drives.
pub struct RoundEngine<H: EngineHost> {
    host: H,
    roster: TankRoster,
    firestorm: Firestorm,
    state: RoundState,
    time: SimTime,
    rng: ChaCha8Rng,
    end_round_on_player_death: bool,
    command_queue: VecDeque<RoundCommand>,
    events: Vec<RoundEvent>,
    quit_requested: bool,
}

impl<H: EngineHost> RoundEngine<H> {
    /// Create an engine in the main menu. Fails on an unusable config.
    pub fn new(config: &SessionConfig, host: H) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            host,
            roster: TankRoster::from_config(&config.roster)?,
            firestorm: Firestorm::new(config.firestorm.clone()),
            state: RoundState::default(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            end_round_on_player_death: config.end_round_on_player_death,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            quit_requested: false,
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: RoundCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = RoundCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one tick of `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> RoundSnapshot {
        self.process_commands();

        if self.state == RoundState::Playing {
            self.firestorm
                .tick(dt, &mut self.rng, &mut self.host, &mut self.events);
            self.check_player_one();
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            self.state,
            &self.time,
            &self.roster,
            &self.host,
            &self.firestorm,
            events,
        )
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn roster(&self) -> &TankRoster {
        &self.roster
    }

    pub fn firestorm(&self) -> &Firestorm {
        &self.firestorm
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// A quit command has been processed.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// One or fewer tanks remain active.
    pub fn one_tank_left(&self) -> bool {
        self.roster.one_tank_left(&self.host)
    }

    /// The sole remaining active tank's player number, or `None` when the
    /// round is a draw or more than one tank is still in play.
    pub fn round_winner(&self) -> Option<u32> {
        if !self.one_tank_left() {
            return None;
        }
        self.roster
            .round_winner(&self.host)
            .map(|t| t.player_number())
    }

    /// Spawn the roster and begin play. Only valid from the main menu.
    ///
    /// Spawn points are validated before anything is created, so on error
    /// no tank exists and the engine stays in the main menu.
    pub fn start_round(&mut self) -> Result<()> {
        if self.state != RoundState::MainMenu {
            self.ignore(RoundCommand::StartRound);
            return Ok(());
        }

        self.roster.spawn_all(&mut self.host, &mut self.rng)?;

        let targets: Vec<_> = self
            .roster
            .player_one()
            .and_then(|t| t.instance())
            .into_iter()
            .collect();
        self.host.frame_camera(&targets);

        self.roster.reset_all(&mut self.host);
        self.roster.set_control_enabled(&mut self.host, true);
        self.firestorm.arm();

        self.state = RoundState::Playing;
        self.time = SimTime::default();
        self.events.push(RoundEvent::RoundStarted {
            tank_count: self.roster.len() as u32,
        });
        info!(tanks = self.roster.len(), "Round started");
        Ok(())
    }

    /// Stop play and show the end screen. Only valid while playing.
    /// Returns whether the transition happened.
    pub fn end_round(&mut self) -> bool {
        if self.state != RoundState::Playing {
            self.ignore(RoundCommand::EndRound);
            return false;
        }

        self.stop_play();

        let winner = self.round_winner();
        self.state = RoundState::RoundEnd;
        self.events.push(RoundEvent::RoundEnded { winner });
        info!(?winner, "Round ended");
        true
    }

    /// Tear down the roster and reload the session. Valid from every state.
    pub fn return_to_menu(&mut self) {
        if self.state == RoundState::Playing {
            self.stop_play();
        }

        self.roster.teardown(&mut self.host);
        self.firestorm.reset_uses();
        self.host.reload_session();

        self.state = RoundState::MainMenu;
        self.events.push(RoundEvent::ReturnedToMenu);
        info!("Returned to menu");
    }

    /// Disable control and cancel every in-flight Firestorm sequence.
    fn stop_play(&mut self) {
        self.roster.set_control_enabled(&mut self.host, false);
        let shells_discarded = self.firestorm.disarm();
        if shells_discarded > 0 {
            self.events
                .push(RoundEvent::FirestormCancelled { shells_discarded });
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: RoundCommand) {
        match command {
            RoundCommand::StartRound => {
                if let Err(e) = self.start_round() {
                    error!(error = %e, "Round failed to start");
                }
            }
            RoundCommand::EndRound => {
                self.end_round();
            }
            RoundCommand::ReturnToMenu => self.return_to_menu(),
            RoundCommand::IncreaseSpeed => self.increase_speed(),
            RoundCommand::LaunchFirestorm => self.launch_firestorm(),
            RoundCommand::Quit => {
                info!("Quit requested");
                self.host.quit();
                self.quit_requested = true;
            }
        }
    }

    fn increase_speed(&mut self) {
        if self.state != RoundState::Playing {
            self.ignore(RoundCommand::IncreaseSpeed);
            return;
        }
        let Some(handle) = self.roster.player_one().and_then(|t| t.instance()) else {
            return;
        };
        if let Some(speed) = self.host.movement_speed(handle) {
            self.host.set_movement_speed(handle, speed + SPEED_INCREMENT);
        }
    }

    fn launch_firestorm(&mut self) {
        if self.state != RoundState::Playing {
            self.ignore(RoundCommand::LaunchFirestorm);
            return;
        }
        match self.firestorm.activate() {
            FirestormActivation::Started { uses_remaining } => {
                self.events
                    .push(RoundEvent::FirestormStarted { uses_remaining });
            }
            FirestormActivation::Exhausted => {
                warn!("Firestorm exhausted, ending round");
                self.events.push(RoundEvent::FirestormExhausted);
                self.end_round();
            }
            FirestormActivation::Disarmed => self.ignore(RoundCommand::LaunchFirestorm),
        }
    }

    /// End the round on the tick player 1 is destroyed.
    fn check_player_one(&mut self) {
        if !self.end_round_on_player_death {
            return;
        }
        let Some(handle) = self.roster.player_one().and_then(|t| t.instance()) else {
            return;
        };
        let depleted = self
            .host
            .health(handle)
            .is_some_and(|h| h.is_depleted());
        if depleted || !self.host.is_active(handle) {
            self.events.push(RoundEvent::PlayerOneDestroyed);
            self.end_round();
        }
    }

    fn ignore(&mut self, command: RoundCommand) {
        debug!(?command, state = ?self.state, "Command ignored");
        self.events
            .push(RoundEvent::CommandIgnored { state: self.state });
    }
}
