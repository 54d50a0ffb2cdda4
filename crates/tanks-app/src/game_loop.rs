//! Game loop thread: runs the round engine at 60Hz and stores snapshots.
//!
//! The session is built on the caller's thread so configuration errors are
//! reported before anything runs, then moved into the loop thread. Commands
//! arrive via `mpsc` channel. The latest snapshot is kept in shared state for
//! synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use tanks_core::config::SessionConfig;
use tanks_core::constants::{DT, TICK_RATE};
use tanks_core::enums::RoundState;
use tanks_core::state::RoundSnapshot;
use tanks_sim::headless::{HeadlessHost, HeadlessUi};
use tanks_sim::ui::UiPresenter;
use tanks_sim::RoundEngine;

use crate::state::{AppError, GameLoopCommand};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Everything the loop thread owns: the engine with its host, and the UI
/// with its bindings.
pub struct Session {
    engine: RoundEngine<HeadlessHost>,
    ui: HeadlessUi,
    presenter: UiPresenter,
}

impl Session {
    /// Build the engine and bind every screen of the standard layout.
    pub fn new(config: &SessionConfig) -> Result<Self, AppError> {
        Self::with_ui(config, HeadlessUi::with_standard_layout())
    }

    pub fn with_ui(config: &SessionConfig, ui: HeadlessUi) -> Result<Self, AppError> {
        let engine = RoundEngine::new(config, HeadlessHost::new())?;
        let mut presenter = UiPresenter::new();
        presenter.bind_all(&ui)?;
        Ok(Self {
            engine,
            ui,
            presenter,
        })
    }

    /// Apply one message. Returns `false` when the loop should stop.
    pub fn handle(&mut self, command: GameLoopCommand) -> bool {
        match command {
            GameLoopCommand::Command(command) => self.engine.queue_command(command),
            GameLoopCommand::Click { screen, element } => {
                match self.presenter.click(screen, &element) {
                    Some(command) => self.engine.queue_command(command),
                    None => debug!(%screen, element = %element, "Click ignored"),
                }
            }
            GameLoopCommand::ScreenReloaded(screen) => {
                if let Err(e) = self.presenter.screen_reloaded(&self.ui, screen) {
                    error!(error = %e, "Screen rebinding failed");
                }
            }
            GameLoopCommand::Shutdown => return false,
        }
        true
    }

    /// Advance the engine by `dt`, then push the result to the UI. Shell
    /// flight only advances while a round is being played, so shells still in
    /// the air at round end never change the outcome.
    pub fn step(&mut self, dt: f64) -> RoundSnapshot {
        let snapshot = self.engine.tick(dt);
        if snapshot.state == RoundState::Playing {
            let explosions = self.engine.host_mut().advance(dt);
            if explosions > 0 {
                debug!(explosions, "Shells exploded");
            }
        }
        self.presenter.present(&mut self.ui, &snapshot, dt);
        snapshot
    }

    pub fn quit_requested(&self) -> bool {
        self.engine.quit_requested()
    }

    pub fn engine(&self) -> &RoundEngine<HeadlessHost> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RoundEngine<HeadlessHost> {
        &mut self.engine
    }

    pub fn ui(&self) -> &HeadlessUi {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut HeadlessUi {
        &mut self.ui
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: &SessionConfig,
    latest_snapshot: Arc<Mutex<Option<RoundSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), AppError> {
    let session = Session::new(config)?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("tanks-game-loop".into())
        .spawn(move || {
            run_game_loop(session, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect or a quit command.
fn run_game_loop(
    mut session: Session,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<RoundSnapshot>>,
) {
    info!("Game loop started");
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => {
                    if !session.handle(command) {
                        info!("Game loop shut down");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    info!("Command channel closed, game loop stopping");
                    return;
                }
            }
        }

        // 2. Advance one tick
        let snapshot = session.step(DT);

        // 3. Store latest snapshot for synchronous polling
        match latest_snapshot.lock() {
            Ok(mut lock) => *lock = Some(snapshot),
            Err(_) => warn!("Snapshot lock poisoned, snapshot dropped"),
        }

        if session.quit_requested() {
            info!("Quit requested, game loop stopping");
            return;
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use tanks_core::commands::RoundCommand;
    use tanks_core::constants::{ui, FIRESTORM_FALL_SPEED};
    use tanks_core::enums::Screen;
    use tanks_core::error::ConfigError;
    use tanks_core::events::RoundEvent;
    use tanks_core::host::EngineHost;

    fn click(screen: Screen, element: &str) -> GameLoopCommand {
        GameLoopCommand::Click {
            screen,
            element: element.to_string(),
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Command(RoundCommand::StartRound))
            .unwrap();
        tx.send(click(Screen::Game, ui::RANDOM_EXPLOSION_BUTTON))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            commands,
            [
                GameLoopCommand::Command(RoundCommand::StartRound),
                click(Screen::Game, ui::RANDOM_EXPLOSION_BUTTON),
                GameLoopCommand::Shutdown,
            ]
        );
    }

    #[test]
    fn test_clicks_drive_the_round() {
        let mut session = Session::new(&SessionConfig::default()).unwrap();

        assert!(session.handle(click(Screen::MainMenu, ui::START_BUTTON)));
        let snap = session.step(DT);
        assert_eq!(snap.state, RoundState::Playing);
        assert!(session.ui().is_visible(Screen::Game));
        assert_eq!(session.ui().label(Screen::Game, ui::KILLS_LABEL), Some("0"));

        session.handle(click(Screen::Game, ui::INCREASE_SPEED_BUTTON));
        let snap = session.step(DT);
        assert_eq!(snap.stats.unwrap().speed, 13.0);

        session.handle(click(Screen::Game, ui::BACK_TO_MENU_BUTTON));
        let snap = session.step(DT);
        assert_eq!(snap.state, RoundState::MainMenu);
        assert!(session.ui().is_visible(Screen::MainMenu));
    }

    #[test]
    fn test_unbound_click_is_ignored() {
        let mut session = Session::new(&SessionConfig::default()).unwrap();
        assert!(session.handle(click(Screen::End, ui::START_BUTTON)));
        assert_eq!(session.step(DT).state, RoundState::MainMenu);
    }

    #[test]
    fn test_shutdown_stops_session() {
        let mut session = Session::new(&SessionConfig::default()).unwrap();
        assert!(!session.handle(GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_exit_button_requests_quit() {
        let mut session = Session::new(&SessionConfig::default()).unwrap();
        session.handle(click(Screen::MainMenu, ui::EXIT_BUTTON));
        session.step(DT);
        assert!(session.quit_requested());
    }

    #[test]
    fn test_firestorm_shells_fall_and_explode() {
        let config = SessionConfig {
            end_round_on_player_death: false,
            ..Default::default()
        };
        let mut session = Session::new(&config).unwrap();
        session.handle(GameLoopCommand::Command(RoundCommand::StartRound));
        session.handle(GameLoopCommand::Command(RoundCommand::LaunchFirestorm));

        // 10 shells 0.1 s apart, each falling 20 units at 30 units/s.
        let mut dropped = 0;
        for _ in 0..(3 * TICK_RATE) {
            let snap = session.step(DT);
            dropped += snap
                .events
                .iter()
                .filter(|e| matches!(e, RoundEvent::ShellDropped { .. }))
                .count();
        }
        assert_eq!(dropped, 10);
        assert_eq!(session.engine().host().shell_count(), 0);
    }

    #[test]
    fn test_shells_in_flight_freeze_at_round_end() {
        let mut session = Session::new(&SessionConfig::default()).unwrap();
        session.handle(GameLoopCommand::Command(RoundCommand::StartRound));
        session.step(DT);

        let engine = session.engine_mut();
        let p2 = engine.roster().get(2).and_then(|t| t.instance()).unwrap();
        let target = engine.host().transform(p2).unwrap().position;
        engine.host_mut().instantiate_shell(
            target + Vec3::Y * 5.0,
            Quat::IDENTITY,
            Vec3::NEG_Y * FIRESTORM_FALL_SPEED,
        );

        session.handle(GameLoopCommand::Command(RoundCommand::EndRound));
        let ended = session.step(DT);
        assert_eq!(ended.state, RoundState::RoundEnd);

        let mut last = ended;
        for _ in 0..(2 * TICK_RATE) {
            last = session.step(DT);
        }
        assert!(session.engine().host().is_active(p2));
        assert_eq!(session.engine().host().health(p2).unwrap().ratio(), 1.0);
        assert!(last.players[1].active);
        assert_eq!(last.winner, None);
    }

    #[test]
    fn test_screen_reload_failure_keeps_running() {
        let mut session = Session::new(&SessionConfig::default()).unwrap();
        session
            .ui_mut()
            .remove_element(Screen::MainMenu, ui::START_BUTTON);
        assert!(session.handle(GameLoopCommand::ScreenReloaded(Screen::MainMenu)));
        session.handle(click(Screen::MainMenu, ui::START_BUTTON));
        assert_eq!(session.step(DT).state, RoundState::MainMenu);
    }

    #[test]
    fn test_missing_required_element_fails_startup() {
        let mut layout = HeadlessUi::with_standard_layout();
        layout.remove_element(Screen::End, ui::END_BACK_TO_MENU_BUTTON);
        let err = Session::with_ui(&SessionConfig::default(), layout)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::MissingUiElement {
                screen: Screen::End,
                ..
            })
        ));
    }

    #[test]
    fn test_loop_thread_publishes_snapshots() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(&SessionConfig::default(), latest.clone()).unwrap();

        tx.send(GameLoopCommand::Command(RoundCommand::StartRound))
            .unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let state = latest.lock().unwrap().as_ref().map(|s: &RoundSnapshot| s.state);
            if state == Some(RoundState::Playing) {
                break;
            }
            assert!(Instant::now() < deadline, "round never started");
            std::thread::sleep(TICK_DURATION);
        }

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.667ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
