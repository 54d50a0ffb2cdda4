//! Control functions for whatever drives the application.
//!
//! They bridge requests to the game loop thread via its channel, the same
//! way for a scripted demo as for a real input source.

use tanks_core::commands::RoundCommand;
use tanks_core::config::SessionConfig;
use tanks_core::enums::Screen;
use tanks_core::state::RoundSnapshot;
use tracing::info;

use crate::game_loop;
use crate::state::{AppError, AppState, GameLoopCommand};

/// Start the session. Spawns the game loop thread if not already running.
pub fn start_session(state: &AppState, config: &SessionConfig) -> Result<(), AppError> {
    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;
    if tx_lock.is_some() {
        return Err(AppError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())?;
    *tx_lock = Some(cmd_tx);
    *state.loop_thread.lock().map_err(|_| AppError::LockPoisoned)? = Some(handle);
    info!(seed = config.seed, tanks = config.roster.slots.len(), "Session started");
    Ok(())
}

fn send(state: &AppState, command: GameLoopCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| AppError::LoopStopped),
        None => Err(AppError::NotStarted),
    }
}

/// Send a round command to the engine.
pub fn send_command(state: &AppState, command: RoundCommand) -> Result<(), AppError> {
    send(state, GameLoopCommand::Command(command))
}

/// Report a click on a UI element.
pub fn click(state: &AppState, screen: Screen, element: &str) -> Result<(), AppError> {
    send(
        state,
        GameLoopCommand::Click {
            screen,
            element: element.to_string(),
        },
    )
}

/// Report that the UI host reloaded a screen's definition.
pub fn screen_reloaded(state: &AppState, screen: Screen) -> Result<(), AppError> {
    send(state, GameLoopCommand::ScreenReloaded(screen))
}

/// Get the latest snapshot synchronously.
pub fn get_snapshot(state: &AppState) -> Result<Option<RoundSnapshot>, AppError> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|_| AppError::LockPoisoned)?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread. A loop that already stopped
/// on its own is not an error.
pub fn shutdown(state: &AppState) -> Result<(), AppError> {
    let tx = state
        .command_tx
        .lock()
        .map_err(|_| AppError::LockPoisoned)?
        .take();
    let Some(tx) = tx else {
        return Err(AppError::NotStarted);
    };
    let _ = tx.send(GameLoopCommand::Shutdown);

    let handle = state
        .loop_thread
        .lock()
        .map_err(|_| AppError::LockPoisoned)?
        .take();
    if let Some(handle) = handle {
        handle.join().map_err(|_| AppError::LoopPanicked)?;
    }
    info!("Session stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tanks_core::constants::ui;
    use tanks_core::enums::RoundState;

    fn wait_for_state(state: &AppState, expected: RoundState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let current = get_snapshot(state).unwrap().map(|s| s.state);
            if current == Some(expected) {
                return;
            }
            assert!(Instant::now() < deadline, "never reached {expected:?}");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_commands_before_start_fail() {
        let state = AppState::new();
        assert!(matches!(
            send_command(&state, RoundCommand::StartRound),
            Err(AppError::NotStarted)
        ));
        assert!(matches!(shutdown(&state), Err(AppError::NotStarted)));
        assert!(get_snapshot(&state).unwrap().is_none());
    }

    #[test]
    fn test_session_lifecycle() {
        let state = AppState::new();
        let config = SessionConfig::default();
        start_session(&state, &config).unwrap();
        assert!(matches!(
            start_session(&state, &config),
            Err(AppError::AlreadyRunning)
        ));

        click(&state, Screen::MainMenu, ui::START_BUTTON).unwrap();
        wait_for_state(&state, RoundState::Playing);

        send_command(&state, RoundCommand::EndRound).unwrap();
        wait_for_state(&state, RoundState::RoundEnd);

        shutdown(&state).unwrap();
        assert!(state.command_tx.lock().unwrap().is_none());
    }

    #[test]
    fn test_invalid_config_does_not_start() {
        let state = AppState::new();
        let mut config = SessionConfig::default();
        config.roster.slots.clear();
        assert!(matches!(
            start_session(&state, &config),
            Err(AppError::Config(_))
        ));
        assert!(state.command_tx.lock().unwrap().is_none());
    }

    #[test]
    fn test_quit_stops_loop() {
        let state = AppState::new();
        start_session(&state, &SessionConfig::default()).unwrap();
        click(&state, Screen::MainMenu, ui::EXIT_BUTTON).unwrap();

        let handle = state.loop_thread.lock().unwrap().take().unwrap();
        handle.join().unwrap();
        assert!(matches!(
            send_command(&state, RoundCommand::StartRound),
            Err(AppError::LoopStopped)
        ));
    }
}
