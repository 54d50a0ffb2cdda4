use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tanks_app::control;
use tanks_app::state::{AppError, AppState};
use tanks_core::config::SessionConfig;
use tanks_core::constants::ui;
use tanks_core::enums::Screen;

/// Scripted clicks played against the headless UI, with the pause after each.
const DEMO_SCRIPT: &[(Screen, &str, u64)] = &[
    (Screen::MainMenu, ui::START_BUTTON, 500),
    (Screen::Game, ui::INCREASE_SPEED_BUTTON, 250),
    (Screen::Game, ui::RANDOM_EXPLOSION_BUTTON, 2000),
    (Screen::Game, ui::RANDOM_EXPLOSION_BUTTON, 2000),
    (Screen::Game, ui::BACK_TO_MENU_BUTTON, 250),
    (Screen::MainMenu, ui::START_BUTTON, 1000),
    (Screen::Game, ui::BACK_TO_MENU_BUTTON, 250),
];

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Tanks exited with an error");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!(path = %path.display(), "Loading session config");
            SessionConfig::load(&path)?
        }
        None => SessionConfig::default(),
    };

    let state = AppState::new();
    control::start_session(&state, &config)?;

    for &(screen, element, pause_ms) in DEMO_SCRIPT {
        control::click(&state, screen, element)?;
        std::thread::sleep(Duration::from_millis(pause_ms));
        if let Some(snapshot) = control::get_snapshot(&state)? {
            info!(
                state = ?snapshot.state,
                tanks_active = snapshot.players.iter().filter(|p| p.active).count(),
                firestorm_uses = snapshot.firestorm.uses_remaining,
                shells_dropped = snapshot.firestorm.shells_dropped,
                "After `{element}`"
            );
        }
    }

    control::click(&state, Screen::MainMenu, ui::EXIT_BUTTON)?;
    std::thread::sleep(Duration::from_millis(100));
    match control::shutdown(&state) {
        Ok(()) | Err(AppError::NotStarted) => Ok(()),
        Err(e) => Err(e),
    }
}
