//! Application state shared between the control functions and the game loop
//! thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tanks_core::commands::RoundCommand;
use tanks_core::enums::Screen;
use tanks_core::error::ConfigError;
use tanks_core::state::RoundSnapshot;

/// Messages sent to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// A command to forward to the round engine as is.
    Command(RoundCommand),
    /// A click on a UI element, resolved through the screen's bindings.
    Click { screen: Screen, element: String },
    /// The UI host reloaded a screen's definition.
    ScreenReloaded(Screen),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("session already running")]
    AlreadyRunning,

    #[error("session not started")]
    NotStarted,

    #[error("game loop is no longer running")]
    LoopStopped,

    #[error("shared state lock poisoned")]
    LockPoisoned,

    #[error("game loop thread panicked")]
    LoopPanicked,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` since it is Send but not Sync
/// - `Option` covers the time before a session is started
/// - the latest snapshot is shared with the game loop thread through `Arc`
pub struct AppState {
    /// Channel into the game loop thread. `None` before `start_session`.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<RoundSnapshot>>>,
    pub loop_thread: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_thread: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
