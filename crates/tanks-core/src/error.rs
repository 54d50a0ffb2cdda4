//! Error taxonomy for the round core.
//!
//! Only configuration problems are errors. A missing optional UI element is
//! logged and skipped, and the accuracy denominator is floored rather than
//! failing.

use thiserror::Error;

use crate::enums::Screen;

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// Fatal configuration problems. They abort round start or app startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("roster has no tank slots")]
    EmptyRoster,
    #[error("roster slot {slot} has no spawn point")]
    MissingSpawnPoint { slot: usize },
    #[error("required element `{element}` not found on {screen}")]
    MissingUiElement { screen: Screen, element: String },
    #[error("invalid firestorm settings: {reason}")]
    InvalidFirestorm { reason: String },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
