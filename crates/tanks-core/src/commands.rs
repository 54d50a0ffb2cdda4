//! Round commands sent from input handlers to the round engine.
//!
//! Commands are queued and processed at the next tick boundary.
//! Triggers that are not valid in the current state are ignored.

use serde::{Deserialize, Serialize};

/// All possible player and host actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoundCommand {
    // --- State triggers ---
    /// Spawn the roster and begin play (MainMenu only).
    StartRound,
    /// Stop play and show the end screen (Playing only).
    EndRound,
    /// Tear down the roster and reload the session (any state).
    ReturnToMenu,

    // --- In-round actions ---
    /// Bump player 1's movement speed by one unit.
    IncreaseSpeed,
    /// Ask the Firestorm scheduler for a new shell sequence.
    LaunchFirestorm,

    // --- Application ---
    /// Exit the application.
    Quit,
}
