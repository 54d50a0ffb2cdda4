//! Events emitted by the round engine for UI and audio feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::RoundState;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoundEvent {
    /// The roster was spawned and control enabled.
    RoundStarted { tank_count: u32 },
    /// Play stopped. `winner` is the last active tank, if exactly one remains.
    RoundEnded { winner: Option<u32> },
    /// Roster torn down, session reloaded.
    ReturnedToMenu,
    /// A command arrived that the current state does not accept.
    CommandIgnored { state: RoundState },
    /// A Firestorm sequence started.
    FirestormStarted { uses_remaining: u32 },
    /// A Firestorm activation was refused because no uses remain.
    FirestormExhausted,
    /// In-flight Firestorm sequences were discarded.
    FirestormCancelled { shells_discarded: u32 },
    /// One shell of a Firestorm sequence was dropped.
    ShellDropped { position: Vec3 },
    /// Player 1's tank was destroyed.
    PlayerOneDestroyed,
}
