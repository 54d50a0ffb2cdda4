//! Round snapshot: the complete visible state handed to the UI each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{RoundState, Screen};
use crate::events::RoundEvent;
use crate::types::{SimTime, TankColor};

/// Complete round state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub time: SimTime,
    pub state: RoundState,
    pub screen: Screen,
    /// Player 1 stats. `None` until player 1 has been spawned.
    pub stats: Option<StatsView>,
    pub players: Vec<PlayerListItem>,
    pub firestorm: FirestormView,
    /// True when one or fewer tanks remain active.
    pub one_tank_left: bool,
    /// Player number of the sole active tank, if there is exactly one.
    pub winner: Option<u32>,
    pub events: Vec<RoundEvent>,
}

/// Display-ready stats for the locally controlled tank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsView {
    pub speed: f32,
    pub kills_remaining: u32,
    pub shots_fired: u32,
    pub accuracy_percent: u32,
}

/// One row of the in-game player list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerListItem {
    pub player_number: u32,
    pub label: String,
    pub color: TankColor,
    /// Health bar fill in `[0, 1]`.
    pub health_ratio: f32,
    pub active: bool,
}

/// Firestorm scheduler status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirestormView {
    pub armed: bool,
    pub uses_remaining: u32,
    /// Shells still scheduled across all running sequences.
    pub shells_pending: u32,
    /// Shells dropped since the scheduler was created.
    pub shells_dropped: u64,
}
