//! Snapshot system: reads the roster and host and builds a RoundSnapshot.
//!
//! This system is read-only: it never modifies the roster or the host.

use tanks_core::enums::RoundState;
use tanks_core::events::RoundEvent;
use tanks_core::host::EngineHost;
use tanks_core::state::RoundSnapshot;
use tanks_core::types::SimTime;

use crate::roster::TankRoster;
use crate::systems::firestorm::Firestorm;
use crate::systems::stats;

/// Build a complete snapshot of the round after a tick.
pub fn build_snapshot(
    state: RoundState,
    time: &SimTime,
    roster: &TankRoster,
    host: &impl EngineHost,
    firestorm: &Firestorm,
    events: Vec<RoundEvent>,
) -> RoundSnapshot {
    let one_tank_left = roster.is_spawned() && roster.one_tank_left(host);
    let winner = if one_tank_left {
        roster.round_winner(host).map(|t| t.player_number())
    } else {
        None
    };

    RoundSnapshot {
        time: *time,
        state,
        screen: state.screen(),
        stats: stats::player_one_stats(roster, host),
        players: stats::player_list(roster, host),
        firestorm: firestorm.view(),
        one_tank_left,
        winner,
        events,
    }
}
