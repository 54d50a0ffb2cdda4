//! Stats derivation: display values recomputed from the roster every tick.
//!
//! Pure reads of the roster and the host. Nothing here is persisted.

use tanks_core::constants::PLAYER_ICON_ALPHA;
use tanks_core::host::EngineHost;
use tanks_core::state::{PlayerListItem, StatsView};

use crate::roster::TankRoster;

/// Hit percentage rounded to the nearest integer. With no shots fired the
/// denominator is floored at 1, giving 0 rather than a division error.
pub fn accuracy_percent(hit_count: u32, shots_fired: u32) -> u32 {
    let denominator = f64::from(shots_fired.max(1));
    (100.0 * f64::from(hit_count) / denominator).round() as u32
}

/// Roster size minus the tanks still active.
pub fn kills_remaining(roster_size: usize, active_count: usize) -> u32 {
    roster_size.saturating_sub(active_count) as u32
}

/// Stats for player 1, or `None` while player 1 has no instance.
pub fn player_one_stats(roster: &TankRoster, host: &impl EngineHost) -> Option<StatsView> {
    let handle = roster.player_one()?.instance()?;
    let speed = host.movement_speed(handle)?;
    let shots = host.shot_counters(handle).unwrap_or_default();

    Some(StatsView {
        speed,
        kills_remaining: kills_remaining(roster.len(), roster.active_count(host)),
        shots_fired: shots.fire_count,
        accuracy_percent: accuracy_percent(shots.hit_count, shots.fire_count),
    })
}

/// One player list row per roster slot, in player order.
pub fn player_list(roster: &TankRoster, host: &impl EngineHost) -> Vec<PlayerListItem> {
    roster
        .iter()
        .map(|tank| {
            let health_ratio = tank
                .instance()
                .and_then(|handle| host.health(handle))
                .map(|sample| sample.ratio())
                .unwrap_or(0.0);
            PlayerListItem {
                player_number: tank.player_number(),
                label: tank.label(),
                color: tank.color().with_alpha(PLAYER_ICON_ALPHA),
                health_ratio,
                active: tank.is_active(host),
            }
        })
        .collect()
}
