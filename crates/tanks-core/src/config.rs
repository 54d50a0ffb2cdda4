//! Session configuration: roster slots and Firestorm tuning.
//!
//! Loaded from JSON. Every field has a default, so a config file only needs
//! to name what it changes.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ConfigError, Result};
use crate::types::{SpawnPoint, TankColor};

/// Everything needed to start a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed. Same seed and inputs give the same session.
    pub seed: u64,
    pub roster: RosterConfig,
    pub firestorm: FirestormConfig,
    /// End the round automatically when player 1 is destroyed.
    pub end_round_on_player_death: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            roster: RosterConfig::default(),
            firestorm: FirestormConfig::default(),
            end_round_on_player_death: true,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check the settings that can be checked before a round starts.
    /// Missing spawn points are reported by the roster at spawn time.
    pub fn validate(&self) -> Result<()> {
        if self.roster.slots.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        self.firestorm.validate()
    }
}

/// Roster slots, in player order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub slots: Vec<SlotConfig>,
    /// Give each tank a random yaw at spawn instead of its spawn point's.
    pub randomize_yaw: bool,
}

impl Default for RosterConfig {
    /// Four tanks on the corners of a square, facing the center.
    fn default() -> Self {
        let corners = [
            (Vec3::new(-15.0, 0.0, -15.0), 45.0, TankColor::rgb(0.16, 0.42, 0.85)),
            (Vec3::new(15.0, 0.0, -15.0), -45.0, TankColor::rgb(0.85, 0.18, 0.15)),
            (Vec3::new(15.0, 0.0, 15.0), -135.0, TankColor::rgb(0.22, 0.7, 0.25)),
            (Vec3::new(-15.0, 0.0, 15.0), 135.0, TankColor::rgb(0.9, 0.75, 0.1)),
        ];
        Self {
            slots: corners
                .into_iter()
                .map(|(position, yaw, color)| SlotConfig {
                    spawn_point: Some(SpawnPoint::new(position, yaw)),
                    color,
                })
                .collect(),
            randomize_yaw: false,
        }
    }
}

/// One roster slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Unset spawn points are a configuration error at round start.
    #[serde(default)]
    pub spawn_point: Option<SpawnPoint>,
    #[serde(default)]
    pub color: TankColor,
}

/// Firestorm side effect tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirestormConfig {
    /// Shells per sequence.
    pub wave_count: u32,
    /// Seconds between shells of one sequence.
    pub shell_delay_secs: f64,
    /// Shells land at uniform random x and z in `[-random_range, random_range]`.
    pub random_range: f32,
    pub drop_height: f32,
    pub fall_speed: f32,
    /// Activations allowed per session.
    pub uses: u32,
}

impl Default for FirestormConfig {
    fn default() -> Self {
        Self {
            wave_count: FIRESTORM_WAVE_COUNT,
            shell_delay_secs: FIRESTORM_SHELL_DELAY_SECS,
            random_range: FIRESTORM_RANDOM_RANGE,
            drop_height: FIRESTORM_DROP_HEIGHT,
            fall_speed: FIRESTORM_FALL_SPEED,
            uses: FIRESTORM_USES,
        }
    }
}

impl FirestormConfig {
    pub fn validate(&self) -> Result<()> {
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        let reason = if !non_negative(self.shell_delay_secs) {
            "shell_delay_secs must be non-negative"
        } else if !non_negative(f64::from(self.random_range)) {
            "random_range must be non-negative"
        } else if !non_negative(f64::from(self.fall_speed)) {
            "fall_speed must be non-negative"
        } else {
            return Ok(());
        };
        Err(ConfigError::InvalidFirestorm {
            reason: reason.to_string(),
        })
    }
}
