//! Fundamental geometric and simulation types.

use std::num::NonZeroU64;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Opaque handle to an entity owned by the engine host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle(NonZeroU64);

impl EntityHandle {
    pub fn from_raw(raw: NonZeroU64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> NonZeroU64 {
        self.0
    }
}

/// Where a roster slot puts its tank at the start of a round.
/// y is up; yaw is measured in degrees around the y axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Vec3,
    #[serde(default)]
    pub yaw_degrees: f32,
}

impl SpawnPoint {
    pub fn new(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            yaw_degrees,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw_degrees.to_radians())
    }
}

/// RGBA color used to identify a player in the UI (components in 0..=1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl TankColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Default for TankColor {
    fn default() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

/// Health values read from a tank's engine-side health component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthSample {
    pub current: f32,
    pub starting: f32,
}

impl HealthSample {
    /// Display ratio in `[0, 1]`. Health can overshoot below zero on the
    /// killing blow, so the ratio is clamped.
    pub fn ratio(&self) -> f32 {
        if self.starting <= 0.0 {
            return 0.0;
        }
        (self.current / self.starting).clamp(0.0, 1.0)
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Cumulative firing counters of one tank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotCounters {
    pub fire_count: u32,
    pub hit_count: u32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each simulated tick).
    pub tick: u64,
    /// Elapsed simulated time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
