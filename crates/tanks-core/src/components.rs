//! ECS components for entities held by the headless engine host.
//!
//! Components are plain data structs with no methods.
//! Behavior lives in the host and in the round engine, not here.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::TankColor;

/// Marks a tank entity and records who it belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tank {
    pub player_number: u32,
    pub color: TankColor,
}

/// Marks a falling Firestorm shell.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Shell;

/// World-space transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Linear velocity (units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// Tank movement subsystem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TankMovement {
    /// Configured top speed.
    pub speed: f32,
}

/// Tank firing subsystem counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TankShooting {
    pub fire_count: u32,
    pub hit_count: u32,
}

/// Tank hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TankHealth {
    pub current: f32,
    pub starting: f32,
}

/// Whether input is applied to movement and firing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Control {
    pub enabled: bool,
}

/// Alive in the current round. Inactive entities stay in the world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Active(pub bool);
