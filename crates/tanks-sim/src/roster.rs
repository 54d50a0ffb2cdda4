//! Tank roster: the fixed, ordered set of competing tanks.
//!
//! The roster owns every tank's spawn state and entity handle. Other parts
//! of the round core go through its operations; nothing reaches into the
//! slot list directly.

use glam::Quat;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use tanks_core::config::RosterConfig;
use tanks_core::constants::PLAYER_ONE;
use tanks_core::error::{ConfigError, Result};
use tanks_core::host::EngineHost;
use tanks_core::types::{EntityHandle, SpawnPoint, TankColor};

/// One competing tank.
#[derive(Debug, Clone)]
pub struct Tank {
    player_number: u32,
    spawn_point: Option<SpawnPoint>,
    /// Rotation chosen at spawn. Resets reuse it so they are repeatable
    /// even when the yaw was randomized.
    spawn_rotation: Quat,
    color: TankColor,
    instance: Option<EntityHandle>,
}

impl Tank {
    pub fn player_number(&self) -> u32 {
        self.player_number
    }

    pub fn color(&self) -> TankColor {
        self.color
    }

    pub fn spawn_point(&self) -> Option<SpawnPoint> {
        self.spawn_point
    }

    pub fn instance(&self) -> Option<EntityHandle> {
        self.instance
    }

    /// Not yet eliminated. A tank with no instance is never active.
    pub fn is_active(&self, host: &impl EngineHost) -> bool {
        self.instance.is_some_and(|handle| host.is_active(handle))
    }

    pub fn label(&self) -> String {
        format!("Player {}", self.player_number)
    }
}

/// The roster. Its size is fixed when it is built from config.
#[derive(Debug, Clone)]
pub struct TankRoster {
    tanks: Vec<Tank>,
    randomize_yaw: bool,
}

impl TankRoster {
    /// Build the roster slots. Player numbers are `1..=N` in slot order.
    pub fn from_config(config: &RosterConfig) -> Result<Self> {
        if config.slots.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        let tanks = config
            .slots
            .iter()
            .zip(1u32..)
            .map(|(slot, player_number)| Tank {
                player_number,
                spawn_point: slot.spawn_point,
                spawn_rotation: slot
                    .spawn_point
                    .map(|p| p.rotation())
                    .unwrap_or(Quat::IDENTITY),
                color: slot.color,
                instance: None,
            })
            .collect();
        Ok(Self {
            tanks,
            randomize_yaw: config.randomize_yaw,
        })
    }

    pub fn len(&self) -> usize {
        self.tanks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tanks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tank> {
        self.tanks.iter()
    }

    pub fn get(&self, player_number: u32) -> Option<&Tank> {
        self.tanks.iter().find(|t| t.player_number == player_number)
    }

    /// The locally controlled, UI-tracked tank.
    pub fn player_one(&self) -> Option<&Tank> {
        self.get(PLAYER_ONE)
    }

    /// All slots hold a live entity handle.
    pub fn is_spawned(&self) -> bool {
        self.tanks.iter().all(|t| t.instance.is_some())
    }

    /// Create every tank at its spawn point.
    ///
    /// All slots are checked before anything is instantiated, so on error no
    /// tank exists. A roster that is already spawned is torn down first.
    pub fn spawn_all(
        &mut self,
        host: &mut impl EngineHost,
        rng: &mut ChaCha8Rng,
    ) -> Result<()> {
        if self.tanks.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        let spawn_points = self
            .tanks
            .iter()
            .enumerate()
            .map(|(slot, tank)| tank.spawn_point.ok_or(ConfigError::MissingSpawnPoint { slot }))
            .collect::<Result<Vec<_>>>()?;

        self.teardown(host);

        for ((slot, tank), spawn_point) in self.tanks.iter_mut().enumerate().zip(spawn_points) {
            tank.player_number = slot as u32 + 1;
            tank.spawn_rotation = if self.randomize_yaw {
                Quat::from_rotation_y(rng.gen_range(0.0f32..360.0).to_radians())
            } else {
                spawn_point.rotation()
            };
            let handle = host.instantiate_tank(
                spawn_point.position,
                tank.spawn_rotation,
                tank.player_number,
                tank.color,
            );
            tank.instance = Some(handle);
            debug!(player = tank.player_number, position = ?spawn_point.position, "Tank spawned");
        }

        info!(tanks = self.tanks.len(), "Roster spawned");
        Ok(())
    }

    /// Reactivate every tank, put it back on its spawn transform and clear
    /// its combat state. Calling it twice is the same as calling it once.
    pub fn reset_all(&mut self, host: &mut impl EngineHost) {
        for tank in &self.tanks {
            let (Some(handle), Some(spawn_point)) = (tank.instance, tank.spawn_point) else {
                continue;
            };
            host.place(handle, spawn_point.position, tank.spawn_rotation);
            host.clear_combat_state(handle);
            host.set_active(handle, true);
        }
    }

    /// Toggle input on every spawned tank. Does not touch `active`.
    pub fn set_control_enabled(&mut self, host: &mut impl EngineHost, enabled: bool) {
        for handle in self.tanks.iter().filter_map(|t| t.instance) {
            host.set_control_enabled(handle, enabled);
        }
    }

    /// Release every entity handle. Slots keep their configuration.
    pub fn teardown(&mut self, host: &mut impl EngineHost) {
        let mut released = 0;
        for tank in &mut self.tanks {
            if let Some(handle) = tank.instance.take() {
                host.destroy(handle);
                released += 1;
            }
        }
        if released > 0 {
            debug!(released, "Roster torn down");
        }
    }

    pub fn active_count(&self, host: &impl EngineHost) -> usize {
        self.tanks.iter().filter(|t| t.is_active(host)).count()
    }

    /// One or fewer tanks remain active.
    pub fn one_tank_left(&self, host: &impl EngineHost) -> bool {
        self.active_count(host) <= 1
    }

    /// The first active tank, or `None` for a draw. Only meaningful when
    /// [`one_tank_left`](Self::one_tank_left) holds.
    pub fn round_winner(&self, host: &impl EngineHost) -> Option<&Tank> {
        self.tanks.iter().find(|t| t.is_active(host))
    }

    /// Handles of every spawned tank, in slot order.
    pub fn handles(&self) -> Vec<EntityHandle> {
        self.tanks.iter().filter_map(|t| t.instance).collect()
    }
}
