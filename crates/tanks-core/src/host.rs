//! Narrow contracts to the external collaborators.
//!
//! The round core never renders, simulates physics or lays out UI. It asks
//! an [`EngineHost`] to create and query entities and pushes display values
//! into a [`UiHost`].

use glam::{Quat, Vec3};

use crate::enums::Screen;
use crate::state::PlayerListItem;
use crate::types::{EntityHandle, HealthSample, ShotCounters, TankColor};

/// The game engine as seen by the round core.
///
/// Queries on a handle the host no longer knows return `None` / `false`.
pub trait EngineHost {
    /// Create a tank entity and return its handle.
    fn instantiate_tank(
        &mut self,
        position: Vec3,
        rotation: Quat,
        player_number: u32,
        color: TankColor,
    ) -> EntityHandle;

    /// Create a falling shell that damages every tank it hits.
    fn instantiate_shell(&mut self, position: Vec3, rotation: Quat, velocity: Vec3)
        -> EntityHandle;

    /// Release an entity. The host destroys the underlying resources.
    fn destroy(&mut self, handle: EntityHandle);

    fn is_active(&self, handle: EntityHandle) -> bool;
    fn set_active(&mut self, handle: EntityHandle, active: bool);

    /// Move an entity to a transform.
    fn place(&mut self, handle: EntityHandle, position: Vec3, rotation: Quat);

    /// Zero fire/hit counters and velocity, restore starting health.
    fn clear_combat_state(&mut self, handle: EntityHandle);

    /// Toggle whether input drives the tank's movement and firing.
    fn set_control_enabled(&mut self, handle: EntityHandle, enabled: bool);

    fn movement_speed(&self, handle: EntityHandle) -> Option<f32>;
    fn set_movement_speed(&mut self, handle: EntityHandle, speed: f32);

    fn health(&self, handle: EntityHandle) -> Option<HealthSample>;
    fn shot_counters(&self, handle: EntityHandle) -> Option<ShotCounters>;

    /// Point the camera at the given entities and snap its framing.
    fn frame_camera(&mut self, targets: &[EntityHandle]);

    /// Reload the current session from scratch.
    fn reload_session(&mut self);

    /// Exit the application.
    fn quit(&mut self);
}

/// The UI toolkit as seen by the round core. Elements are addressed by
/// string identifier within a screen's element tree.
pub trait UiHost {
    fn has_element(&self, screen: Screen, element: &str) -> bool;
    fn set_screen_visible(&mut self, screen: Screen, visible: bool);
    fn set_label(&mut self, screen: Screen, element: &str, text: &str);
    fn set_player_list(&mut self, screen: Screen, element: &str, items: &[PlayerListItem]);
}
