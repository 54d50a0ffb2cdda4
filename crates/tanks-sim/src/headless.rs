//! Headless collaborators: an hecs-backed engine host and an in-memory UI.
//!
//! These stand in for the real game engine and UI toolkit so a session can
//! run, and be tested, with neither present. The host keeps just enough
//! engine behavior to be useful: shells fall, explode on the ground and
//! damage tanks, and tanks at zero health go inactive.

use std::collections::HashMap;

use glam::{Quat, Vec3};
use hecs::{Entity, World};

use tanks_core::components::*;
use tanks_core::constants::*;
use tanks_core::enums::Screen;
use tanks_core::host::{EngineHost, UiHost};
use tanks_core::state::PlayerListItem;
use tanks_core::types::{EntityHandle, HealthSample, ShotCounters, TankColor};

fn to_handle(entity: Entity) -> EntityHandle {
    EntityHandle::from_raw(entity.to_bits())
}

fn to_entity(handle: EntityHandle) -> Option<Entity> {
    Entity::from_bits(handle.raw().get())
}

/// Engine host backed by an hecs world.
#[derive(Default)]
pub struct HeadlessHost {
    world: World,
    camera_targets: Vec<EntityHandle>,
    session_reloads: u32,
    quit_requested: bool,
    despawn_buffer: Vec<Entity>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the entity world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Advance shell flight by `dt` seconds. Shells that reach the ground
    /// explode and are despawned. Returns the number of explosions.
    pub fn advance(&mut self, dt: f64) -> usize {
        let dt = dt as f32;
        let mut impacts = Vec::new();

        for (entity, (_shell, transform, velocity)) in self
            .world
            .query_mut::<(&Shell, &mut Transform, &Velocity)>()
        {
            transform.position += velocity.0 * dt;
            if transform.position.y <= 0.0 {
                impacts.push(Vec3::new(transform.position.x, 0.0, transform.position.z));
                self.despawn_buffer.push(entity);
            }
        }

        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }

        for &point in &impacts {
            self.explode(point);
        }
        impacts.len()
    }

    /// Splash damage falling off linearly to zero at the explosion radius.
    fn explode(&mut self, point: Vec3) {
        for (_entity, (_tank, transform, health, active)) in self
            .world
            .query_mut::<(&Tank, &Transform, &mut TankHealth, &mut Active)>()
        {
            if !active.0 {
                continue;
            }
            let distance = transform.position.distance(point);
            if distance >= SHELL_EXPLOSION_RADIUS {
                continue;
            }
            let damage = SHELL_MAX_DAMAGE * (1.0 - distance / SHELL_EXPLOSION_RADIUS);
            health.current -= damage;
            if health.current <= 0.0 {
                active.0 = false;
            }
        }
    }

    /// Deal damage to one tank, deactivating it at zero health.
    pub fn apply_damage(&mut self, handle: EntityHandle, amount: f32) {
        let Some(entity) = to_entity(handle) else {
            return;
        };
        if let Ok((health, active)) = self
            .world
            .query_one_mut::<(&mut TankHealth, &mut Active)>(entity)
        {
            health.current -= amount;
            if health.current <= 0.0 {
                active.0 = false;
            }
        }
    }

    /// Count one shot fired by a tank, and a hit if it landed.
    pub fn record_shot(&mut self, handle: EntityHandle, hit: bool) {
        let Some(entity) = to_entity(handle) else {
            return;
        };
        if let Ok(mut shooting) = self.world.get::<&mut TankShooting>(entity) {
            shooting.fire_count += 1;
            if hit {
                shooting.hit_count += 1;
            }
        }
    }

    pub fn set_velocity(&mut self, handle: EntityHandle, velocity: Vec3) {
        if let Some(mut v) = to_entity(handle).and_then(|e| self.world.get::<&mut Velocity>(e).ok())
        {
            v.0 = velocity;
        }
    }

    pub fn velocity(&self, handle: EntityHandle) -> Option<Vec3> {
        let entity = to_entity(handle)?;
        self.world.get::<&Velocity>(entity).ok().map(|v| v.0)
    }

    pub fn transform(&self, handle: EntityHandle) -> Option<Transform> {
        let entity = to_entity(handle)?;
        self.world.get::<&Transform>(entity).ok().map(|t| *t)
    }

    pub fn control_enabled(&self, handle: EntityHandle) -> Option<bool> {
        let entity = to_entity(handle)?;
        self.world.get::<&Control>(entity).ok().map(|c| c.enabled)
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        to_entity(handle).is_some_and(|e| self.world.contains(e))
    }

    pub fn tank_count(&self) -> usize {
        self.world.query::<&Tank>().iter().count()
    }

    pub fn shell_count(&self) -> usize {
        self.world.query::<&Shell>().iter().count()
    }

    pub fn camera_targets(&self) -> &[EntityHandle] {
        &self.camera_targets
    }

    pub fn session_reloads(&self) -> u32 {
        self.session_reloads
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

impl EngineHost for HeadlessHost {
    fn instantiate_tank(
        &mut self,
        position: Vec3,
        rotation: Quat,
        player_number: u32,
        color: TankColor,
    ) -> EntityHandle {
        let entity = self.world.spawn((
            Tank {
                player_number,
                color,
            },
            Transform { position, rotation },
            Velocity::default(),
            TankMovement {
                speed: TANK_BASE_SPEED,
            },
            TankShooting::default(),
            TankHealth {
                current: TANK_STARTING_HEALTH,
                starting: TANK_STARTING_HEALTH,
            },
            Control::default(),
            Active(true),
        ));
        to_handle(entity)
    }

    fn instantiate_shell(
        &mut self,
        position: Vec3,
        rotation: Quat,
        velocity: Vec3,
    ) -> EntityHandle {
        let entity = self
            .world
            .spawn((Shell, Transform { position, rotation }, Velocity(velocity)));
        to_handle(entity)
    }

    fn destroy(&mut self, handle: EntityHandle) {
        if let Some(entity) = to_entity(handle) {
            let _ = self.world.despawn(entity);
        }
    }

    fn is_active(&self, handle: EntityHandle) -> bool {
        to_entity(handle)
            .and_then(|e| self.world.get::<&Active>(e).ok().map(|a| a.0))
            .unwrap_or(false)
    }

    fn set_active(&mut self, handle: EntityHandle, active: bool) {
        if let Some(mut a) = to_entity(handle).and_then(|e| self.world.get::<&mut Active>(e).ok()) {
            a.0 = active;
        }
    }

    fn place(&mut self, handle: EntityHandle, position: Vec3, rotation: Quat) {
        if let Some(mut transform) =
            to_entity(handle).and_then(|e| self.world.get::<&mut Transform>(e).ok())
        {
            *transform = Transform { position, rotation };
        }
    }

    fn clear_combat_state(&mut self, handle: EntityHandle) {
        let Some(entity) = to_entity(handle) else {
            return;
        };
        if let Ok((velocity, shooting, health)) = self
            .world
            .query_one_mut::<(&mut Velocity, &mut TankShooting, &mut TankHealth)>(entity)
        {
            velocity.0 = Vec3::ZERO;
            *shooting = TankShooting::default();
            health.current = health.starting;
        }
    }

    fn set_control_enabled(&mut self, handle: EntityHandle, enabled: bool) {
        if let Some(mut control) =
            to_entity(handle).and_then(|e| self.world.get::<&mut Control>(e).ok())
        {
            control.enabled = enabled;
        }
    }

    fn movement_speed(&self, handle: EntityHandle) -> Option<f32> {
        let entity = to_entity(handle)?;
        self.world.get::<&TankMovement>(entity).ok().map(|m| m.speed)
    }

    fn set_movement_speed(&mut self, handle: EntityHandle, speed: f32) {
        if let Some(mut movement) =
            to_entity(handle).and_then(|e| self.world.get::<&mut TankMovement>(e).ok())
        {
            movement.speed = speed;
        }
    }

    fn health(&self, handle: EntityHandle) -> Option<HealthSample> {
        let entity = to_entity(handle)?;
        self.world
            .get::<&TankHealth>(entity)
            .ok()
            .map(|h| HealthSample {
                current: h.current,
                starting: h.starting,
            })
    }

    fn shot_counters(&self, handle: EntityHandle) -> Option<ShotCounters> {
        let entity = to_entity(handle)?;
        self.world
            .get::<&TankShooting>(entity)
            .ok()
            .map(|s| ShotCounters {
                fire_count: s.fire_count,
                hit_count: s.hit_count,
            })
    }

    fn frame_camera(&mut self, targets: &[EntityHandle]) {
        self.camera_targets = targets.to_vec();
    }

    fn reload_session(&mut self) {
        self.session_reloads += 1;
        self.camera_targets.clear();
        self.world.clear();
    }

    fn quit(&mut self) {
        self.quit_requested = true;
    }
}

/// State of one element in the in-memory UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Element {
    #[default]
    Button,
    Label(String),
    List(Vec<PlayerListItem>),
}

/// In-memory UI host: one element map per screen plus visibility flags.
#[derive(Debug, Default)]
pub struct HeadlessUi {
    screens: HashMap<Screen, HashMap<String, Element>>,
    visible: HashMap<Screen, bool>,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every element the round core knows how to bind, on the screens it
    /// expects them.
    pub fn with_standard_layout() -> Self {
        let mut layout = Self::new();
        layout.add_element(Screen::MainMenu, ui::START_BUTTON, Element::Button);
        layout.add_element(Screen::MainMenu, ui::EXIT_BUTTON, Element::Button);

        for label in [
            ui::SPEED_LABEL,
            ui::KILLS_LABEL,
            ui::SHOTS_LABEL,
            ui::ACCURACY_LABEL,
        ] {
            layout.add_element(Screen::Game, label, Element::Label(String::new()));
        }
        for button in [
            ui::INCREASE_SPEED_BUTTON,
            ui::BACK_TO_MENU_BUTTON,
            ui::RANDOM_EXPLOSION_BUTTON,
        ] {
            layout.add_element(Screen::Game, button, Element::Button);
        }
        layout.add_element(Screen::Game, ui::PLAYER_LIST, Element::List(Vec::new()));

        layout.add_element(Screen::End, ui::END_BACK_TO_MENU_BUTTON, Element::Button);
        layout
    }

    pub fn add_element(&mut self, screen: Screen, id: &str, element: Element) {
        self.screens
            .entry(screen)
            .or_default()
            .insert(id.to_string(), element);
    }

    pub fn remove_element(&mut self, screen: Screen, id: &str) -> Option<Element> {
        self.screens.get_mut(&screen)?.remove(id)
    }

    pub fn element(&self, screen: Screen, id: &str) -> Option<&Element> {
        self.screens.get(&screen)?.get(id)
    }

    pub fn label(&self, screen: Screen, id: &str) -> Option<&str> {
        match self.element(screen, id)? {
            Element::Label(text) => Some(text),
            _ => None,
        }
    }

    pub fn player_list(&self, screen: Screen, id: &str) -> Option<&[PlayerListItem]> {
        match self.element(screen, id)? {
            Element::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_visible(&self, screen: Screen) -> bool {
        self.visible.get(&screen).copied().unwrap_or(false)
    }
}

impl UiHost for HeadlessUi {
    fn has_element(&self, screen: Screen, element: &str) -> bool {
        self.element(screen, element).is_some()
    }

    fn set_screen_visible(&mut self, screen: Screen, visible: bool) {
        self.visible.insert(screen, visible);
    }

    fn set_label(&mut self, screen: Screen, element: &str, text: &str) {
        if let Some(Element::Label(current)) = self
            .screens
            .get_mut(&screen)
            .and_then(|elements| elements.get_mut(element))
        {
            current.clear();
            current.push_str(text);
        }
    }

    fn set_player_list(&mut self, screen: Screen, element: &str, items: &[PlayerListItem]) {
        if let Some(Element::List(current)) = self
            .screens
            .get_mut(&screen)
            .and_then(|elements| elements.get_mut(element))
        {
            *current = items.to_vec();
        }
    }
}
