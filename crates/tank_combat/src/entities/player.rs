//! Player tank

use log::{debug, trace};
use tank_engine::foundation::math::{forward, Quat, Vec3};
use tank_engine::scene::{NodeId, SceneGraph};

use crate::audio::{SoundCue, SoundSink};
use crate::config::{PlayerConfig, TankPreset};

/// Input sampled for one update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Accelerate along the hull (W)
    pub forward: bool,
    /// Accelerate against the hull (S)
    pub backward: bool,
    /// Turn the hull left (A)
    pub turn_left: bool,
    /// Turn the hull right (D)
    pub turn_right: bool,
    /// Horizontal mouse movement since the last update
    pub mouse_dx: f32,
    /// Scroll wheel delta since the last update
    pub scroll: f32,
    /// Trigger pulled
    pub fire: bool,
}

/// Requests the player's update hands back to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// A shell left the turret; cast a ray from it
    Fire,
}

/// The player's tank: hull, turret and chase camera
#[derive(Debug, Clone)]
pub struct Player {
    /// Hull node, a scene root
    pub bot: NodeId,
    /// Turret node, a child of the hull
    pub top: NodeId,
    /// Chase camera, a scene root moved alongside the hull
    pub camera: NodeId,
    stats: TankPreset,
    health: f32,
    ammo: u32,
    velocity: Vec3,
    cooldown: f32,
    zoom: f32,
    settings: PlayerConfig,
}

impl Player {
    /// Create a player around existing scene nodes
    pub fn new(settings: &PlayerConfig, bot: NodeId, top: NodeId, camera: NodeId) -> Self {
        let stats = settings.selected_preset();
        Self {
            bot,
            top,
            camera,
            stats,
            health: stats.max_health,
            ammo: settings.start_ammo.min(settings.max_ammo),
            velocity: Vec3::zeros(),
            cooldown: 0.0,
            zoom: 0.0,
            settings: settings.clone(),
        }
    }

    /// Current health
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Health cap
    pub fn max_health(&self) -> f32 {
        self.stats.max_health
    }

    /// Shells left
    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    /// Shell cap
    pub fn max_ammo(&self) -> u32 {
        self.settings.max_ammo
    }

    /// Damage dealt per hit
    pub fn damage(&self) -> f32 {
        self.stats.damage
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Whether `id` is the hull or the turret
    pub fn owns(&self, id: NodeId) -> bool {
        id == self.bot || id == self.top
    }

    /// Restore health up to the cap
    pub fn add_health(&mut self, amount: f32, sound: &mut dyn SoundSink) {
        sound.play(SoundCue::Health);
        self.health = (self.health + amount).min(self.stats.max_health);
        debug!("Player health {:.1}/{:.1}", self.health, self.stats.max_health);
    }

    /// Restore shells up to the cap
    pub fn add_ammo(&mut self, amount: u32, sound: &mut dyn SoundSink) {
        sound.play(SoundCue::Ammo);
        self.ammo = self.ammo.saturating_add(amount).min(self.settings.max_ammo);
        debug!("Player ammo {}/{}", self.ammo, self.settings.max_ammo);
    }

    /// Apply damage; health may go negative
    pub fn reduce_health(&mut self, amount: f32) {
        self.health -= amount;
        debug!("Player hit for {:.1}, health {:.1}", amount, self.health);
    }

    /// Stop the tank dead, e.g. after running into something
    pub fn zero_velocity(&mut self) {
        self.velocity = Vec3::zeros();
    }

    /// Whether health is exhausted
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Advance the tank by `dt` seconds
    pub fn update(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        scene: &mut SceneGraph,
        sound: &mut dyn SoundSink,
    ) -> Option<PlayerAction> {
        self.cooldown = (self.cooldown - dt).max(0.0);

        let hull_forward = scene
            .world_transform(self.bot)
            .map_or_else(Vec3::zeros, |world| forward(&world, false));

        let mut acceleration = Vec3::zeros();
        if input.forward {
            acceleration += hull_forward;
        }
        if input.backward {
            acceleration -= hull_forward;
        }

        // Hull and turret turn against each other so the turret keeps its aim
        let turning = input.turn_left || input.turn_right;
        if input.turn_right {
            self.turn_hull(scene, -self.settings.turn_rate);
        }
        if input.turn_left {
            self.turn_hull(scene, self.settings.turn_rate);
        }

        self.velocity += acceleration * dt * self.settings.acceleration_factor * self.stats.speed;

        if (!input.forward && !input.backward) || turning {
            self.velocity *= 1.0 - self.settings.friction;
        }

        let speed = self.velocity.magnitude();
        if speed > self.settings.max_speed {
            self.velocity *= self.settings.max_speed / speed;
        }

        if input.forward || input.backward {
            sound.play(SoundCue::Drive);
        }

        let delta = self.velocity * dt;
        for id in [self.bot, self.camera] {
            if let Some(node) = scene.get_mut(id) {
                node.translate(&delta);
            }
        }

        if input.mouse_dx != 0.0 {
            self.rotate_turret_and_camera(scene, -input.mouse_dx * self.settings.mouse_sensitivity);
        }

        if input.scroll != 0.0 {
            self.zoom_camera(scene, input.scroll * self.settings.zoom_scale);
        }

        if input.fire {
            return self.fire(scene, sound);
        }
        None
    }

    fn turn_hull(&self, scene: &mut SceneGraph, angle: f32) {
        if let Some(bot) = scene.get_mut(self.bot) {
            bot.rotate_y(angle);
        }
        if let Some(top) = scene.get_mut(self.top) {
            top.rotate_y(-angle);
        }
    }

    /// Spin the turret and orbit the camera around the hull
    fn rotate_turret_and_camera(&self, scene: &mut SceneGraph, angle: f32) {
        if let Some(top) = scene.get_mut(self.top) {
            top.rotate_y(angle);
        }

        let Some(pivot) = scene.get(self.bot).map(|bot| bot.translation) else {
            return;
        };
        if let Some(camera) = scene.get_mut(self.camera) {
            let orbit = Quat::from_axis_angle(&Vec3::y_axis(), angle);
            camera.translation = pivot + orbit * (camera.translation - pivot);
            camera.rotate_y(angle);
        }
    }

    /// Dolly the camera along its view axis within the zoom range
    fn zoom_camera(&mut self, scene: &mut SceneGraph, delta: f32) {
        let zoom = self.zoom + delta;
        if zoom <= self.settings.zoom_min || zoom > self.settings.zoom_max {
            trace!("Zoom {:.2} out of range, ignored", zoom);
            return;
        }
        if let Some(camera) = scene.get_mut(self.camera) {
            let offset = camera.rotation * Vec3::new(0.0, 0.0, delta);
            camera.translate(&offset);
            self.zoom = zoom;
        }
    }

    fn fire(&mut self, scene: &SceneGraph, sound: &mut dyn SoundSink) -> Option<PlayerAction> {
        if self.cooldown > 0.0 {
            return None;
        }
        if self.ammo == 0 {
            sound.play(SoundCue::ShotEmpty);
            return None;
        }

        self.ammo -= 1;
        self.cooldown = self.settings.shot_cooldown;
        sound.play(SoundCue::Shot);

        // Kick the hull along its own axis, away from where the turret points
        let hull_forward = scene
            .world_transform(self.bot)
            .map_or_else(Vec3::zeros, |world| forward(&world, false));
        let turret_forward = scene
            .world_transform(self.top)
            .map_or_else(Vec3::zeros, |world| forward(&world, false));
        let kick = if (turret_forward - hull_forward).magnitude() < 1.0 {
            -hull_forward
        } else {
            hull_forward
        };
        self.velocity += kick * self.settings.recoil;

        debug!("Player fired, {} shells left", self.ammo);
        Some(PlayerAction::Fire)
    }
}
