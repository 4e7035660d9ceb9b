//! Game configuration
//!
//! Every tunable of the arena lives here. All sections default to the values
//! the game ships with, so a config file only needs the keys it overrides.

use serde::{Deserialize, Serialize};
use tank_engine::config::Config;

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player tank settings
    pub player: PlayerConfig,

    /// Enemy tank settings
    pub enemy: EnemyConfig,

    /// Powerup pickup amounts
    pub pickups: PickupConfig,

    /// Sound cue volumes
    pub sound: SoundConfig,

    /// Arena population
    pub arena: ArenaConfig,
}

impl Config for GameConfig {}

/// Per-tank stats selected by preset index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankPreset {
    /// Starting and maximum health
    pub max_health: f32,

    /// Movement multiplier applied to acceleration
    pub speed: f32,

    /// Damage dealt per hit
    pub damage: f32,
}

impl TankPreset {
    /// Create a preset
    pub const fn new(max_health: f32, speed: f32, damage: f32) -> Self {
        Self { max_health, speed, damage }
    }
}

/// Player tank configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Index into `presets`
    pub preset: usize,

    /// Ammunition at spawn
    pub start_ammo: u32,

    /// Ammunition cap
    pub max_ammo: u32,

    /// Acceleration is `acceleration_factor * speed`
    pub acceleration_factor: f32,

    /// Speed clamp (units per second)
    pub max_speed: f32,

    /// Fraction of velocity lost per update while coasting or turning
    pub friction: f32,

    /// Hull yaw per update while a turn key is held (radians)
    pub turn_rate: f32,

    /// Turret yaw per unit of horizontal mouse movement
    pub mouse_sensitivity: f32,

    /// Velocity kick applied when firing
    pub recoil: f32,

    /// Seconds before the cannon can fire again
    pub shot_cooldown: f32,

    /// Scroll delta to camera distance factor
    pub zoom_scale: f32,

    /// Closest camera zoom offset (exclusive)
    pub zoom_min: f32,

    /// Farthest camera zoom offset (inclusive)
    pub zoom_max: f32,

    /// Selectable tanks
    pub presets: Vec<TankPreset>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            presets: vec![
                TankPreset::new(100.0, 1.0, 10.0),
                TankPreset::new(75.0, 2.0, 8.0),
                TankPreset::new(200.0, 0.5, 20.0),
            ],
            preset: 0,
            start_ammo: 5,
            max_ammo: 15,
            acceleration_factor: 7.0,
            max_speed: 5.0,
            friction: 0.02,
            turn_rate: 0.01,
            mouse_sensitivity: 0.0002,
            recoil: 7.0,
            shot_cooldown: 2.0,
            zoom_scale: 0.01,
            zoom_min: -7.0,
            zoom_max: 0.0,
        }
    }
}

impl PlayerConfig {
    /// Selected preset, falling back to the first one for an out-of-range index
    pub fn selected_preset(&self) -> TankPreset {
        self.presets
            .get(self.preset)
            .or_else(|| self.presets.first())
            .copied()
            .unwrap_or(TankPreset::new(100.0, 1.0, 10.0))
    }
}

/// Enemy tank configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Acceleration is `acceleration_factor * speed`
    pub acceleration_factor: f32,

    /// Speed clamp (units per second)
    pub max_speed: f32,

    /// Fraction of velocity lost per update while braking
    pub friction: f32,

    /// Start braking when the next waypoint is this close
    pub braking_distance: f32,

    /// Waypoint counts as reached within this distance
    pub stop_distance: f32,

    /// Horizontal distance at which the enemy locks on to the player
    pub lock_on_range: f32,

    /// Seconds between enemy shots while locked on
    pub fire_cooldown: f32,

    /// Enemy stat presets
    pub presets: Vec<TankPreset>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            presets: vec![
                TankPreset::new(100.0, 1.0, 10.0),
                TankPreset::new(75.0, 1.5, 8.0),
                TankPreset::new(200.0, 0.75, 20.0),
            ],
            acceleration_factor: 2.0,
            max_speed: 3.0,
            friction: 0.02,
            braking_distance: 9.0,
            stop_distance: 2.5,
            lock_on_range: 20.0,
            fire_cooldown: 3.0,
        }
    }
}

impl EnemyConfig {
    /// Preset by index, clamped to the last available preset
    pub fn preset(&self, index: usize) -> TankPreset {
        self.presets
            .get(index)
            .or_else(|| self.presets.last())
            .copied()
            .unwrap_or(TankPreset::new(100.0, 1.0, 10.0))
    }
}

/// Powerup effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    /// Health restored by a health powerup
    pub heal_amount: f32,

    /// Shells restored by an ammo powerup
    pub ammo_amount: u32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            heal_amount: 25.0,
            ammo_amount: 5,
        }
    }
}

/// Sound cue volumes (0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    /// Engine loop
    pub drive: f32,
    /// Cannon fired
    pub shot: f32,
    /// Trigger pulled with no ammo
    pub shot_empty: f32,
    /// Health collected
    pub health: f32,
    /// Ammo collected
    pub ammo: f32,
    /// Tank destroyed
    pub boom: f32,
    /// Shell impact
    pub bounce: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            drive: 0.2,
            shot: 0.3,
            shot_empty: 1.0,
            health: 0.3,
            ammo: 1.0,
            boom: 0.6,
            bounce: 0.5,
        }
    }
}

/// Arena population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of enemy tanks
    pub enemy_count: usize,

    /// Number of health powerups
    pub health_powerups: usize,

    /// Number of ammo powerups
    pub ammo_powerups: usize,

    /// Half the side length of the square arena
    pub half_size: f32,

    /// Seed for enemy route choices
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            enemy_count: 3,
            health_powerups: 7,
            ammo_powerups: 6,
            half_size: 40.0,
            seed: 7,
        }
    }
}
