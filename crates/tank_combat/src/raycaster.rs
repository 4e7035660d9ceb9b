//! Hit detection for tank shells
//!
//! A shot is an instantaneous ray from the firing turret along its forward
//! vector. The scan itself only reads the scene and produces a [`HitRecord`];
//! every shooter owns one record slot, so scans for different shooters never
//! share mutable state. Resolution of the nearest hit into damage happens
//! once per cast, after which every slot is cleared.

use log::{debug, trace, warn};
use tank_engine::foundation::math::{forward, translation_of};
use tank_engine::physics::Ray;
use tank_engine::scene::{NodeId, PowerupKind, SceneGraph};

use crate::audio::{SoundCue, SoundSink};
use crate::entities::{Enemy, Player};

/// Who fired a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shooter {
    /// The player's turret
    Player,
    /// Enemy by index in the session's enemy list
    Enemy(usize),
}

/// Nearest struck node found by one scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Struck node, `None` when nothing was hit
    pub node: Option<NodeId>,
    /// Ray parameter of the entry point, `+inf` when nothing was hit
    pub distance: f32,
}

impl HitRecord {
    /// Record of a scan that hit nothing
    pub const EMPTY: Self = Self {
        node: None,
        distance: f32::INFINITY,
    };

    /// Whether nothing has been hit
    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// Keep `candidate` if it is strictly nearer than the current hit
    pub fn offer(&mut self, node: NodeId, distance: f32) {
        if distance >= 0.0 && distance < self.distance {
            self.node = Some(node);
            self.distance = distance;
        }
    }
}

impl Default for HitRecord {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// What a resolved hit did to the game
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitEffect {
    /// Nothing hit, or the struck node takes no damage from this shooter
    Ignored,
    /// An enemy shell struck the player
    PlayerDamaged {
        /// Damage applied
        amount: f32,
    },
    /// A player shell struck an enemy
    EnemyDamaged {
        /// Struck enemy
        index: usize,
        /// Damage applied
        amount: f32,
        /// Whether this hit destroyed the enemy
        destroyed: bool,
    },
}

/// Result of one cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastOutcome {
    /// Resolved shooter
    pub shooter: Shooter,
    /// Nearest hit before the records were reset
    pub hit: HitRecord,
    /// Effect of the hit
    pub effect: HitEffect,
}

/// Per-shooter hit records plus hit resolution
#[derive(Debug, Clone)]
pub struct Raycaster {
    hits: Vec<HitRecord>,
}

impl Raycaster {
    /// One slot per enemy plus a final slot for the player
    pub fn new(enemy_count: usize) -> Self {
        Self {
            hits: vec![HitRecord::EMPTY; enemy_count + 1],
        }
    }

    /// Slot index of a shooter, if it has one
    pub fn slot(&self, shooter: Shooter) -> Option<usize> {
        match shooter {
            Shooter::Player => Some(self.hits.len() - 1),
            Shooter::Enemy(index) if index + 1 < self.hits.len() => Some(index),
            Shooter::Enemy(_) => None,
        }
    }

    /// Current record of a shooter
    pub fn hit(&self, shooter: Shooter) -> Option<&HitRecord> {
        self.slot(shooter).map(|slot| &self.hits[slot])
    }

    /// Every slot, enemies first, player last
    pub fn hits(&self) -> &[HitRecord] {
        &self.hits
    }

    /// Clear every slot
    pub fn reset_hits(&mut self) {
        self.hits.fill(HitRecord::EMPTY);
    }

    /// Cast a shot from `origin` and resolve the nearest hit.
    ///
    /// Returns `None` when `origin` is not a turret or hull of the player or
    /// of a tracked enemy. All records are reset before returning either way.
    pub fn cast(
        &mut self,
        scene: &mut SceneGraph,
        player: &mut Player,
        enemies: &mut [Enemy],
        origin: NodeId,
        is_camera: bool,
        sound: &mut dyn SoundSink,
    ) -> Option<CastOutcome> {
        let outcome = self.cast_inner(scene, player, enemies, origin, is_camera, sound);
        self.reset_hits();
        outcome
    }

    fn cast_inner(
        &mut self,
        scene: &mut SceneGraph,
        player: &mut Player,
        enemies: &mut [Enemy],
        origin: NodeId,
        is_camera: bool,
        sound: &mut dyn SoundSink,
    ) -> Option<CastOutcome> {
        let Some(shooter) = shooter_of(origin, player, enemies) else {
            warn!("Cast from {:?}, which belongs to no tank", origin);
            return None;
        };
        let Some(slot) = self.slot(shooter) else {
            warn!("Cast from {:?} has no hit slot", shooter);
            return None;
        };
        let Some(ray) = shot_ray(scene, origin, is_camera) else {
            warn!("Cast origin {:?} is not in the scene", origin);
            return None;
        };

        let record = scan(scene, origin, &ray);
        if let Some(node) = record.node {
            self.hits[slot].offer(node, record.distance);
        }
        let hit = self.hits[slot];
        debug!("{:?} cast hit {:?} at {:.3}", shooter, hit.node, hit.distance);

        let effect = match hit.node {
            Some(node) => resolve_hit(shooter, node, scene, player, enemies, sound),
            None => HitEffect::Ignored,
        };

        Some(CastOutcome { shooter, hit, effect })
    }
}

/// Which shooter a turret or hull node belongs to
pub fn shooter_of(origin: NodeId, player: &Player, enemies: &[Enemy]) -> Option<Shooter> {
    if player.owns(origin) || origin == player.camera {
        return Some(Shooter::Player);
    }
    enemies
        .iter()
        .position(|enemy| enemy.owns(origin))
        .map(Shooter::Enemy)
}

/// Ray from a node's world position along its forward vector
pub fn shot_ray(scene: &SceneGraph, origin: NodeId, is_camera: bool) -> Option<Ray> {
    let world = scene.world_transform(origin)?;
    Some(Ray::new(translation_of(&world), forward(&world, is_camera)))
}

/// Nearest node struck by `ray`, ignoring `origin` and its relatives.
///
/// Candidates are mesh-bearing attached nodes in traversal order. A node's
/// distance is the smallest non-negative entry parameter over its bounded
/// primitives; a strictly nearer node replaces the current best, so the
/// first node evaluated wins ties.
pub fn scan(scene: &SceneGraph, origin: NodeId, ray: &Ray) -> HitRecord {
    let mut best = HitRecord::EMPTY;

    scene.traverse(
        |id, node| {
            if id == origin || scene.is_related(id, origin) {
                return;
            }
            let Some(mesh) = node.mesh.as_ref() else {
                return;
            };
            let Some(position) = scene.world_position(id) else {
                return;
            };

            let nearest = mesh
                .world_bounds(&position)
                .iter()
                .filter_map(|bounds| ray.intersect_aabb(bounds))
                .map(|interval| interval.t_near)
                .filter(|t_near| *t_near >= 0.0)
                .reduce(f32::min);

            if let Some(distance) = nearest {
                trace!("Ray crosses '{}' at {:.3}", node.name, distance);
                best.offer(id, distance);
            }
        },
        |_, _| {},
    );

    best
}

fn resolve_hit(
    shooter: Shooter,
    struck: NodeId,
    scene: &mut SceneGraph,
    player: &mut Player,
    enemies: &mut [Enemy],
    sound: &mut dyn SoundSink,
) -> HitEffect {
    let Some(node) = scene.get(struck) else {
        return HitEffect::Ignored;
    };
    if !node.is_entity || node.powerup != PowerupKind::NotPowerup {
        return HitEffect::Ignored;
    }

    match shooter {
        Shooter::Enemy(index) if player.owns(struck) => {
            let Some(amount) = enemies.get(index).map(Enemy::damage) else {
                return HitEffect::Ignored;
            };
            player.reduce_health(amount);
            sound.play(SoundCue::Bounce);
            HitEffect::PlayerDamaged { amount }
        }
        Shooter::Player => {
            let Some(enemy) = enemies.iter_mut().find(|enemy| enemy.owns(struck)) else {
                return HitEffect::Ignored;
            };
            if enemy.is_destroyed() {
                return HitEffect::Ignored;
            }
            let amount = player.damage();
            let destroyed = enemy.reduce_health(amount, scene, sound);
            sound.play(SoundCue::Bounce);
            HitEffect::EnemyDamaged {
                index: enemy.index,
                amount,
                destroyed,
            }
        }
        Shooter::Enemy(_) => HitEffect::Ignored,
    }
}
