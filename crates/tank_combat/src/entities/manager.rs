//! Owner of every gameplay entity

use rand::rngs::StdRng;
use rand::SeedableRng;
use tank_engine::scene::SceneGraph;

use crate::audio::SoundSink;
use crate::entities::enemy::{Enemy, EnemyAction};
use crate::entities::path::PathGraph;
use crate::entities::player::{Player, PlayerAction, PlayerInput};
use crate::entities::powerup::Powerup;
use crate::raycaster::Shooter;

/// Player, enemies and pickups, updated in that order
#[derive(Debug, Clone)]
pub struct EntityManager {
    /// The player's tank
    pub player: Player,
    /// Enemy tanks; `Enemy::index` matches the position here
    pub enemies: Vec<Enemy>,
    /// Pickups placed in the arena
    pub powerups: Vec<Powerup>,
    /// Route graph the enemies patrol
    pub paths: PathGraph,
    rng: StdRng,
}

impl EntityManager {
    /// Create a manager; `seed` drives enemy route choices
    pub fn new(player: Player, enemies: Vec<Enemy>, powerups: Vec<Powerup>, paths: PathGraph, seed: u64) -> Self {
        Self {
            player,
            enemies,
            powerups,
            paths,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Put every enemy on its nearest waypoint
    pub fn start(&mut self, scene: &SceneGraph) {
        for enemy in &mut self.enemies {
            enemy.start_route(scene, &self.paths, &mut self.rng);
        }
    }

    /// Update all entities and collect the shots they fired
    pub fn update(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        scene: &mut SceneGraph,
        sound: &mut dyn SoundSink,
    ) -> Vec<Shooter> {
        let mut shots = Vec::new();

        let alive = !self.player.is_dead();
        if alive && self.player.update(dt, input, scene, sound) == Some(PlayerAction::Fire) {
            shots.push(Shooter::Player);
        }

        let target = if alive { scene.world_position(self.player.bot) } else { None };
        for enemy in &mut self.enemies {
            if enemy.update(dt, scene, &self.paths, target, &mut self.rng) == Some(EnemyAction::Fire) {
                shots.push(Shooter::Enemy(enemy.index));
            }
        }

        for powerup in &self.powerups {
            powerup.update(scene);
        }

        shots
    }

    /// Number of destroyed enemies
    pub fn destroyed_enemies(&self) -> usize {
        self.enemies.iter().filter(|enemy| enemy.is_destroyed()).count()
    }

    /// Whether every enemy is destroyed
    pub fn all_enemies_destroyed(&self) -> bool {
        self.enemies.iter().all(Enemy::is_destroyed)
    }

    /// Pickups still in the scene
    pub fn remaining_powerups(&self, scene: &SceneGraph) -> usize {
        self.powerups.iter().filter(|powerup| !powerup.is_collected(scene)).count()
    }
}
