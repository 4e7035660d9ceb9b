//! Game session: the per-tick simulation loop
//!
//! One tick runs collision resolution, checks the end conditions, updates
//! every entity and finally casts a ray for each shot fired during the
//! update. Everything runs to completion before the next tick.

use log::{debug, info};
use tank_engine::scene::SceneGraph;

use crate::arena;
use crate::audio::SoundSink;
use crate::config::GameConfig;
use crate::entities::{EntityManager, PlayerInput};
use crate::error::GameResult;
use crate::physics::{CollisionReport, CollisionResolver};
use crate::raycaster::{HitEffect, Raycaster, Shooter};

/// State of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Still playing
    Running,
    /// Every enemy is destroyed
    Won,
    /// The player's health ran out
    Lost,
}

/// A running match
#[derive(Debug)]
pub struct GameSession<S: SoundSink> {
    scene: SceneGraph,
    entities: EntityManager,
    resolver: CollisionResolver,
    raycaster: Raycaster,
    sound: S,
    status: GameStatus,
    elapsed: f32,
    ticks: u64,
}

impl<S: SoundSink> GameSession<S> {
    /// Build the arena from `config` and start a match
    pub fn new(config: &GameConfig, sound: S) -> GameResult<Self> {
        let arena = arena::build(config)?;
        Ok(Self::from_parts(arena.scene, arena.entities, CollisionResolver::new(config.pickups), sound))
    }

    /// Start a match on a prepared scene
    pub fn from_parts(scene: SceneGraph, mut entities: EntityManager, resolver: CollisionResolver, sound: S) -> Self {
        entities.start(&scene);
        let raycaster = Raycaster::new(entities.enemies.len());
        info!("Match started against {} enemies", entities.enemies.len());
        Self {
            scene,
            entities,
            resolver,
            raycaster,
            sound,
            status: GameStatus::Running,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    /// Advance the match by `dt` seconds
    pub fn tick(&mut self, dt: f32, input: &PlayerInput) -> GameStatus {
        if self.status != GameStatus::Running {
            return self.status;
        }
        self.ticks += 1;
        self.elapsed += dt;

        let report = self.resolver.update(&mut self.scene, &mut self.entities.player, &mut self.sound);
        if report != CollisionReport::default() {
            debug!("Tick {}: {:?}", self.ticks, report);
        }
        if self.check_end() != GameStatus::Running {
            return self.status;
        }

        let shots = self.entities.update(dt, input, &mut self.scene, &mut self.sound);
        for shooter in shots {
            self.fire(shooter);
        }

        self.check_end()
    }

    fn fire(&mut self, shooter: Shooter) {
        let origin = match shooter {
            Shooter::Player => self.entities.player.top,
            Shooter::Enemy(index) => match self.entities.enemies.get(index) {
                Some(enemy) => enemy.top,
                None => return,
            },
        };

        let outcome = self.raycaster.cast(
            &mut self.scene,
            &mut self.entities.player,
            &mut self.entities.enemies,
            origin,
            false,
            &mut self.sound,
        );

        if let Some(outcome) = outcome {
            match outcome.effect {
                HitEffect::EnemyDamaged { index, destroyed: true, .. } => {
                    info!("Enemy {} destroyed ({} of {})", index, self.destroyed_enemies(), self.entities.enemies.len());
                }
                HitEffect::PlayerDamaged { amount } => {
                    info!("Player took {:.1} damage, health {:.1}", amount, self.entities.player.health());
                }
                _ => {}
            }
        }
    }

    fn check_end(&mut self) -> GameStatus {
        if self.entities.player.is_dead() {
            self.status = GameStatus::Lost;
        } else if self.entities.all_enemies_destroyed() {
            self.status = GameStatus::Won;
        }
        if self.status != GameStatus::Running {
            info!("Match over after {:.1}s: {:?}", self.elapsed, self.status);
        }
        self.status
    }

    /// Current match state
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of enemies destroyed so far
    pub fn destroyed_enemies(&self) -> usize {
        self.entities.destroyed_enemies()
    }

    /// Simulated seconds since the match started
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Scene being simulated
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Mutable scene access, for scripted setups
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    /// Entities of the match
    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    /// Mutable entity access, for scripted setups
    pub fn entities_mut(&mut self) -> &mut EntityManager {
        &mut self.entities
    }

    /// Sound sink receiving the match's cues
    pub fn sound(&self) -> &S {
        &self.sound
    }

    /// Mutable sound sink access
    pub fn sound_mut(&mut self) -> &mut S {
        &mut self.sound
    }
}
