//! Enemy tanks
//!
//! Enemies patrol the route graph until the player comes within range, then
//! stop, swing the turret onto the player and fire on a fixed cadence.

use log::{debug, info};
use rand::Rng;
use tank_engine::foundation::math::{facing_rotation, forward, Vec3};
use tank_engine::scene::{NodeId, SceneGraph};

use crate::audio::{SoundCue, SoundSink};
use crate::config::{EnemyConfig, TankPreset};
use crate::entities::path::PathGraph;

/// Requests an enemy's update hands back to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
    /// The turret fired; cast a ray from it
    Fire,
}

/// Destroyed-model twin swapped in when the enemy dies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wreck {
    /// Destroyed hull
    pub bot: NodeId,
    /// Destroyed turret, a child of the destroyed hull
    pub top: NodeId,
}

/// An AI-driven tank
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Position in the session's enemy list
    pub index: usize,
    /// Hull node, a scene root
    pub bot: NodeId,
    /// Turret node, a child of the hull
    pub top: NodeId,
    /// Destroyed model, if the arena provides one
    pub wreck: Option<Wreck>,
    stats: TankPreset,
    health: f32,
    velocity: Vec3,
    destroyed: bool,
    locked_on: bool,
    fire_cooldown: f32,
    previous: Option<usize>,
    current: Option<usize>,
    next: Option<usize>,
    settings: EnemyConfig,
}

impl Enemy {
    /// Create an enemy around existing scene nodes
    pub fn new(
        index: usize,
        stats: TankPreset,
        settings: &EnemyConfig,
        bot: NodeId,
        top: NodeId,
        wreck: Option<Wreck>,
    ) -> Self {
        Self {
            index,
            bot,
            top,
            wreck,
            stats,
            health: stats.max_health,
            velocity: Vec3::zeros(),
            destroyed: false,
            locked_on: false,
            fire_cooldown: settings.fire_cooldown,
            previous: None,
            current: None,
            next: None,
            settings: settings.clone(),
        }
    }

    /// Current health
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Damage dealt per hit
    pub fn damage(&self) -> f32 {
        self.stats.damage
    }

    /// Whether the tank has been destroyed
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether the turret is tracking the player
    pub fn is_locked_on(&self) -> bool {
        self.locked_on
    }

    /// Waypoint the tank is driving towards
    pub fn next_waypoint(&self) -> Option<usize> {
        self.next
    }

    /// Waypoint the tank last reached
    pub fn current_waypoint(&self) -> Option<usize> {
        self.current
    }

    /// Waypoint reached before the current one
    pub fn previous_waypoint(&self) -> Option<usize> {
        self.previous
    }

    /// Whether `id` is the hull or the turret
    pub fn owns(&self, id: NodeId) -> bool {
        id == self.bot || id == self.top
    }

    /// Snap onto the route: the nearest waypoint becomes the current one
    pub fn start_route<R: Rng + ?Sized>(&mut self, scene: &SceneGraph, paths: &PathGraph, rng: &mut R) {
        let Some(position) = scene.world_position(self.bot) else {
            return;
        };
        self.current = paths.closest(&position);
        self.previous = self.current;
        self.next = self.current.and_then(|current| paths.random_neighbour(current, rng));
        debug!("Enemy {} starts at waypoint {:?} heading to {:?}", self.index, self.current, self.next);
    }

    /// Apply damage; returns true when this hit destroyed the tank
    pub fn reduce_health(&mut self, amount: f32, scene: &mut SceneGraph, sound: &mut dyn SoundSink) -> bool {
        if self.destroyed {
            return false;
        }
        self.health -= amount;
        debug!("Enemy {} hit for {:.1}, health {:.1}", self.index, amount, self.health);
        if self.health > 0.0 {
            return false;
        }

        self.destroyed = true;
        self.locked_on = false;
        self.velocity = Vec3::zeros();
        sound.play(SoundCue::Boom);

        if let Some(wreck) = self.wreck {
            swap_matrices(scene, self.bot, wreck.bot);
            swap_matrices(scene, self.top, wreck.top);
        }
        info!("Enemy {} destroyed", self.index);
        true
    }

    /// Advance the tank by `dt` seconds
    ///
    /// `target` is the player's hull position, if the player is alive.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        scene: &mut SceneGraph,
        paths: &PathGraph,
        target: Option<Vec3>,
        rng: &mut R,
    ) -> Option<EnemyAction> {
        if self.destroyed {
            return None;
        }
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);

        let position = scene.world_position(self.bot)?;

        let locked_target = target.filter(|target| {
            let mut offset = target - position;
            offset.y = 0.0;
            offset.magnitude() <= self.settings.lock_on_range
        });
        if locked_target.is_some() != self.locked_on {
            debug!("Enemy {} lock-on {}", self.index, locked_target.is_some());
        }
        self.locked_on = locked_target.is_some();

        if let Some(target) = locked_target {
            self.aim_turret(scene, &target);
            self.velocity *= 1.0 - self.settings.friction;
            self.move_hull(scene, dt);

            if self.fire_cooldown <= 0.0 {
                self.fire_cooldown = self.settings.fire_cooldown;
                debug!("Enemy {} fires", self.index);
                return Some(EnemyAction::Fire);
            }
            return None;
        }

        self.follow_route(dt, scene, paths, &position, rng);
        None
    }

    fn aim_turret(&self, scene: &mut SceneGraph, target: &Vec3) {
        let Some(turret_position) = scene.world_position(self.top) else {
            return;
        };
        let Some(hull_rotation) = scene.get(self.bot).map(|bot| bot.rotation) else {
            return;
        };
        if let Some(top) = scene.get_mut(self.top) {
            top.rotation = hull_rotation.inverse() * facing_rotation(&turret_position, target);
            top.update_matrix();
        }
    }

    fn follow_route<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        scene: &mut SceneGraph,
        paths: &PathGraph,
        position: &Vec3,
        rng: &mut R,
    ) {
        let Some(waypoint) = self.next.and_then(|next| paths.node(next)) else {
            return;
        };
        let goal = waypoint.position;

        let mut to_goal = goal - position;
        to_goal.y = 0.0;
        let distance = to_goal.magnitude();

        if distance <= self.settings.stop_distance {
            self.previous = self.current;
            self.current = self.next;
            self.next = self.current.and_then(|current| paths.random_neighbour(current, rng));
            debug!("Enemy {} reached waypoint {:?}, next {:?}", self.index, self.current, self.next);
            return;
        }

        if let Some(bot) = scene.get_mut(self.bot) {
            bot.rotation = facing_rotation(position, &goal);
            bot.update_matrix();
        }
        let hull_forward = scene
            .world_transform(self.bot)
            .map_or_else(Vec3::zeros, |world| forward(&world, false));

        // Tracks only roll along the hull
        self.velocity = hull_forward * self.velocity.magnitude();
        self.velocity += hull_forward * dt * self.settings.acceleration_factor * self.stats.speed;

        if distance < self.settings.braking_distance {
            self.velocity *= 1.0 - self.settings.friction;
        }

        let speed = self.velocity.magnitude();
        if speed > self.settings.max_speed {
            self.velocity *= self.settings.max_speed / speed;
        }

        self.move_hull(scene, dt);
    }

    fn move_hull(&self, scene: &mut SceneGraph, dt: f32) {
        if let Some(bot) = scene.get_mut(self.bot) {
            bot.translate(&(self.velocity * dt));
        }
    }
}

fn swap_matrices(scene: &mut SceneGraph, a: NodeId, b: NodeId) {
    let (Some(matrix_a), Some(matrix_b)) = (
        scene.get(a).map(|node| *node.matrix()),
        scene.get(b).map(|node| *node.matrix()),
    ) else {
        return;
    };
    if let Some(node) = scene.get_mut(a) {
        node.set_matrix(matrix_b);
    }
    if let Some(node) = scene.get_mut(b) {
        node.set_matrix(matrix_a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundManager;
    use crate::config::SoundConfig;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tank_engine::scene::Node;

    const EPSILON: f32 = 1e-4;

    struct Fixture {
        scene: SceneGraph,
        enemy: Enemy,
        paths: PathGraph,
        rng: StdRng,
    }

    fn fixture(spawn: Vec3) -> Fixture {
        let mut scene = SceneGraph::new();
        let bot = scene.insert(Node::new("enemy.0.bot").with_translation(spawn).as_entity());
        let top = scene.insert(Node::new("enemy.0.top").with_translation(Vec3::new(0.0, 1.0, 0.0)).as_entity());
        let wreck_bot = scene.insert(Node::new("enemy.0.wreck.bot").with_translation(Vec3::new(0.0, -50.0, 0.0)));
        let wreck_top = scene.insert(Node::new("enemy.0.wreck.top").with_translation(Vec3::new(0.0, 0.5, 0.0)));
        scene.add_node(bot).unwrap();
        scene.add_child(bot, top).unwrap();
        scene.add_node(wreck_bot).unwrap();
        scene.add_child(wreck_bot, wreck_top).unwrap();

        let paths = PathGraph::from_markers([
            ("path.01.02", Vec3::new(0.0, 0.0, 0.0)),
            ("path.02.01", Vec3::new(20.0, 0.0, 0.0)),
        ])
        .unwrap();

        let settings = EnemyConfig::default();
        let enemy = Enemy::new(
            0,
            settings.preset(0),
            &settings,
            bot,
            top,
            Some(Wreck { bot: wreck_bot, top: wreck_top }),
        );

        Fixture {
            scene,
            enemy,
            paths,
            rng: StdRng::seed_from_u64(11),
        }
    }

    #[test]
    fn test_route_starts_at_closest_waypoint() {
        let mut f = fixture(Vec3::new(1.0, 0.0, 0.0));
        f.enemy.start_route(&f.scene, &f.paths, &mut f.rng);

        assert_eq!(f.enemy.current_waypoint(), Some(0));
        assert_eq!(f.enemy.next_waypoint(), Some(1));
    }

    #[test]
    fn test_patrol_drives_towards_next_waypoint_and_advances() {
        let mut f = fixture(Vec3::new(1.0, 0.0, 0.0));
        f.enemy.start_route(&f.scene, &f.paths, &mut f.rng);

        f.enemy.update(0.1, &mut f.scene, &f.paths, None, &mut f.rng);
        let moved = f.scene.get(f.enemy.bot).unwrap().translation;
        assert!(moved.x > 1.0);
        assert_relative_eq!(moved.z, 0.0, epsilon = EPSILON);

        for _ in 0..2000 {
            f.enemy.update(0.1, &mut f.scene, &f.paths, None, &mut f.rng);
            if f.enemy.current_waypoint() == Some(1) {
                break;
            }
        }
        assert_eq!(f.enemy.current_waypoint(), Some(1));
        assert_eq!(f.enemy.previous_waypoint(), Some(0));
        assert_eq!(f.enemy.next_waypoint(), Some(0));
    }

    #[test]
    fn test_lock_on_aims_turret_and_fires_on_cooldown() {
        let mut f = fixture(Vec3::new(0.0, 0.0, 0.0));
        let player = Vec3::new(0.0, 0.0, 10.0);

        let mut shots = 0;
        for _ in 0..40 {
            if f.enemy.update(0.1, &mut f.scene, &f.paths, Some(player), &mut f.rng).is_some() {
                shots += 1;
            }
        }

        assert!(f.enemy.is_locked_on());
        assert_eq!(shots, 1);
        let aim = forward(&f.scene.world_transform(f.enemy.top).unwrap(), false);
        assert_relative_eq!(aim, Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_out_of_range_player_is_ignored() {
        let mut f = fixture(Vec3::new(0.0, 0.0, 0.0));
        let far = Vec3::new(0.0, 0.0, 25.0);

        for _ in 0..100 {
            assert_eq!(f.enemy.update(0.1, &mut f.scene, &f.paths, Some(far), &mut f.rng), None);
        }
        assert!(!f.enemy.is_locked_on());
    }

    #[test]
    fn test_destruction_swaps_in_wreck_once() {
        let mut f = fixture(Vec3::new(5.0, 0.0, 5.0));
        let mut sound = SoundManager::new(SoundConfig::default());

        assert!(!f.enemy.reduce_health(60.0, &mut f.scene, &mut sound));
        assert!(f.enemy.reduce_health(60.0, &mut f.scene, &mut sound));
        assert!(!f.enemy.reduce_health(60.0, &mut f.scene, &mut sound));

        let wreck = f.enemy.wreck.unwrap();
        assert!(f.enemy.is_destroyed());
        assert_eq!(sound.count(SoundCue::Boom), 1);
        assert_relative_eq!(f.scene.world_position(wreck.bot).unwrap(), Vec3::new(5.0, 0.0, 5.0), epsilon = EPSILON);
        assert_relative_eq!(f.scene.world_position(f.enemy.bot).unwrap(), Vec3::new(0.0, -50.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(f.scene.world_position(wreck.top).unwrap(), Vec3::new(5.0, 1.0, 5.0), epsilon = EPSILON);
        assert_eq!(f.enemy.update(0.1, &mut f.scene, &f.paths, None, &mut f.rng), None);
    }
}
