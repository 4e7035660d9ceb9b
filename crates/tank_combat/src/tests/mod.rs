//! End-to-end scenarios across collision, hit detection and the session loop

use std::sync::Arc;

use approx::assert_relative_eq;
use tank_engine::foundation::math::{Vec3, constants};
use tank_engine::scene::{Mesh, Node, NodeId, PowerupKind, Primitive, SceneGraph};

use crate::audio::{SoundCue, SoundManager};
use crate::config::{EnemyConfig, PickupConfig, PlayerConfig, SoundConfig};
use crate::entities::{Enemy, EntityManager, PathGraph, Player, PlayerInput};
use crate::game::{GameSession, GameStatus};
use crate::physics::CollisionResolver;
use crate::raycaster::{HitEffect, HitRecord, Raycaster, Shooter};

const EPSILON: f32 = 1e-5;

/// Player at the origin facing +X, enemy 0 at (0, 0, 20), enemy 1 at (10, 0, 0).
///
/// Hulls span [-1, 1] around their tank and turrets sit at y = 0.75 inside
/// the hull's height band. Shots are planar, so the nearer hull box is
/// struck before the turret behind it.
struct Battlefield {
    scene: SceneGraph,
    player: Player,
    enemies: Vec<Enemy>,
    sound: SoundManager,
}

fn hull_mesh() -> Arc<Mesh> {
    Arc::new(Mesh::cuboid("hull", Vec3::new(1.0, 1.0, 1.0)))
}

fn turret_mesh() -> Arc<Mesh> {
    Arc::new(Mesh::cuboid("turret", Vec3::new(0.5, 0.25, 0.5)))
}

fn tank(scene: &mut SceneGraph, name: &str, position: Vec3, hull: Arc<Mesh>) -> (NodeId, NodeId) {
    let bot = scene.insert(
        Node::new(format!("{name}.bot"))
            .with_translation(position)
            .with_mesh(hull)
            .as_entity(),
    );
    let top = scene.insert(
        Node::new(format!("{name}.top"))
            .with_translation(Vec3::new(0.0, 0.75, 0.0))
            .with_mesh(turret_mesh())
            .as_entity(),
    );
    scene.add_node(bot).unwrap();
    scene.add_child(bot, top).unwrap();
    (bot, top)
}

impl Battlefield {
    fn new() -> Self {
        let mut scene = SceneGraph::new();

        let (bot, top) = tank(&mut scene, "player", Vec3::zeros(), hull_mesh());
        let camera = scene.insert(Node::new("camera").with_translation(Vec3::new(-6.0, 3.0, 0.0)));
        scene.add_node(camera).unwrap();
        let player = Player::new(&PlayerConfig::default(), bot, top, camera);

        // Enemy 1's hull has two overlapping bounded primitives and one unbounded
        let layered = Arc::new(Mesh::new(
            "layered hull",
            vec![
                Primitive::with_bounds(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)),
                Primitive::unbounded(),
                Primitive::with_bounds(Vec3::new(-1.3, -1.0, -0.2), Vec3::new(-0.7, 1.0, 0.2)),
            ],
        ));

        let settings = EnemyConfig::default();
        let mut enemies = Vec::new();
        for (index, (position, hull)) in [
            (Vec3::new(0.0, 0.0, 20.0), hull_mesh()),
            (Vec3::new(10.0, 0.0, 0.0), layered),
        ]
        .into_iter()
        .enumerate()
        {
            let (bot, top) = tank(&mut scene, &format!("enemy.{index}"), position, hull);
            enemies.push(Enemy::new(index, settings.preset(index), &settings, bot, top, None));
        }

        Self {
            scene,
            player,
            enemies,
            sound: SoundManager::new(SoundConfig::default()),
        }
    }

    fn add_block(&mut self, name: &str, position: Vec3, half: Vec3) -> NodeId {
        let id = self.scene.insert(
            Node::new(name)
                .with_translation(position)
                .with_mesh(Arc::new(Mesh::cuboid(name, half))),
        );
        self.scene.add_node(id).unwrap();
        id
    }

    fn cast(&mut self, raycaster: &mut Raycaster, origin: NodeId) -> Option<crate::raycaster::CastOutcome> {
        raycaster.cast(
            &mut self.scene,
            &mut self.player,
            &mut self.enemies,
            origin,
            false,
            &mut self.sound,
        )
    }

    fn into_session(self) -> GameSession<SoundManager> {
        let entities = EntityManager::new(self.player, self.enemies, Vec::new(), PathGraph::default(), 1);
        GameSession::from_parts(self.scene, entities, CollisionResolver::new(PickupConfig::default()), self.sound)
    }
}

#[test]
fn health_pickup_applies_once_and_removes_node() {
    let mut field = Battlefield::new();
    let powerup = field.scene.insert(
        Node::new("powerup.health")
            .with_translation(Vec3::new(0.0, 0.0, 1.3))
            .with_mesh(Arc::new(Mesh::cuboid("powerup", Vec3::new(0.5, 0.5, 0.5))))
            .as_powerup(PowerupKind::Health),
    );
    field.scene.add_node(powerup).unwrap();
    field.player.reduce_health(50.0);
    let resolver = CollisionResolver::new(PickupConfig::default());

    let first = resolver.update(&mut field.scene, &mut field.player, &mut field.sound);
    let second = resolver.update(&mut field.scene, &mut field.player, &mut field.sound);

    assert_eq!(first.collected, 1);
    assert_eq!(second.collected, 0);
    assert_eq!(field.player.health(), 75.0);
    assert!(!field.scene.has_node(powerup));
    assert!(!field.scene.traversal_order().contains(&powerup));
    assert_eq!(field.sound.count(SoundCue::Health), 1);
}

#[test]
fn resolution_separates_without_vertical_push() {
    let mut field = Battlefield::new();
    let a = field.scene.insert(
        Node::new("a")
            .with_translation(Vec3::new(-49.0, 1.0, 1.0))
            .with_mesh(Arc::new(Mesh::cuboid("crate", Vec3::new(1.0, 1.0, 1.0))))
            .as_entity(),
    );
    field.scene.add_node(a).unwrap();
    let b = field.add_block("b", Vec3::new(-48.0, 1.0, 2.0), Vec3::new(1.0, 1.0, 1.0));

    CollisionResolver::default().update(&mut field.scene, &mut field.player, &mut field.sound);

    // A = [-50, -48] x [0, 2] x [0, 2] against B = [-49, -47] x [0, 2] x [1, 3]
    let moved = field.scene.get(a).unwrap().translation;
    assert_relative_eq!(moved, Vec3::new(-50.0, 1.0, 1.0), epsilon = EPSILON);
    assert_eq!(field.scene.get(b).unwrap().translation, Vec3::new(-48.0, 1.0, 2.0));

    let a_max_x = moved.x + 1.0;
    let b_min_x = -48.0 - 1.0;
    assert!(a_max_x <= b_min_x + EPSILON);
}

#[test]
fn player_shot_damages_enemy_once_despite_layered_primitives() {
    let mut field = Battlefield::new();
    let mut raycaster = Raycaster::new(field.enemies.len());
    let origin = field.player.top;

    let outcome = field.cast(&mut raycaster, origin).unwrap();

    assert_eq!(outcome.shooter, Shooter::Player);
    assert_eq!(outcome.hit.node, Some(field.enemies[1].bot));
    assert_relative_eq!(outcome.hit.distance, 8.7, epsilon = 1e-4);
    assert_eq!(
        outcome.effect,
        HitEffect::EnemyDamaged { index: 1, amount: 10.0, destroyed: false }
    );
    assert_eq!(field.enemies[1].health(), 65.0);
    assert_eq!(field.enemies[0].health(), 100.0);
    assert_eq!(field.sound.count(SoundCue::Bounce), 1);
    assert!(raycaster.hits().iter().all(HitRecord::is_empty));
}

#[test]
fn enemy_shot_damages_player() {
    let mut field = Battlefield::new();
    let mut raycaster = Raycaster::new(field.enemies.len());
    let origin = field.enemies[1].top;
    field.scene.get_mut(origin).unwrap().rotate_y(constants::PI);

    let outcome = field.cast(&mut raycaster, origin).unwrap();

    assert_eq!(outcome.shooter, Shooter::Enemy(1));
    assert_eq!(outcome.hit.node, Some(field.player.bot));
    assert_relative_eq!(outcome.hit.distance, 9.0, epsilon = 1e-4);
    assert_eq!(outcome.effect, HitEffect::PlayerDamaged { amount: 8.0 });
    assert_eq!(field.player.health(), 92.0);
}

#[test]
fn wall_blocks_shot() {
    let mut field = Battlefield::new();
    let wall = field.add_block("wall", Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.5, 3.0, 3.0));
    let mut raycaster = Raycaster::new(field.enemies.len());
    let origin = field.player.top;

    let outcome = field.cast(&mut raycaster, origin).unwrap();

    assert_eq!(outcome.hit.node, Some(wall));
    assert_eq!(outcome.effect, HitEffect::Ignored);
    assert_eq!(field.enemies[1].health(), 75.0);
    assert_eq!(field.sound.count(SoundCue::Bounce), 0);
}

#[test]
fn struck_powerup_takes_no_damage_and_stays() {
    let mut field = Battlefield::new();
    let powerup = field.scene.insert(
        Node::new("powerup.ammo")
            .with_translation(Vec3::new(5.0, 0.75, 0.0))
            .with_mesh(Arc::new(Mesh::cuboid("powerup", Vec3::new(0.5, 0.5, 0.5))))
            .as_powerup(PowerupKind::Ammo),
    );
    field.scene.add_node(powerup).unwrap();
    let mut raycaster = Raycaster::new(field.enemies.len());
    let origin = field.player.top;

    let outcome = field.cast(&mut raycaster, origin).unwrap();

    assert_eq!(outcome.hit.node, Some(powerup));
    assert_eq!(outcome.effect, HitEffect::Ignored);
    assert!(field.scene.has_node(powerup));
}

#[test]
fn planar_shot_strikes_pickup_below_turret_height() {
    let mut field = Battlefield::new();
    // Spans y in [-0.3, 0.3], well under the turret at 0.75
    let powerup = field.scene.insert(
        Node::new("powerup.health")
            .with_translation(Vec3::new(5.0, 0.0, 0.0))
            .with_mesh(Arc::new(Mesh::cuboid("powerup", Vec3::new(0.3, 0.3, 0.3))))
            .as_powerup(PowerupKind::Health),
    );
    field.scene.add_node(powerup).unwrap();
    let mut raycaster = Raycaster::new(field.enemies.len());
    let origin = field.player.top;

    let outcome = field.cast(&mut raycaster, origin).unwrap();

    assert_eq!(outcome.hit.node, Some(powerup));
    assert_relative_eq!(outcome.hit.distance, 4.7, epsilon = 1e-4);
    assert_eq!(outcome.effect, HitEffect::Ignored);
    assert_eq!(field.enemies[1].health(), 75.0);
}

#[test]
fn reset_hits_then_empty_scene_yields_no_action() {
    let mut field = Battlefield::new();
    for enemy in &field.enemies {
        field.scene.remove_node(enemy.bot);
    }
    let mut raycaster = Raycaster::new(field.enemies.len());
    raycaster.reset_hits();
    let origin = field.player.top;

    let outcome = field.cast(&mut raycaster, origin).unwrap();

    assert!(outcome.hit.is_empty());
    assert_eq!(outcome.effect, HitEffect::Ignored);
    assert!(field.sound.played().is_empty());
    assert!(raycaster.hits().iter().all(HitRecord::is_empty));
}

#[test]
fn repeated_casts_agree() {
    let mut field = Battlefield::new();
    let mut raycaster = Raycaster::new(field.enemies.len());
    let origin = field.player.top;

    let first = field.cast(&mut raycaster, origin).unwrap();
    let second = field.cast(&mut raycaster, origin).unwrap();

    assert_eq!(first.hit, second.hit);
    assert_eq!(field.enemies[1].health(), 55.0);
}

#[test]
fn cast_from_unowned_node_is_refused() {
    let mut field = Battlefield::new();
    let stray = field.add_block("stray", Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.5, 0.5, 0.5));
    let mut raycaster = Raycaster::new(field.enemies.len());

    assert!(field.cast(&mut raycaster, stray).is_none());
    assert!(field.sound.played().is_empty());
}

#[test]
fn session_routes_player_fire_through_raycaster() {
    let mut session = Battlefield::new().into_session();
    let trigger = PlayerInput { fire: true, ..Default::default() };

    let status = session.tick(0.016, &trigger);

    assert_eq!(status, GameStatus::Running);
    assert_eq!(session.entities().enemies[1].health(), 65.0);
    assert_eq!(session.entities().player.ammo(), 4);
    assert_eq!(session.sound().count(SoundCue::Shot), 1);
    assert_eq!(session.sound().count(SoundCue::Bounce), 1);
}

#[test]
fn locked_on_enemies_return_fire() {
    let mut session = Battlefield::new().into_session();
    let idle = PlayerInput::default();

    for _ in 0..3 {
        session.tick(1.0, &idle);
    }

    // Enemy 0 (preset 0) and enemy 1 (preset 1) both hit the hull
    assert!(session.entities().enemies.iter().all(Enemy::is_locked_on));
    assert_eq!(session.entities().player.health(), 82.0);
    assert_eq!(session.sound().count(SoundCue::Bounce), 2);
}

#[test]
fn session_is_lost_when_player_dies() {
    let mut session = Battlefield::new().into_session();
    session.entities_mut().player.reduce_health(500.0);

    assert_eq!(session.tick(0.016, &PlayerInput::default()), GameStatus::Lost);
    assert_eq!(session.tick(0.016, &PlayerInput::default()), GameStatus::Lost);
    assert_eq!(session.ticks(), 1);
}

#[test]
fn session_is_won_when_every_enemy_is_destroyed() {
    let mut field = Battlefield::new();
    for enemy in &mut field.enemies {
        assert!(enemy.reduce_health(1000.0, &mut field.scene, &mut field.sound));
    }
    let mut session = field.into_session();

    assert_eq!(session.tick(0.016, &PlayerInput::default()), GameStatus::Won);
    assert_eq!(session.destroyed_enemies(), 2);
    assert_eq!(session.status(), GameStatus::Won);
}

#[test]
fn default_arena_runs_headless() {
    let config = crate::config::GameConfig::default();
    let mut session = GameSession::new(&config, SoundManager::new(config.sound)).unwrap();
    let drive = PlayerInput { forward: true, mouse_dx: 10.0, ..Default::default() };

    for _ in 0..120 {
        session.tick(1.0 / 60.0, &drive);
    }

    assert_eq!(session.ticks(), 120);
    assert!(session.entities().player.health() > 0.0);
    assert_eq!(session.entities().remaining_powerups(session.scene()), 13);
}
