//! Arena assembly
//!
//! Builds the playfield scene programmatically: boundary walls, a few
//! crates, the player's rig, enemy tanks with their wrecks parked below
//! ground, pickups and route markers.
//!
//! ```text
//! player.bot ── player.top        camera (root, follows the hull)
//! enemy.N.bot ── enemy.N.top      enemy.N.wreck.bot ── enemy.N.wreck.top
//! wall.*  crate.*  powerup.*      path.NN.a,b,c (markers, no mesh)
//! ```

use std::sync::Arc;

use log::info;
use tank_engine::foundation::math::{constants, Quat, Vec3};
use tank_engine::scene::{Mesh, Node, NodeId, PowerupKind, SceneGraph};

use crate::config::GameConfig;
use crate::entities::{Enemy, EntityManager, PathGraph, Player, Powerup, Wreck};
use crate::error::{GameError, GameResult};

/// Hull half extents shared by every tank
pub const HULL_HALF_EXTENTS: [f32; 3] = [1.2, 0.6, 1.2];

/// Turret half extents; fits inside the hull footprint
pub const TURRET_HALF_EXTENTS: [f32; 3] = [0.6, 0.3, 0.6];

/// Turret offset above its hull
pub const TURRET_OFFSET: [f32; 3] = [0.0, 0.9, 0.0];

/// Camera offset from the player's hull at spawn
pub const CAMERA_OFFSET: [f32; 3] = [-6.0, 3.0, 0.0];

/// Depth at which wrecks wait to be swapped in
const WRECK_DEPTH: f32 = -100.0;

/// Reference layout size; coordinates below scale with `half_size`
const LAYOUT_HALF_SIZE: f32 = 40.0;

const PLAYER_SPAWN: [f32; 3] = [-30.0, 0.0, 25.0];

const ROUTE: [(&str, [f32; 3]); 12] = [
    ("path.01.02", [-30.0, 0.0, -30.0]),
    ("path.02.01,03,05", [-15.0, 0.0, -30.0]),
    ("path.03.02,04,06", [0.0, 0.0, -30.0]),
    ("path.04.03", [15.0, 0.0, -30.0]),
    ("path.05.02,06", [-15.0, 0.0, -15.0]),
    ("path.06.03,05,07", [0.0, 0.0, -15.0]),
    ("path.07.06,08,12", [0.0, 0.0, 0.0]),
    ("path.08.07,09", [15.0, 0.0, 0.0]),
    ("path.09.08,10", [30.0, 0.0, 0.0]),
    ("path.10.09,11", [30.0, 0.0, 15.0]),
    ("path.11.10,12", [15.0, 0.0, 15.0]),
    ("path.12.07,11", [0.0, 0.0, 15.0]),
];

/// Route markers enemies spawn on, in spawn order
const ENEMY_SPAWNS: [usize; 6] = [8, 3, 0, 9, 4, 11];

const CRATES: [[f32; 3]; 3] = [[-22.0, 0.0, 8.0], [22.0, 0.0, -15.0], [-8.0, 0.0, -22.0]];

const PICKUP_SPOTS: [[f32; 3]; 13] = [
    [-34.0, 0.0, -10.0],
    [-25.0, 0.0, -5.0],
    [-10.0, 0.0, -5.0],
    [8.0, 0.0, -8.0],
    [8.0, 0.0, -22.0],
    [25.0, 0.0, -25.0],
    [34.0, 0.0, -10.0],
    [22.0, 0.0, 8.0],
    [8.0, 0.0, 25.0],
    [25.0, 0.0, 30.0],
    [-10.0, 0.0, 30.0],
    [-20.0, 0.0, 20.0],
    [-34.0, 0.0, 34.0],
];

/// A populated arena
#[derive(Debug)]
pub struct Arena {
    /// Scene holding every node
    pub scene: SceneGraph,
    /// Entities driving the scene
    pub entities: EntityManager,
}

struct Meshes {
    hull: Arc<Mesh>,
    turret: Arc<Mesh>,
    wreck_hull: Arc<Mesh>,
    wreck_turret: Arc<Mesh>,
    pickup: Arc<Mesh>,
    crate_box: Arc<Mesh>,
}

impl Meshes {
    fn new() -> Self {
        Self {
            hull: Arc::new(Mesh::cuboid("tank.bot", HULL_HALF_EXTENTS.into())),
            turret: Arc::new(Mesh::cuboid("tank.top", TURRET_HALF_EXTENTS.into())),
            wreck_hull: Arc::new(Mesh::cuboid("wreck.bot", HULL_HALF_EXTENTS.into())),
            wreck_turret: Arc::new(Mesh::cuboid("wreck.top", TURRET_HALF_EXTENTS.into())),
            pickup: Arc::new(Mesh::cuboid("powerup", Vec3::new(0.5, 0.5, 0.5))),
            crate_box: Arc::new(Mesh::cuboid("crate", Vec3::new(1.5, 1.5, 1.5))),
        }
    }
}

/// Build the arena described by `config`
pub fn build(config: &GameConfig) -> GameResult<Arena> {
    let scale = config.arena.half_size / LAYOUT_HALF_SIZE;
    let at = |[x, y, z]: [f32; 3]| Vec3::new(x * scale, y, z * scale);

    let meshes = Meshes::new();
    let mut scene = SceneGraph::new();

    add_walls(&mut scene, config.arena.half_size)?;
    for (i, position) in CRATES.iter().enumerate() {
        let node = Node::new(format!("crate.{i}"))
            .with_translation(at(*position))
            .with_mesh(meshes.crate_box.clone());
        add_root(&mut scene, node)?;
    }

    let player = add_player(&mut scene, &meshes, config, at(PLAYER_SPAWN))?;

    let mut markers = Vec::with_capacity(ROUTE.len());
    for (name, position) in ROUTE {
        add_root(&mut scene, Node::new(name).with_translation(at(position)))?;
        markers.push((name, at(position)));
    }
    let paths = PathGraph::from_markers(markers)?;
    if config.arena.enemy_count > 0 && paths.is_empty() {
        return Err(GameError::NoPathNodes);
    }

    let mut enemies = Vec::with_capacity(config.arena.enemy_count);
    for index in 0..config.arena.enemy_count {
        let marker = ENEMY_SPAWNS[index % ENEMY_SPAWNS.len()];
        let spawn = at(ROUTE[marker].1);
        enemies.push(add_enemy(&mut scene, &meshes, config, index, spawn)?);
    }

    let kinds = std::iter::repeat(PowerupKind::Health)
        .take(config.arena.health_powerups)
        .chain(std::iter::repeat(PowerupKind::Ammo).take(config.arena.ammo_powerups));
    let mut powerups = Vec::new();
    for (i, kind) in kinds.enumerate() {
        let label = if kind == PowerupKind::Health { "health" } else { "ammo" };
        let node = Node::new(format!("powerup.{label}.{i}"))
            .with_translation(at(PICKUP_SPOTS[i % PICKUP_SPOTS.len()]))
            .with_mesh(meshes.pickup.clone())
            .as_powerup(kind);
        powerups.push(Powerup::new(add_root(&mut scene, node)?, kind));
    }

    info!(
        "Arena built: {} nodes, {} enemies, {} powerups, {} waypoints",
        scene.len(),
        enemies.len(),
        powerups.len(),
        paths.len()
    );

    let entities = EntityManager::new(player, enemies, powerups, paths, config.arena.seed);
    Ok(Arena { scene, entities })
}

fn add_root(scene: &mut SceneGraph, node: Node) -> GameResult<NodeId> {
    let id = scene.insert(node);
    scene.add_node(id)?;
    Ok(id)
}

fn add_walls(scene: &mut SceneGraph, half_size: f32) -> GameResult<()> {
    let height = 1.5;
    let thickness = 0.5;
    let long = Vec3::new(half_size + thickness, height, thickness);
    let wide = Vec3::new(thickness, height, half_size + thickness);

    let walls = [
        ("wall.north", Vec3::new(0.0, 0.0, -half_size - thickness), long),
        ("wall.south", Vec3::new(0.0, 0.0, half_size + thickness), long),
        ("wall.west", Vec3::new(-half_size - thickness, 0.0, 0.0), wide),
        ("wall.east", Vec3::new(half_size + thickness, 0.0, 0.0), wide),
    ];
    for (name, position, half_extents) in walls {
        let mesh = Arc::new(Mesh::cuboid(name, half_extents));
        add_root(scene, Node::new(name).with_translation(position).with_mesh(mesh))?;
    }
    Ok(())
}

fn add_player(scene: &mut SceneGraph, meshes: &Meshes, config: &GameConfig, spawn: Vec3) -> GameResult<Player> {
    let bot = add_root(
        scene,
        Node::new("player.bot").with_translation(spawn).with_mesh(meshes.hull.clone()).as_entity(),
    )?;
    let top = scene.insert(
        Node::new("player.top")
            .with_translation(TURRET_OFFSET.into())
            .with_mesh(meshes.turret.clone())
            .as_entity(),
    );
    scene.add_child(bot, top)?;

    // Camera looks down its -Z; turn it to look along the hull's +X
    let camera = add_root(
        scene,
        Node::new("camera")
            .with_translation(spawn + Vec3::from(CAMERA_OFFSET))
            .with_rotation(Quat::from_axis_angle(&Vec3::y_axis(), -constants::HALF_PI)),
    )?;

    Ok(Player::new(&config.player, bot, top, camera))
}

fn add_enemy(
    scene: &mut SceneGraph,
    meshes: &Meshes,
    config: &GameConfig,
    index: usize,
    spawn: Vec3,
) -> GameResult<Enemy> {
    let bot = add_root(
        scene,
        Node::new(format!("enemy.{index}.bot"))
            .with_translation(spawn)
            .with_mesh(meshes.hull.clone())
            .as_entity(),
    )?;
    let top = scene.insert(
        Node::new(format!("enemy.{index}.top"))
            .with_translation(TURRET_OFFSET.into())
            .with_mesh(meshes.turret.clone())
            .as_entity(),
    );
    scene.add_child(bot, top)?;

    let wreck_bot = add_root(
        scene,
        Node::new(format!("enemy.{index}.wreck.bot"))
            .with_translation(Vec3::new(spawn.x, WRECK_DEPTH, spawn.z))
            .with_mesh(meshes.wreck_hull.clone()),
    )?;
    let wreck_top = scene.insert(
        Node::new(format!("enemy.{index}.wreck.top"))
            .with_translation(TURRET_OFFSET.into())
            .with_mesh(meshes.wreck_turret.clone()),
    );
    scene.add_child(wreck_bot, wreck_top)?;

    let preset = config.enemy.preset(index % config.enemy.presets.len().max(1));
    Ok(Enemy::new(
        index,
        preset,
        &config.enemy,
        bot,
        top,
        Some(Wreck { bot: wreck_bot, top: wreck_top }),
    ))
}
