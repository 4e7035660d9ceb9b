//! Collision response between tanks, walls and pickups
//!
//! Every tick, each attached mesh-bearing entity (A) is tested against every
//! other attached mesh-bearing node (B) in traversal order. Overlapping
//! pairs push A out along the minimum translation vector, with the player's
//! hull/turret/camera rig handled as a unit. When the player touches a
//! powerup it is collected and removed from the scene.

use log::{debug, trace};
use tank_engine::foundation::math::Vec3;
use tank_engine::physics::{first_overlap, minimum_translation, Aabb};
use tank_engine::scene::{NodeId, PowerupKind, SceneGraph};

use crate::audio::SoundSink;
use crate::config::PickupConfig;
use crate::entities::Player;

/// Role of node A in a collision pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPart {
    /// The player's hull
    Bottom,
    /// The player's turret
    Top,
    /// Any node that is not part of the player
    Other,
}

impl PlayerPart {
    /// Classify a node against the player's rig
    pub fn of(id: NodeId, player: &Player) -> Self {
        if id == player.bot {
            Self::Bottom
        } else if id == player.top {
            Self::Top
        } else {
            Self::Other
        }
    }
}

/// Summary of one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Overlapping pairs that were pushed apart
    pub resolved: usize,
    /// Powerups collected by the player
    pub collected: usize,
}

/// Per-tick collision resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver {
    pickups: PickupConfig,
}

impl CollisionResolver {
    /// Create a resolver with the given pickup amounts
    pub fn new(pickups: PickupConfig) -> Self {
        Self { pickups }
    }

    /// Resolve every overlapping pair once
    pub fn update(&self, scene: &mut SceneGraph, player: &mut Player, sound: &mut dyn SoundSink) -> CollisionReport {
        let mut report = CollisionReport::default();
        let order = scene.traversal_order();

        for &a in &order {
            if !is_collider(scene, a, true) {
                continue;
            }
            for &b in &order {
                if a == b || player.owns(b) {
                    continue;
                }
                if !is_collider(scene, b, false) || scene.is_related(a, b) {
                    continue;
                }
                self.resolve_pair(scene, player, a, b, sound, &mut report);
            }
        }

        report
    }

    fn resolve_pair(
        &self,
        scene: &mut SceneGraph,
        player: &mut Player,
        a: NodeId,
        b: NodeId,
        sound: &mut dyn SoundSink,
        report: &mut CollisionReport,
    ) {
        let (Some(boxes_a), Some(boxes_b)) = (world_boxes(scene, a), world_boxes(scene, b)) else {
            return;
        };
        let Some((box_a, box_b)) = first_overlap(&boxes_a, &boxes_b) else {
            return;
        };

        let correction = minimum_translation(&box_a, &box_b);
        let part = PlayerPart::of(a, player);
        trace!("Pushing {:?} ({:?}) out of {:?} by {:?}", a, part, b, correction);

        match part {
            PlayerPart::Bottom => {
                player.zero_velocity();
                translate(scene, player.camera, &correction);
                translate(scene, a, &correction);
            }
            PlayerPart::Top => {
                // The turret follows its hull
                player.zero_velocity();
                translate(scene, player.bot, &correction);
                translate(scene, player.camera, &correction);
            }
            PlayerPart::Other => translate(scene, a, &correction),
        }
        report.resolved += 1;

        if part != PlayerPart::Other {
            self.collect(scene, player, b, sound, report);
        }
    }

    fn collect(
        &self,
        scene: &mut SceneGraph,
        player: &mut Player,
        b: NodeId,
        sound: &mut dyn SoundSink,
        report: &mut CollisionReport,
    ) {
        let kind = scene.get(b).map_or(PowerupKind::NotPowerup, |node| node.powerup);
        match kind {
            PowerupKind::Health => player.add_health(self.pickups.heal_amount, sound),
            PowerupKind::Ammo => player.add_ammo(self.pickups.ammo_amount, sound),
            PowerupKind::NotPowerup => return,
        }
        scene.remove_node(b);
        report.collected += 1;
        debug!("Player collected {:?} powerup {:?}", kind, b);
    }
}

/// Attached node with a mesh; entities only when `entity_only` is set
fn is_collider(scene: &SceneGraph, id: NodeId, entity_only: bool) -> bool {
    scene.has_node(id)
        && scene
            .get(id)
            .is_some_and(|node| node.mesh.is_some() && (node.is_entity || !entity_only))
}

fn world_boxes(scene: &SceneGraph, id: NodeId) -> Option<Vec<Aabb>> {
    let position = scene.world_position(id)?;
    Some(scene.get(id)?.mesh.as_ref()?.world_bounds(&position))
}

fn translate(scene: &mut SceneGraph, id: NodeId, delta: &Vec3) {
    if let Some(node) = scene.get_mut(id) {
        node.translate(delta);
    }
}
