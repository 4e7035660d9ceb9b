//! Collectible powerups

use tank_engine::scene::{NodeId, PowerupKind, SceneGraph};

/// Spin applied per update (radians)
pub const SPIN_RATE: f32 = 0.01;

/// A health or ammo pickup waiting in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Powerup {
    /// Scene node carrying the pickup mesh
    pub node: NodeId,
    /// What collecting it restores
    pub kind: PowerupKind,
}

impl Powerup {
    /// Create a powerup entity for an existing node
    pub fn new(node: NodeId, kind: PowerupKind) -> Self {
        Self { node, kind }
    }

    /// Whether the pickup has been removed from the scene
    pub fn is_collected(&self, scene: &SceneGraph) -> bool {
        !scene.has_node(self.node)
    }

    /// Spin about the vertical axis while still in the scene
    pub fn update(&self, scene: &mut SceneGraph) {
        if self.is_collected(scene) {
            return;
        }
        if let Some(node) = scene.get_mut(self.node) {
            node.rotate_y(SPIN_RATE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tank_engine::foundation::math::{Quat, Vec3};
    use tank_engine::scene::Node;

    #[test]
    fn test_spins_until_collected() {
        let mut scene = SceneGraph::new();
        let node = scene.insert(Node::new("powerup.ammo").as_powerup(PowerupKind::Ammo));
        scene.add_node(node).unwrap();
        let powerup = Powerup::new(node, PowerupKind::Ammo);

        powerup.update(&mut scene);
        powerup.update(&mut scene);
        let expected = Quat::from_axis_angle(&Vec3::y_axis(), 2.0 * SPIN_RATE);
        assert_relative_eq!(scene.get(node).unwrap().rotation, expected, epsilon = 1e-6);

        scene.remove_node(node);
        powerup.update(&mut scene);
        assert!(powerup.is_collected(&scene));
        assert_relative_eq!(scene.get(node).unwrap().rotation, expected, epsilon = 1e-6);
    }
}
