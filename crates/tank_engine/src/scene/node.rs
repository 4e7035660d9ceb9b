//! Transform-graph nodes

use std::sync::Arc;

use crate::foundation::math::{Mat4, Quat, Transform, Vec3};
use crate::scene::mesh::Mesh;
use crate::scene::NodeId;

/// Powerup tag carried by a node
///
/// Replaces a nullable "is health" flag: only `Health` and `Ammo` nodes are
/// collectible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    /// Ordinary node, not collectible
    #[default]
    NotPowerup,
    /// Restores health when collected
    Health,
    /// Restores ammunition when collected
    Ammo,
}

impl PowerupKind {
    /// Whether the node can be collected at all
    pub fn is_powerup(self) -> bool {
        self != Self::NotPowerup
    }
}

/// A transform-graph element
///
/// The local matrix is cached and kept in sync with translation, rotation and
/// scale by every mutator on this type. Parent and child links are managed by
/// [`SceneGraph`](crate::scene::SceneGraph).
#[derive(Debug, Clone)]
pub struct Node {
    /// Node name from the asset, for logs and lookups
    pub name: String,
    /// Local translation
    pub translation: Vec3,
    /// Local rotation
    pub rotation: Quat,
    /// Local scale
    pub scale: Vec3,
    /// Shared geometry, if the node is drawable
    pub mesh: Option<Arc<Mesh>>,
    /// Node drives gameplay (tank part or powerup)
    pub is_entity: bool,
    /// Powerup tag
    pub powerup: PowerupKind,
    matrix: Mat4,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// Create an identity node with the given name
    pub fn new(name: impl Into<String>) -> Self {
        let Transform { position, rotation, scale } = Transform::default();
        Self {
            name: name.into(),
            translation: position,
            rotation,
            scale,
            mesh: None,
            is_entity: false,
            powerup: PowerupKind::NotPowerup,
            matrix: Mat4::identity(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Builder pattern: Set translation
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self.update_matrix();
        self
    }

    /// Builder pattern: Set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self.update_matrix();
        self
    }

    /// Builder pattern: Attach a mesh
    pub fn with_mesh(mut self, mesh: Arc<Mesh>) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Builder pattern: Flag as gameplay entity
    pub fn as_entity(mut self) -> Self {
        self.is_entity = true;
        self
    }

    /// Builder pattern: Tag as a collectible entity
    pub fn as_powerup(mut self, kind: PowerupKind) -> Self {
        self.is_entity = true;
        self.powerup = kind;
        self
    }

    /// Local transformation matrix
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Parent handle, if attached under another node
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in document order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Recompute the local matrix from translation, rotation and scale
    pub fn update_matrix(&mut self) {
        self.matrix = Transform {
            position: self.translation,
            rotation: self.rotation,
            scale: self.scale,
        }
        .to_matrix();
    }

    /// Replace the local matrix and decompose it back into T/R/S
    pub fn set_matrix(&mut self, matrix: Mat4) {
        let transform = Transform::from_matrix(&matrix);
        self.translation = transform.position;
        self.rotation = transform.rotation;
        self.scale = transform.scale;
        self.matrix = matrix;
    }

    /// Move by `delta` in parent space
    pub fn translate(&mut self, delta: &Vec3) {
        self.translation += delta;
        self.update_matrix();
    }

    /// Spin about the local up axis
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation *= Quat::from_axis_angle(&Vec3::y_axis(), angle);
        self.update_matrix();
    }
}
