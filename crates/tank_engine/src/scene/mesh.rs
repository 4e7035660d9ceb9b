//! Shared mesh assets as seen by collision and ray queries
//!
//! Only the precomputed local bounds of each primitive matter here; vertex
//! data belongs to the renderer.

use crate::foundation::math::Vec3;
use crate::physics::Aabb;

/// One drawable part of a mesh with optional local-space bounds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Primitive {
    /// Minimum corner of the local bounding box, if the asset provided one
    pub min: Option<Vec3>,
    /// Maximum corner of the local bounding box, if the asset provided one
    pub max: Option<Vec3>,
}

impl Primitive {
    /// Primitive with complete local bounds
    pub fn with_bounds(min: Vec3, max: Vec3) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Primitive without bounds; never collides and is never hit
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Local bounds, present only when both corners exist
    pub fn bounds(&self) -> Option<Aabb> {
        Some(Aabb::new(self.min?, self.max?))
    }
}

/// Immutable geometry asset shared between nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Asset name, for logs
    pub name: String,
    /// Primitives in asset order
    pub primitives: Vec<Primitive>,
}

impl Mesh {
    /// Create a mesh from its primitives
    pub fn new(name: impl Into<String>, primitives: Vec<Primitive>) -> Self {
        Self {
            name: name.into(),
            primitives,
        }
    }

    /// Single-primitive box mesh centred on the local origin
    pub fn cuboid(name: impl Into<String>, half_extents: Vec3) -> Self {
        Self::new(name, vec![Primitive::with_bounds(-half_extents, half_extents)])
    }

    /// World-space boxes of every bounded primitive.
    ///
    /// Each local box is translated by `position`; node rotation is ignored.
    pub fn world_bounds(&self, position: &Vec3) -> Vec<Aabb> {
        self.primitives
            .iter()
            .filter_map(Primitive::bounds)
            .map(|bounds| bounds.translated(position))
            .collect()
    }
}
