//! # Tank Engine
//!
//! Spatial substrate for a small real-time tank arena: a hierarchical scene
//! graph plus the bounding-box and ray queries that collision resolution and
//! hit detection are built on.
//!
//! ## Features
//!
//! - **Scene Graph**: arena-allocated nodes with parent/child handles and
//!   on-demand world transforms
//! - **Geometry**: inclusive AABB overlap, single-axis minimum translation
//!   vectors, slab-method ray intersection
//! - **Orientation helpers**: forward vectors and facing rotations derived
//!   from world transforms
//! - **Configuration**: serde-backed settings loaded from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tank_engine::prelude::*;
//!
//! let mut scene = SceneGraph::new();
//! let crate_mesh = Arc::new(Mesh::cuboid("crate", Vec3::new(1.0, 1.0, 1.0)));
//! let id = scene.insert(Node::new("crate").with_mesh(crate_mesh));
//! scene.add_node(id).unwrap();
//!
//! let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 1.0));
//! let position = scene.world_position(id).unwrap();
//! let bounds = scene.get(id).unwrap().mesh.as_ref().unwrap().world_bounds(&position);
//! assert_eq!(ray.intersect_aabb(&bounds[0]).unwrap().t_near, 9.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat},
        foundation::math::{facing_rotation, forward, Mat4, Quat, Transform, Vec3},
        physics::{first_overlap, minimum_translation, Aabb, Ray, RayInterval},
        scene::{Mesh, Node, NodeId, PowerupKind, Primitive, SceneError, SceneGraph},
    };
}
