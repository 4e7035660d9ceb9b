//! Geometry queries used for collision detection and hit detection
//!
//! Everything here works on world-space axis-aligned boxes:
//! - [`aabb`] - overlap tests and single-axis minimum translation vectors
//! - [`ray`] - slab-method ray/box intersection

pub mod aabb;
pub mod ray;

pub use aabb::{Aabb, first_overlap, minimum_translation};
pub use ray::{Ray, RayInterval};
