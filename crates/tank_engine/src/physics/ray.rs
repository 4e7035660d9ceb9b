//! Ray casting against axis-aligned boxes (slab method)

use crate::foundation::math::Vec3;
use crate::physics::aabb::Aabb;

/// A ray for hit detection
///
/// The direction is kept as given (not normalized), so interval parameters
/// are measured in multiples of the direction vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray
    pub direction: Vec3,
}

/// Parametric entry/exit interval of a ray through a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayInterval {
    /// Parameter where the ray enters the box (negative when the origin is past the entry)
    pub t_near: f32,
    /// Parameter where the ray leaves the box
    pub t_far: f32,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get a point along the ray at parameter t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab intersection against an AABB.
    ///
    /// The running `[t_near, t_far]` interval starts unbounded and is
    /// narrowed axis by axis; the test rejects as soon as the interval
    /// empties. An axis the ray runs parallel to (zero direction component)
    /// is skipped entirely and places no constraint on the interval.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<RayInterval> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let direction = self.direction[axis];

            if direction == 0.0 {
                continue;
            }

            let mut t1 = (aabb.min[axis] - origin) / direction;
            let mut t2 = (aabb.max[axis] - origin) / direction;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_near = t_near.max(t1);
            t_far = t_far.min(t2);

            if t_near > t_far {
                return None;
            }
        }

        Some(RayInterval { t_near, t_far })
    }
}
