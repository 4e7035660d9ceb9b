//! Axis-aligned bounding boxes and minimum translation vectors
//!
//! Boxes are compared with inclusive bounds, so boxes that merely touch are
//! reported as overlapping.

use crate::foundation::math::Vec3;

/// Axis-Aligned Bounding Box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Same box moved by `offset`
    pub fn translated(&self, offset: &Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Check if this AABB intersects another AABB on all three axes
    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|axis| {
            intervals_overlap(self.min[axis], self.max[axis], other.min[axis], other.max[axis])
        })
    }
}

/// Inclusive 1D interval overlap
pub fn intervals_overlap(min_a: f32, max_a: f32, min_b: f32, max_b: f32) -> bool {
    !(min_a > max_b || min_b > max_a)
}

/// First overlapping pair across two box sets, in nested iteration order.
///
/// Every box of `a` is tested against every box of `b`; the scan stops on
/// the first intersecting pair.
pub fn first_overlap<'a, 'b>(
    a: impl IntoIterator<Item = &'a Aabb>,
    b: &'b [Aabb],
) -> Option<(Aabb, Aabb)> {
    a.into_iter()
        .find_map(|box_a| b.iter().find(|box_b| box_a.intersects(box_b)).map(|box_b| (*box_a, *box_b)))
}

/// Minimum translation that pushes `a` out of `b` on a single horizontal axis.
///
/// Candidates are evaluated in the fixed order +X, +Y, +Z (from
/// `b.max - a.min`) then -X, -Y, -Z (from `a.max - b.min`). The smallest
/// strictly positive magnitude wins and an equal later candidate never
/// replaces an earlier one. The vertical component is always zeroed, so a
/// winning Y candidate yields the zero vector. When no candidate is positive
/// the result is zero as well.
pub fn minimum_translation(a: &Aabb, b: &Aabb) -> Vec3 {
    let push_positive = b.max - a.min;
    let push_negative = a.max - b.min;

    let candidates = (0..3)
        .map(|axis| (axis, push_positive[axis], 1.0))
        .chain((0..3).map(|axis| (axis, push_negative[axis], -1.0)));

    let mut best: Option<(usize, f32, f32)> = None;
    for (axis, magnitude, sign) in candidates {
        if magnitude > 0.0 && best.map_or(true, |(_, smallest, _)| magnitude < smallest) {
            best = Some((axis, magnitude, sign));
        }
    }

    let mut correction = Vec3::zeros();
    if let Some((axis, magnitude, sign)) = best {
        correction[axis] = sign * magnitude;
    }
    correction.y = 0.0;
    correction
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn aabb(min: [f32; 3], max: [f32; 3]) -> Aabb {
        Aabb::new(Vec3::from(min), Vec3::from(max))
    }

    #[test]
    fn test_aabb_intersects_is_symmetric() {
        let boxes = [
            aabb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]),
            aabb([1.0, 1.0, 1.0], [3.0, 3.0, 3.0]),
            aabb([5.0, 5.0, 5.0], [7.0, 7.0, 7.0]),
            aabb([2.0, 0.0, 0.0], [4.0, 1.0, 1.0]),
            aabb([-1.0, 3.0, -1.0], [1.0, 4.0, 1.0]),
        ];

        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersects(b), b.intersects(a));
            }
        }
    }

    #[test]
    fn test_touching_boxes_overlap() {
        let a = aabb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = aabb([2.0, 0.0, 0.0], [4.0, 2.0, 2.0]);

        assert!(a.intersects(&b));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = aabb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = aabb([0.0, 5.0, 0.0], [2.0, 6.0, 2.0]);

        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_first_overlap_short_circuits_on_first_pair() {
        let a = [aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]), aabb([10.0, 0.0, 0.0], [11.0, 1.0, 1.0])];
        let b = [aabb([10.5, 0.0, 0.0], [12.0, 1.0, 1.0]), aabb([0.5, 0.0, 0.0], [2.0, 1.0, 1.0])];

        let (hit_a, hit_b) = first_overlap(&a, &b).unwrap();
        assert_eq!(hit_a, a[0]);
        assert_eq!(hit_b, b[1]);
    }

    #[test]
    fn test_first_overlap_none_when_disjoint() {
        let a = [aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])];
        let b = [aabb([3.0, 3.0, 3.0], [4.0, 4.0, 4.0])];

        assert!(first_overlap(&a, &b).is_none());
        assert!(first_overlap(&a, &[]).is_none());
    }

    #[test]
    fn test_mtv_picks_first_smallest_candidate() {
        // +X 3, +Y 2, +Z 3, -X 1, -Y 2, -Z 1: -X wins, -Z ties and loses
        let a = aabb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = aabb([1.0, 0.0, 1.0], [3.0, 2.0, 3.0]);

        assert_relative_eq!(minimum_translation(&a, &b), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_mtv_vertical_winner_is_zeroed() {
        // Thin vertical overlap makes +Y the smallest candidate
        let a = aabb([0.0, 0.0, 0.0], [4.0, 1.0, 4.0]);
        let b = aabb([1.0, -3.0, 1.0], [3.0, 0.25, 3.0]);

        assert_eq!(minimum_translation(&a, &b), Vec3::zeros());
    }

    #[test]
    fn test_mtv_separates_on_corrected_axis() {
        let a = aabb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = aabb([1.5, 0.5, -4.0], [5.0, 1.5, 6.0]);

        let correction = minimum_translation(&a, &b);
        let moved = a.translated(&correction);

        assert_eq!(correction.y, 0.0);
        assert_relative_eq!(correction, Vec3::new(-0.5, 0.0, 0.0));
        // Only touching remains on the corrected axis
        assert!(moved.max.x <= b.min.x);
    }
}
