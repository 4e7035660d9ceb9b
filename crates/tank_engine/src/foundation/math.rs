//! Math utilities and types
//!
//! Provides the math aliases shared by the scene graph, the collision
//! resolver and the raycaster, plus the forward/facing helpers both of them
//! derive from a node's accumulated transform.

pub use nalgebra::{
    Vector3,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Convert to a transformation matrix (T * R * S)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Create a transform from a transformation matrix
    ///
    /// Degenerate axes (zero scale) keep a unit divisor so the rotation
    /// extraction never divides by zero.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = translation_of(matrix);

        let scale_x = Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude();
        let scale_y = Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude();
        let scale_z = Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude();
        let scale = Vec3::new(scale_x, scale_y, scale_z);

        let sx = if scale_x > f32::EPSILON { scale_x } else { 1.0 };
        let sy = if scale_y > f32::EPSILON { scale_y } else { 1.0 };
        let sz = if scale_z > f32::EPSILON { scale_z } else { 1.0 };

        let rotation_matrix = Mat3::new(
            matrix.m11 / sx, matrix.m12 / sy, matrix.m13 / sz,
            matrix.m21 / sx, matrix.m22 / sy, matrix.m23 / sz,
            matrix.m31 / sx, matrix.m32 / sy, matrix.m33 / sz,
        );
        let rotation = Quat::from_matrix(&rotation_matrix);

        Self {
            position,
            rotation,
            scale,
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Translation column of an affine transform
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix.m14, matrix.m24, matrix.m34)
}

/// Forward vector of a world transform.
///
/// Indices below are column-major (`m[8]` is row 0 of the third column).
/// Cameras look down their local -Z, so their forward is the negated third
/// basis column. Any other node reads the third column of the *inverted*
/// transform in reverse row order. The two branches are not
/// interchangeable. A singular transform is read uninverted.
///
/// The result is not normalized; ray parameters are expressed in its units.
pub fn forward(matrix: &Mat4, is_camera: bool) -> Vec3 {
    if is_camera {
        Vec3::new(-matrix[8], -matrix[9], -matrix[10])
    } else {
        let inverted = matrix.try_inverse().unwrap_or(*matrix);
        Vec3::new(inverted[10], inverted[9], inverted[8])
    }
}

/// Rotation about world-up that turns an object at `from` to face `to`.
///
/// Look-at convention first: the shortest yaw swinging local -Z onto the XZ
/// projection of `to - from`. A fixed +90° yaw correction follows, since the
/// tank assets face along their local +X axis; the result agrees with
/// [`forward`] for non-camera nodes. Coincident positions yield the
/// correction alone.
pub fn facing_rotation(from: &Vec3, to: &Vec3) -> Quat {
    let correction = Quat::from_axis_angle(&Vec3::y_axis(), constants::HALF_PI);

    let mut direction = to - from;
    direction.y = 0.0;
    if direction.magnitude_squared() <= f32::EPSILON {
        return correction;
    }

    let yaw = (-direction.x).atan2(-direction.z);
    Quat::from_axis_angle(&Vec3::y_axis(), yaw) * correction
}
