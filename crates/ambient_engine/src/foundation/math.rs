//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the handful of helpers the backdrop needs.

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// 2 * Pi
    pub const TAU: f32 = std::f32::consts::TAU;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Wrap `value` to the opposite face of `[-bound, bound]` once it crosses one.
    ///
    /// A value sitting exactly on a face is still inside and is left alone.
    pub fn wrap_toroidal(value: f32, bound: f32) -> f32 {
        if value > bound {
            -bound
        } else if value < -bound {
            bound
        } else {
            value
        }
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Rotation for an object carrying Euler angles about X then Y.
    fn rotation_xy(x: f32, y: f32) -> Mat4;

    /// Create a right-handed perspective projection matrix (depth in [-1, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_xy(x: f32, y: f32) -> Mat4 {
        Self::rotation_x(x) * Self::rotation_y(y)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_only_past_the_face() {
        assert_eq!(utils::wrap_toroidal(10.0, 10.0), 10.0);
        assert_eq!(utils::wrap_toroidal(-10.0, 10.0), -10.0);
        assert_eq!(utils::wrap_toroidal(10.001, 10.0), -10.0);
        assert_eq!(utils::wrap_toroidal(-10.001, 10.0), 10.0);
        assert_eq!(utils::wrap_toroidal(3.5, 10.0), 3.5);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let rotated = Mat4::rotation_y(std::f32::consts::FRAC_PI_2)
            .transform_vector(&Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_xy_with_zero_angles_is_identity() {
        assert_relative_eq!(Mat4::rotation_xy(0.0, 0.0), Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(utils::lerp(720.0, -100.0, 0.0), 720.0);
        assert_eq!(utils::lerp(720.0, -100.0, 1.0), -100.0);
    }
}
