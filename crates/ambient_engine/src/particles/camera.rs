//! # Backdrop Camera
//!
//! Perspective camera looking at the particle cloud. The only state that
//! changes after creation is the aspect ratio, which follows the viewport.
//!
//! # Coordinate System
//! Right-handed, Y-up. The camera sits on +Z looking at the origin, matching
//! the usual WebGL scene setup so a host can feed the matrices straight into
//! a point shader.

use super::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec2, Vec3};
use crate::host::Viewport;

/// Perspective camera for the particle cloud
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Camera placed on +Z as configured
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::perspective(
            Vec3::new(0.0, 0.0, config.distance),
            config.fov_degrees,
            aspect,
            config.near,
            config.far,
        )
    }

    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs changes larger than 0.01 to keep window-drag resizes quiet.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Perspective projection
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined `P × V`
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point to viewport pixels (origin top-left).
    ///
    /// Returns `None` for points behind the camera or outside the clip volume.
    pub fn project(&self, world: Vec3, viewport: Viewport) -> Option<Vec2> {
        let clip = self.view_projection_matrix() * world.push(1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.iter().any(|c| c.abs() > 1.0) {
            return None;
        }

        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width as f32,
            (1.0 - ndc.y) * 0.5 * viewport.height as f32,
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_origin_projects_to_viewport_center() {
        let camera = Camera::default();
        let center = camera.project(Vec3::zeros(), Viewport::new(1280, 720)).unwrap();
        assert_relative_eq!(center, Vec2::new(640.0, 360.0), epsilon = 1e-3);
    }

    #[test]
    fn test_up_is_up_on_screen() {
        let camera = Camera::default();
        let viewport = Viewport::new(800, 600);
        let above = camera.project(Vec3::new(0.0, 2.0, 0.0), viewport).unwrap();
        assert!(above.y < 300.0);
    }

    #[test]
    fn test_points_behind_camera_are_culled() {
        let camera = Camera::default();
        assert!(camera.project(Vec3::new(0.0, 0.0, 50.0), Viewport::new(800, 600)).is_none());
    }

    #[test]
    fn test_aspect_ratio_feeds_projection() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(2.0);
        assert_eq!(camera.aspect, 2.0);
        let projection = camera.projection_matrix();
        assert_relative_eq!(projection[(0, 0)] * 2.0, projection[(1, 1)], epsilon = 1e-5);
    }
}
