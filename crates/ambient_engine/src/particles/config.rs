//! Particle field configuration

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Particle field tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleFieldConfig {
    /// Number of particles, fixed for the simulator's lifetime
    pub count: usize,
    /// Half extent of the cube particles spawn in; x and y wrap at it
    pub bound: f32,
    /// Per-axis velocity range, in units per tick
    pub max_speed: f32,
    /// Darkest grey a particle can get
    pub grey_min: f32,
    /// Lightest grey a particle can get
    pub grey_max: f32,
    /// Cloud rotation about X per tick, in radians
    pub rotation_x_per_tick: f32,
    /// Cloud rotation about Y per tick, in radians
    pub rotation_y_per_tick: f32,
    /// Point size in world units
    pub point_size: f32,
    /// Camera looking at the cloud
    pub camera: CameraConfig,
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            count: 200,
            bound: 10.0,
            max_speed: 0.01,
            grey_min: 0.4,
            grey_max: 0.7,
            rotation_x_per_tick: 0.0005,
            rotation_y_per_tick: 0.001,
            point_size: 0.1,
            camera: CameraConfig::default(),
        }
    }
}

impl ParticleFieldConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::Invalid("particles.count must be at least 1".into()));
        }
        let values = [
            self.bound,
            self.max_speed,
            self.grey_min,
            self.grey_max,
            self.rotation_x_per_tick,
            self.rotation_y_per_tick,
            self.point_size,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ConfigError::Invalid("particles values must be finite".into()));
        }
        // Spawn ranges span twice these values and must stay finite
        if !(self.bound > 0.0) || !(2.0 * self.bound).is_finite() {
            return Err(ConfigError::Invalid("particles.bound must be positive".into()));
        }
        if !(self.max_speed >= 0.0) || !(2.0 * self.max_speed).is_finite() {
            return Err(ConfigError::Invalid("particles.max_speed cannot be negative".into()));
        }
        if !(0.0..=1.0).contains(&self.grey_min)
            || !(0.0..=1.0).contains(&self.grey_max)
            || self.grey_min > self.grey_max
        {
            return Err(ConfigError::Invalid(
                "particles.grey_min..grey_max must be an ordered range within [0, 1]".into(),
            ));
        }
        self.camera.validate()
    }
}

/// Perspective camera placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Distance from the origin along +Z
    pub distance: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            distance: 20.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if [self.fov_degrees, self.distance, self.near, self.far]
            .iter()
            .any(|value| !value.is_finite())
        {
            return Err(ConfigError::Invalid("camera values must be finite".into()));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid("camera.fov_degrees must be in (0, 180)".into()));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ConfigError::Invalid("camera planes need 0 < near < far".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_cloud() {
        let config = ParticleFieldConfig { count: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_inverted_grey_range() {
        let config = ParticleFieldConfig { grey_min: 0.8, grey_max: 0.2, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let config = ParticleFieldConfig { bound: f32::INFINITY, ..Default::default() };
        assert!(config.validate().is_err());

        let config = ParticleFieldConfig { max_speed: f32::INFINITY, ..Default::default() };
        assert!(config.validate().is_err());

        let config = ParticleFieldConfig { bound: f32::MAX, ..Default::default() };
        assert!(config.validate().is_err());

        let config = ParticleFieldConfig { point_size: f32::NAN, ..Default::default() };
        assert!(config.validate().is_err());

        let mut config = ParticleFieldConfig::default();
        config.camera.far = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_camera_planes() {
        let mut config = ParticleFieldConfig::default();
        config.camera.near = 10.0;
        config.camera.far = 5.0;
        assert!(config.validate().is_err());
    }
}
