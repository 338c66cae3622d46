//! A single point of the cloud

use rand::Rng;

use super::config::ParticleFieldConfig;
use crate::foundation::math::{utils, Vec3};
use crate::host::PointVertex;

/// One point of the cloud, in cloud-local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position
    pub position: Vec3,
    /// Displacement per tick, never changed after creation
    pub velocity: Vec3,
    /// Linear RGB in [0, 1]
    pub color: Vec3,
}

impl Particle {
    /// Random particle inside the configured cube
    pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &ParticleFieldConfig) -> Self {
        let bound = config.bound;
        let speed = config.max_speed;
        let grey = rng.gen_range(config.grey_min..=config.grey_max);

        Self {
            position: Vec3::new(
                rng.gen_range(-bound..=bound),
                rng.gen_range(-bound..=bound),
                rng.gen_range(-bound..=bound),
            ),
            velocity: Vec3::new(
                rng.gen_range(-speed..=speed),
                rng.gen_range(-speed..=speed),
                rng.gen_range(-speed..=speed),
            ),
            color: Vec3::new(grey, grey, grey),
        }
    }

    /// Move one tick and wrap x and y back into `[-bound, bound]`.
    ///
    /// Z is not wrapped and drifts freely.
    pub fn advance(&mut self, bound: f32) {
        self.position += self.velocity;
        self.position.x = utils::wrap_toroidal(self.position.x, bound);
        self.position.y = utils::wrap_toroidal(self.position.y, bound);
    }

    /// Packed vertex for the surface
    pub fn vertex(&self) -> PointVertex {
        PointVertex {
            position: self.position.into(),
            color: self.color.into(),
        }
    }
}
