//! Particle field
//!
//! A fixed cloud of grey points drifting inside a box and slowly rotating as
//! a whole, redrawn on every display refresh.

pub mod camera;
pub mod config;
pub mod particle;
pub mod simulator;

pub use camera::Camera;
pub use config::{CameraConfig, ParticleFieldConfig};
pub use particle::Particle;
pub use simulator::{ParticleFieldSimulator, SimulatorState};
