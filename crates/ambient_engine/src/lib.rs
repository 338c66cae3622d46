//! # Ambient Engine
//!
//! Decorative backdrop animation for the L.A.R.A chat client.
//!
//! Two independent subsystems share the screen behind the chat panel:
//!
//! - **Particle field**: a fixed cloud of grey points drifting inside a
//!   bounded box while the whole cloud slowly rotates
//!   ([`particles::ParticleFieldSimulator`]).
//! - **Sprite layer**: legal-themed glyphs rising from the bottom edge,
//!   drifting sideways, pulsing and spinning until they expire
//!   ([`sprites::AmbientSpriteEmitter`]).
//!
//! [`CompositionLayer`] mounts both against host-provided surfaces and owns
//! their lifecycle. Nothing in this crate reports back to the host: every
//! environmental failure (missing mount point, zero-sized viewport, detached
//! container) skips the affected frame or spawn and is logged at debug level.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use ambient_engine::prelude::*;
//!
//! let surface = MemorySurface::new();
//! let layer = MemorySpriteLayer::new(Viewport::new(1280, 720));
//!
//! let mut composition = CompositionLayer::new(AmbientConfig::default().with_seed(7));
//! composition.mount(
//!     Some(Box::new(surface.clone())),
//!     Some(Box::new(layer.clone())),
//!     Viewport::new(1280, 720),
//!     Duration::ZERO,
//! );
//!
//! composition.frame(Duration::from_millis(16));
//! composition.unmount();
//!
//! assert!(surface.is_detached());
//! assert_eq!(layer.attached_count(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod host;
pub mod particles;
pub mod schedule;
pub mod sprites;

mod composition;

pub use composition::{CompositionLayer, CompositionState};
pub use config::{AmbientConfig, Config, ConfigError};
pub use error::AmbientError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AmbientConfig, CompositionLayer, Config, ConfigError,
        foundation::time::{Clock, ManualClock, SystemClock},
        host::{PointFrame, PointSurface, SpriteLayer, Viewport},
        host::memory::{MemorySpriteLayer, MemorySurface},
        particles::{ParticleFieldConfig, ParticleFieldSimulator, SimulatorState},
        sprites::{AmbientSpriteEmitter, EmitterState, SpriteEmitterConfig, SpriteIcon, SpriteId},
    };
}
