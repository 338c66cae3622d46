//! Composition layer
//!
//! Mounts the particle field and the sprite layer behind the chat panel and
//! tears both down together. The two subsystems never see each other: each
//! gets its own surface, its own generator and the same frame timestamps.

use std::time::Duration;

use log::{info, warn};

use crate::config::AmbientConfig;
use crate::foundation::random::make_rng;
use crate::foundation::time::Clock;
use crate::host::{PointSurface, SpriteLayer, Viewport};
use crate::particles::ParticleFieldSimulator;
use crate::sprites::AmbientSpriteEmitter;

const PARTICLE_STREAM: u64 = 0;
const SPRITE_STREAM: u64 = 1;

/// Whether the backdrop is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionState {
    /// Not mounted yet
    Idle,
    /// Mounted and animating
    Mounted,
    /// Unmounted; a new layer is needed to mount again
    Unmounted,
}

/// Owner of both backdrop subsystems
#[derive(Debug)]
pub struct CompositionLayer {
    config: AmbientConfig,
    simulator: ParticleFieldSimulator,
    emitter: AmbientSpriteEmitter,
    state: CompositionState,
}

impl CompositionLayer {
    /// Build an idle layer.
    ///
    /// An invalid configuration is logged and replaced by the defaults (keeping
    /// the seed) so a bad config file can never take the page down.
    pub fn new(config: AmbientConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!("Backdrop configuration rejected, using defaults: {err}");
                AmbientConfig { seed: config.seed, ..AmbientConfig::default() }
            }
        };

        Self {
            simulator: ParticleFieldSimulator::new(config.particles.clone()),
            emitter: AmbientSpriteEmitter::new(
                config.sprites.clone(),
                make_rng(config.seed, SPRITE_STREAM),
            ),
            config,
            state: CompositionState::Idle,
        }
    }

    /// Attach both subsystems.
    ///
    /// Either target may be absent; that subsystem then stays idle while the
    /// other runs.
    pub fn mount(
        &mut self,
        surface: Option<Box<dyn PointSurface>>,
        sprites: Option<Box<dyn SpriteLayer>>,
        viewport: Viewport,
        now: Duration,
    ) {
        if self.state != CompositionState::Idle {
            warn!("Backdrop mount ignored: layer is {:?}", self.state);
            return;
        }

        let mut rng = make_rng(self.config.seed, PARTICLE_STREAM);
        self.simulator.initialize(surface, viewport, &mut rng);
        self.emitter.start(sprites, now);
        self.state = CompositionState::Mounted;

        info!(
            "Backdrop mounted at {}x{} (particles {:?}, sprites {:?})",
            viewport.width,
            viewport.height,
            self.simulator.state(),
            self.emitter.state()
        );
    }

    /// Drive both subsystems for one display refresh
    pub fn frame(&mut self, now: Duration) {
        if self.state != CompositionState::Mounted {
            return;
        }
        self.simulator.frame(now);
        self.emitter.frame(now);
    }

    /// Drive one frame at the clock's current reading
    pub fn frame_with(&mut self, clock: &impl Clock) {
        self.frame(clock.now());
    }

    /// Follow a viewport change
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.state == CompositionState::Mounted {
            self.simulator.resize(width, height);
        }
    }

    /// Halt the particle tick, cancel the spawn timer and expire every sprite
    pub fn unmount(&mut self) {
        if self.state == CompositionState::Unmounted {
            return;
        }
        self.simulator.teardown();
        self.emitter.stop();
        self.state = CompositionState::Unmounted;
        info!("Backdrop unmounted");
    }

    /// Current state
    pub const fn state(&self) -> CompositionState {
        self.state
    }

    /// Effective configuration
    pub const fn config(&self) -> &AmbientConfig {
        &self.config
    }

    /// The particle field
    pub const fn simulator(&self) -> &ParticleFieldSimulator {
        &self.simulator
    }

    /// The sprite emitter
    pub const fn emitter(&self) -> &AmbientSpriteEmitter {
        &self.emitter
    }
}

impl Drop for CompositionLayer {
    fn drop(&mut self) {
        self.unmount();
    }
}
