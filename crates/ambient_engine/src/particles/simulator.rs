//! Particle field simulator
//!
//! State machine:
//!
//! ```text
//! Uninitialized ──initialize──► Running ──teardown──► TornDown
//!       │                                                ▲
//!       └────────────────────teardown────────────────────┘
//! ```
//!
//! Ticks run only while `Running`. Teardown is terminal and may be called any
//! number of times.

use std::time::Duration;

use log::{debug, info, trace};
use rand::Rng;

use super::camera::Camera;
use super::config::ParticleFieldConfig;
use super::particle::Particle;
use crate::error::{AmbientError, AmbientResult};
use crate::foundation::math::{Mat4, Mat4Ext, Vec2};
use crate::host::{PointFrame, PointSurface, PointVertex, Viewport};
use crate::schedule::{CancellationToken, RepeatingTask};

/// Lifecycle of a [`ParticleFieldSimulator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    /// Constructed, nothing allocated
    Uninitialized,
    /// Ticking and drawing
    Running,
    /// Surface released; terminal
    TornDown,
}

/// Surface, camera and viewport of a mounted simulator
struct SimulationState {
    surface: Box<dyn PointSurface>,
    camera: Camera,
    viewport: Viewport,
}

/// Rotating cloud of drifting points
pub struct ParticleFieldSimulator {
    config: ParticleFieldConfig,
    state: SimulatorState,
    particles: Vec<Particle>,
    vertices: Vec<PointVertex>,
    rotation: Vec2,
    token: CancellationToken,
    frame_task: Option<RepeatingTask>,
    simulation: Option<SimulationState>,
    ticks: u64,
}

impl std::fmt::Debug for ParticleFieldSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleFieldSimulator")
            .field("state", &self.state)
            .field("particles", &self.particles.len())
            .field("rotation", &self.rotation)
            .field("viewport", &self.viewport())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl ParticleFieldSimulator {
    /// Create an uninitialized simulator
    pub fn new(config: ParticleFieldConfig) -> Self {
        Self {
            config,
            state: SimulatorState::Uninitialized,
            particles: Vec::new(),
            vertices: Vec::new(),
            rotation: Vec2::zeros(),
            token: CancellationToken::new(),
            frame_task: None,
            simulation: None,
            ticks: 0,
        }
    }

    /// Allocate the cloud and attach to `mount`.
    ///
    /// A missing mount or an empty viewport leaves the simulator
    /// uninitialized without allocating anything. A surface that is offered
    /// but not used is detached straight away.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        mount: Option<Box<dyn PointSurface>>,
        viewport: Viewport,
        rng: &mut R,
    ) {
        if let Err(reason) = self.try_initialize(mount, viewport, rng) {
            debug!("Particle field not initialised: {reason}");
        }
    }

    fn try_initialize<R: Rng + ?Sized>(
        &mut self,
        mount: Option<Box<dyn PointSurface>>,
        viewport: Viewport,
        rng: &mut R,
    ) -> AmbientResult<()> {
        let mut surface = mount.ok_or(AmbientError::MountMissing)?;
        if self.state != SimulatorState::Uninitialized {
            surface.detach();
            return Err(AmbientError::AlreadyDone { operation: "initialize" });
        }

        let Some(aspect) = viewport.aspect() else {
            surface.detach();
            return Err(AmbientError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        };

        let count = self.config.count;
        self.particles = (0..count).map(|_| Particle::random(rng, &self.config)).collect();
        self.vertices = Vec::with_capacity(count);

        surface.resize(viewport);
        self.simulation = Some(SimulationState {
            surface,
            camera: Camera::from_config(&self.config.camera, aspect),
            viewport,
        });

        self.token = CancellationToken::new();
        self.frame_task = Some(RepeatingTask::every_frame(self.token.clone()));
        self.state = SimulatorState::Running;

        info!(
            "Particle field running: {} particles, bound {}, viewport {}x{}",
            count, self.config.bound, viewport.width, viewport.height
        );
        Ok(())
    }

    /// Drive the per-frame task; ticks at most once per frame timestamp
    pub fn frame(&mut self, now: Duration) {
        let due = self.frame_task.as_mut().and_then(|task| task.poll(now));
        if due.is_some() {
            self.tick();
        }
    }

    /// Advance every particle, rotate the cloud and redraw
    pub fn tick(&mut self) {
        if self.state != SimulatorState::Running {
            trace!("Tick skipped: simulator is {:?}", self.state);
            return;
        }

        let bound = self.config.bound;
        for particle in &mut self.particles {
            particle.advance(bound);
        }

        self.rotation.x += self.config.rotation_x_per_tick;
        self.rotation.y += self.config.rotation_y_per_tick;
        self.ticks += 1;

        if let Err(reason) = self.render() {
            trace!("Frame not drawn: {reason}");
        }
    }

    fn render(&mut self) -> AmbientResult<()> {
        let simulation = self
            .simulation
            .as_mut()
            .ok_or(AmbientError::NotRunning { operation: "render" })?;
        if simulation.viewport.is_empty() {
            return Err(AmbientError::EmptyViewport {
                width: simulation.viewport.width,
                height: simulation.viewport.height,
            });
        }

        self.vertices.clear();
        self.vertices.extend(self.particles.iter().map(Particle::vertex));

        simulation.surface.draw(&PointFrame {
            vertices: &self.vertices,
            model: Mat4::rotation_xy(self.rotation.x, self.rotation.y),
            view_projection: simulation.camera.view_projection_matrix(),
            point_size: self.config.point_size,
        });
        Ok(())
    }

    /// Follow a viewport change; particles are left untouched
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Err(reason) = self.try_resize(Viewport::new(width, height)) {
            debug!("Resize to {width}x{height} ignored: {reason}");
        }
    }

    fn try_resize(&mut self, viewport: Viewport) -> AmbientResult<()> {
        if self.state != SimulatorState::Running {
            return Err(AmbientError::NotRunning { operation: "resize" });
        }
        let simulation = self
            .simulation
            .as_mut()
            .ok_or(AmbientError::NotRunning { operation: "resize" })?;
        let aspect = viewport.aspect().ok_or(AmbientError::EmptyViewport {
            width: viewport.width,
            height: viewport.height,
        })?;

        simulation.camera.set_aspect_ratio(aspect);
        simulation.surface.resize(viewport);
        simulation.viewport = viewport;
        Ok(())
    }

    /// Stop ticking and release the surface
    pub fn teardown(&mut self) {
        if self.state == SimulatorState::TornDown {
            return;
        }

        self.token.cancel();
        self.frame_task = None;
        if let Some(mut simulation) = self.simulation.take() {
            simulation.surface.detach();
        }
        self.particles = Vec::new();
        self.vertices = Vec::new();

        info!("Particle field torn down after {} ticks", self.ticks);
        self.state = SimulatorState::TornDown;
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SimulatorState {
        self.state
    }

    /// The cloud, in cloud-local space
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Accumulated cloud rotation (x, y) in radians
    pub const fn rotation(&self) -> Vec2 {
        self.rotation
    }

    /// Viewport the surface is sized to, while running
    pub fn viewport(&self) -> Option<Viewport> {
        self.simulation.as_ref().map(|simulation| simulation.viewport)
    }

    /// Camera, while running
    pub fn camera(&self) -> Option<&Camera> {
        self.simulation.as_ref().map(|simulation| &simulation.camera)
    }

    /// Ticks executed
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Configuration in use
    pub const fn config(&self) -> &ParticleFieldConfig {
        &self.config
    }
}

impl Drop for ParticleFieldSimulator {
    fn drop(&mut self) {
        self.teardown();
    }
}
