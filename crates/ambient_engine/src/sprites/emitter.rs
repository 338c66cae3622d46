//! Ambient sprite emitter
//!
//! Live sprites sit in a [`SlotMap`] arena; the host [`SpriteLayer`] mirrors
//! its membership one element per key. Keys are versioned, so a removed
//! sprite's id can never alias a later one and a second removal is a no-op.
//!
//! Emitter lifecycle is `Stopped ⇄ Running`. While running, one interval
//! timer and the warm-up one-shots share a [`CancellationToken`]; `stop`
//! cancels it and expires every live sprite in the same call.

use std::time::Duration;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::Rng;
use slotmap::SlotMap;

use super::config::SpriteEmitterConfig;
use super::icon::SpriteIcon;
use super::lifetime::Lifetime;
use super::sprite::Sprite;
use crate::error::{AmbientError, AmbientResult};
use crate::host::SpriteLayer;
use crate::schedule::{CancellationToken, RepeatingTask};

slotmap::new_key_type! {
    /// Arena key of a live sprite
    pub struct SpriteId;
}

/// Emitter lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterState {
    /// No timers, no sprites, no container
    Stopped,
    /// Spawning and animating into a container
    Running,
}

/// Spawns, animates and expires decorative sprites
pub struct AmbientSpriteEmitter<R: Rng = StdRng> {
    config: SpriteEmitterConfig,
    rng: R,
    state: EmitterState,
    container: Option<Box<dyn SpriteLayer>>,
    sprites: SlotMap<SpriteId, Sprite>,
    token: CancellationToken,
    timers: Vec<RepeatingTask>,
    due: Vec<Duration>,
    finished: Vec<SpriteId>,
    clock: Duration,
    spawned: u64,
    expired: u64,
}

impl<R: Rng> std::fmt::Debug for AmbientSpriteEmitter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientSpriteEmitter")
            .field("state", &self.state)
            .field("active", &self.sprites.len())
            .field("spawned", &self.spawned)
            .field("expired", &self.expired)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl<R: Rng> AmbientSpriteEmitter<R> {
    /// Create a stopped emitter drawing randomness from `rng`
    pub fn new(config: SpriteEmitterConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            state: EmitterState::Stopped,
            container: None,
            sprites: SlotMap::with_key(),
            token: CancellationToken::new(),
            timers: Vec::new(),
            due: Vec::new(),
            finished: Vec::new(),
            clock: Duration::ZERO,
            spawned: 0,
            expired: 0,
        }
    }

    /// Start spawning into `container`.
    ///
    /// An absent or detached container leaves the emitter stopped. Starting a
    /// running emitter stops it first.
    pub fn start(&mut self, container: Option<Box<dyn SpriteLayer>>, now: Duration) {
        if self.state == EmitterState::Running {
            debug!("Sprite emitter restarted while running");
            self.stop();
        }
        if let Err(reason) = self.try_start(container, now) {
            debug!("Sprite emitter not started: {reason}");
        }
    }

    fn try_start(&mut self, container: Option<Box<dyn SpriteLayer>>, now: Duration) -> AmbientResult<()> {
        let container = container.ok_or(AmbientError::MountMissing)?;
        if container.bounds().is_none() {
            return Err(AmbientError::ContainerDetached);
        }

        self.token = CancellationToken::new();
        self.timers.clear();
        self.timers.extend(
            self.config
                .warmup_offsets()
                .map(|offset| RepeatingTask::once(now + offset, self.token.clone())),
        );
        self.timers.push(RepeatingTask::interval(
            now,
            self.config.spawn_interval(),
            self.token.clone(),
        ));

        self.container = Some(container);
        self.clock = now;
        self.state = EmitterState::Running;

        info!(
            "Sprite emitter running: every {:?}, {} warm-up spawns",
            self.config.spawn_interval(),
            self.config.warmup_offsets_ms.len()
        );
        Ok(())
    }

    /// Fire due timers, then animate and expire live sprites
    pub fn frame(&mut self, now: Duration) {
        if self.state != EmitterState::Running {
            return;
        }

        let now = now.max(self.clock);
        self.clock = now;

        self.run_timers(now);
        self.animate(now);
    }

    fn run_timers(&mut self, now: Duration) {
        let mut due = std::mem::take(&mut self.due);
        due.clear();

        for timer in &mut self.timers {
            while let Some(at) = timer.poll(now) {
                due.push(at);
            }
        }
        self.timers.retain(RepeatingTask::is_active);

        due.sort_unstable();
        for &at in &due {
            self.reap_expired(at);
            self.spawn_at(at);
        }
        self.due = due;
    }

    /// Expire sprites whose life ended by `at`, so stale ones never hold a
    /// slot under the cap during catch-up
    fn reap_expired(&mut self, at: Duration) {
        let mut finished = std::mem::take(&mut self.finished);
        finished.clear();
        finished.extend(
            self.sprites
                .iter()
                .filter(|(_, sprite)| sprite.is_expired(at))
                .map(|(id, _)| id),
        );
        for id in finished.drain(..) {
            self.expire(id);
        }
        self.finished = finished;
    }

    /// Spawn one sprite now, outside the timers
    pub fn spawn(&mut self) -> Option<SpriteId> {
        self.spawn_at(self.clock)
    }

    fn spawn_at(&mut self, at: Duration) -> Option<SpriteId> {
        match self.try_spawn(at) {
            Ok(id) => Some(id),
            Err(reason) => {
                debug!("Spawn skipped: {reason}");
                None
            }
        }
    }

    fn try_spawn(&mut self, at: Duration) -> AmbientResult<SpriteId> {
        if self.state != EmitterState::Running {
            return Err(AmbientError::NotRunning { operation: "spawn" });
        }
        let container = self.container.as_mut().ok_or(AmbientError::ContainerDetached)?;
        let bounds = container.bounds().ok_or(AmbientError::ContainerDetached)?;
        if bounds.is_empty() {
            return Err(AmbientError::EmptyViewport {
                width: bounds.width,
                height: bounds.height,
            });
        }
        if self.sprites.len() >= self.config.max_active {
            return Err(AmbientError::SpriteCapReached { cap: self.config.max_active });
        }

        let icon = SpriteIcon::ALL[self.rng.gen_range(0..SpriteIcon::ALL.len())];
        let origin_x = self.rng.gen_range(0.0..bounds.width as f32);
        let lifetime_ms = self
            .rng
            .gen_range(self.config.lifetime_min_ms..=self.config.lifetime_max_ms);
        let drift = self.rng.gen_range(-self.config.max_drift..=self.config.max_drift);

        let lifetime = Lifetime::new(at, Duration::from_millis(lifetime_ms));
        let id = self.sprites.insert(Sprite::new(icon, origin_x, drift, lifetime, bounds));
        container.attach(id, icon);
        self.spawned += 1;

        trace!("Spawned {icon} at x={origin_x:.0}, lives {lifetime_ms}ms, drift {drift:.0}px");
        Ok(id)
    }

    fn animate(&mut self, now: Duration) {
        let mut finished = std::mem::take(&mut self.finished);
        finished.clear();

        let bounds = self
            .container
            .as_ref()
            .and_then(|container| container.bounds())
            .filter(|bounds| !bounds.is_empty());

        for (id, sprite) in &mut self.sprites {
            let Some(bounds) = bounds else {
                if sprite.is_expired(now) {
                    finished.push(id);
                }
                continue;
            };

            match sprite.animate(now, bounds, &self.config) {
                Some(visual) => {
                    if let Some(container) = self.container.as_mut() {
                        container.update(id, &visual);
                    }
                }
                None => finished.push(id),
            }
        }

        for id in finished.drain(..) {
            self.expire(id);
        }
        self.finished = finished;
    }

    /// Remove a sprite and detach its element.
    ///
    /// Returns `false` if the sprite was already gone; nothing is detached
    /// twice.
    pub fn expire(&mut self, id: SpriteId) -> bool {
        if self.sprites.remove(id).is_none() {
            trace!("Sprite {id:?} already expired");
            return false;
        }
        if let Some(container) = self.container.as_mut() {
            container.detach(id);
        }
        self.expired += 1;
        true
    }

    /// Cancel the timers, expire every live sprite and release the container
    pub fn stop(&mut self) {
        self.token.cancel();
        self.timers.clear();

        let mut finished = std::mem::take(&mut self.finished);
        finished.clear();
        finished.extend(self.sprites.keys());
        for id in finished.drain(..) {
            self.expire(id);
        }
        self.finished = finished;

        self.container = None;
        if self.state == EmitterState::Running {
            info!(
                "Sprite emitter stopped: {} spawned, {} expired",
                self.spawned, self.expired
            );
        }
        self.state = EmitterState::Stopped;
    }

    /// Current lifecycle state
    pub const fn state(&self) -> EmitterState {
        self.state
    }

    /// Live sprite count
    pub fn active(&self) -> usize {
        self.sprites.len()
    }

    /// Sprites spawned since construction
    pub const fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Sprites expired since construction
    pub const fn expired(&self) -> u64 {
        self.expired
    }

    /// Whether any spawn timer can still fire
    pub fn spawn_timer_active(&self) -> bool {
        self.timers.iter().any(RepeatingTask::is_active)
    }

    /// Look up a live sprite
    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id)
    }

    /// Every live sprite
    pub fn sprites(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> {
        self.sprites.iter()
    }

    /// Configuration in use
    pub const fn config(&self) -> &SpriteEmitterConfig {
        &self.config
    }
}

impl<R: Rng> Drop for AmbientSpriteEmitter<R> {
    fn drop(&mut self) {
        self.stop();
    }
}
