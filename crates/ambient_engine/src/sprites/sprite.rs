//! Sprite record and its per-frame visual

use std::time::Duration;

use super::config::SpriteEmitterConfig;
use super::icon::SpriteIcon;
use super::lifetime::Lifetime;
use crate::foundation::math::{constants, utils, Vec2};
use crate::host::Viewport;

/// What a sprite looks like on one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteVisual {
    /// Left offset in container pixels
    pub x: f32,
    /// Top offset in container pixels
    pub y: f32,
    /// Uniform scale
    pub scale: f32,
    /// Clockwise rotation in degrees
    pub rotation_degrees: f32,
    /// Opacity in [0, 1]
    pub opacity: f32,
    /// Lifetime fraction this visual was derived from, in [0, 1)
    pub progress: f32,
}

/// One live sprite
///
/// Icon, drift and lifetime are fixed at spawn; only the position follows
/// progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    icon: SpriteIcon,
    origin_x: f32,
    drift: f32,
    lifetime: Lifetime,
    position: Vec2,
    progress: f32,
}

impl Sprite {
    /// Sprite starting at `origin_x` on the bottom edge of `bounds`
    pub fn new(icon: SpriteIcon, origin_x: f32, drift: f32, lifetime: Lifetime, bounds: Viewport) -> Self {
        Self {
            icon,
            origin_x,
            drift,
            lifetime,
            position: Vec2::new(origin_x, bounds.height as f32),
            progress: 0.0,
        }
    }

    /// Glyph
    pub const fn icon(&self) -> SpriteIcon {
        self.icon
    }

    /// Horizontal drift over the whole lifetime, in pixels
    pub const fn drift(&self) -> f32 {
        self.drift
    }

    /// Spawn time and duration
    pub const fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Position as of the last animation step
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Progress as of the last animation step
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether the sprite has reached the end of its life at `now`
    pub fn is_expired(&self, now: Duration) -> bool {
        self.lifetime.is_expired(now)
    }

    /// Advance to `now` and derive this frame's visual.
    ///
    /// Returns `None` once progress reaches 1; the sprite must then be
    /// expired rather than drawn.
    pub fn animate(
        &mut self,
        now: Duration,
        bounds: Viewport,
        config: &SpriteEmitterConfig,
    ) -> Option<SpriteVisual> {
        let progress = self.lifetime.progress(now).max(self.progress);
        if progress >= 1.0 {
            return None;
        }
        self.progress = progress;

        let width = bounds.width as f32;
        let bottom = bounds.height as f32;
        self.position = Vec2::new(
            (self.origin_x + self.drift * progress).clamp(0.0, width),
            utils::lerp(bottom, -config.exit_overshoot, progress),
        );

        let pulse = (constants::TAU * config.pulses_per_lifetime * progress).sin();

        Some(SpriteVisual {
            x: self.position.x,
            y: self.position.y,
            scale: config.base_scale * config.pulse_amplitude.mul_add(pulse, 1.0),
            rotation_degrees: progress * 360.0,
            opacity: fade_envelope(progress, config.fade_fraction),
            progress,
        })
    }
}

/// Ramp up over the first `fraction` of the lifetime and down over the last.
fn fade_envelope(progress: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 1.0;
    }
    (progress / fraction).min((1.0 - progress) / fraction).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BOUNDS: Viewport = Viewport::new(1000, 800);

    fn sprite(origin_x: f32, drift: f32) -> Sprite {
        let lifetime = Lifetime::new(Duration::ZERO, Duration::from_secs(20));
        Sprite::new(SpriteIcon::Gavel, origin_x, drift, lifetime, BOUNDS)
    }

    fn at(sprite: &mut Sprite, secs: f32) -> Option<SpriteVisual> {
        sprite.animate(Duration::from_secs_f32(secs), BOUNDS, &SpriteEmitterConfig::default())
    }

    #[test]
    fn test_starts_on_the_bottom_edge() {
        let mut sprite = sprite(300.0, 50.0);
        assert_eq!(sprite.position(), Vec2::new(300.0, 800.0));

        let visual = at(&mut sprite, 0.0).unwrap();
        assert_eq!(visual.y, 800.0);
        assert_eq!(visual.x, 300.0);
        assert_eq!(visual.rotation_degrees, 0.0);
        assert_eq!(visual.opacity, 0.0);
    }

    #[test]
    fn test_halfway_through_life() {
        let mut sprite = sprite(300.0, 80.0);
        let visual = at(&mut sprite, 10.0).unwrap();

        assert_relative_eq!(visual.progress, 0.5);
        assert_relative_eq!(visual.x, 340.0);
        assert_relative_eq!(visual.y, 350.0);
        assert_relative_eq!(visual.rotation_degrees, 180.0);
        assert_relative_eq!(visual.opacity, 1.0);
        // Four pulses per lifetime: halfway is a zero crossing.
        assert_relative_eq!(visual.scale, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pulse_peaks() {
        let mut sprite = sprite(300.0, 0.0);
        // progress 1/16 is the first quarter period of a 4-pulse lifetime
        let visual = at(&mut sprite, 20.0 / 16.0).unwrap();
        assert_relative_eq!(visual.scale, 1.2, epsilon = 1e-4);
    }

    #[test]
    fn test_drift_is_clamped_to_container() {
        let mut near_right = sprite(990.0, 100.0);
        let visual = at(&mut near_right, 19.0).unwrap();
        assert_eq!(visual.x, 1000.0);

        let mut near_left = sprite(5.0, -100.0);
        let visual = at(&mut near_left, 19.0).unwrap();
        assert_eq!(visual.x, 0.0);
    }

    #[test]
    fn test_ends_above_the_top_edge() {
        let mut sprite = sprite(300.0, 0.0);
        let visual = at(&mut sprite, 19.999).unwrap();
        assert!(visual.y < 0.0);
        assert!(visual.y > -100.0);
        assert!(visual.progress < 1.0);
    }

    #[test]
    fn test_no_visual_at_end_of_life() {
        let mut sprite = sprite(300.0, 0.0);
        assert!(at(&mut sprite, 20.0).is_none());
        assert!(sprite.is_expired(Duration::from_secs(20)));
    }

    #[test]
    fn test_progress_never_goes_back() {
        let mut sprite = sprite(300.0, 0.0);
        let later = at(&mut sprite, 12.0).unwrap();
        let earlier = at(&mut sprite, 4.0).unwrap();
        assert_eq!(earlier.progress, later.progress);
    }

    #[test]
    fn test_fade_envelope() {
        assert_relative_eq!(fade_envelope(0.05, 0.1), 0.5, epsilon = 1e-5);
        assert_eq!(fade_envelope(0.5, 0.1), 1.0);
        assert_relative_eq!(fade_envelope(0.95, 0.1), 0.5, epsilon = 1e-5);
        assert_eq!(fade_envelope(0.0, 0.0), 1.0);
    }
}
