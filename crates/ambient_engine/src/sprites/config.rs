//! Sprite emitter configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Sprite emitter tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteEmitterConfig {
    /// Period of the spawn timer
    pub spawn_interval_ms: u64,
    /// Extra one-off spawns after start, so the layer is not empty at first
    pub warmup_offsets_ms: Vec<u64>,
    /// Shortest sprite lifetime
    pub lifetime_min_ms: u64,
    /// Longest sprite lifetime
    pub lifetime_max_ms: u64,
    /// Largest horizontal drift over a lifetime, either direction, in pixels
    pub max_drift: f32,
    /// Scale the pulse oscillates around
    pub base_scale: f32,
    /// Relative pulse amplitude
    pub pulse_amplitude: f32,
    /// Full pulses over one lifetime
    pub pulses_per_lifetime: f32,
    /// How far above the top edge a sprite ends, in pixels
    pub exit_overshoot: f32,
    /// Share of the lifetime spent fading in, and again fading out
    pub fade_fraction: f32,
    /// Most sprites alive at once
    pub max_active: usize,
}

impl Default for SpriteEmitterConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 3000,
            warmup_offsets_ms: vec![1000, 2000],
            lifetime_min_ms: 15_000,
            lifetime_max_ms: 25_000,
            max_drift: 100.0,
            base_scale: 1.0,
            pulse_amplitude: 0.2,
            pulses_per_lifetime: 4.0,
            exit_overshoot: 100.0,
            fade_fraction: 0.1,
            max_active: 32,
        }
    }
}

impl SpriteEmitterConfig {
    /// Spawn timer period
    pub const fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Warm-up spawn offsets from start
    pub fn warmup_offsets(&self) -> impl Iterator<Item = Duration> + '_ {
        self.warmup_offsets_ms.iter().map(|ms| Duration::from_millis(*ms))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::Invalid("sprites.spawn_interval_ms must be positive".into()));
        }
        if self.lifetime_min_ms == 0 || self.lifetime_min_ms > self.lifetime_max_ms {
            return Err(ConfigError::Invalid(
                "sprites.lifetime_min_ms must be positive and not above lifetime_max_ms".into(),
            ));
        }
        let values = [
            self.max_drift,
            self.base_scale,
            self.pulse_amplitude,
            self.pulses_per_lifetime,
            self.exit_overshoot,
            self.fade_fraction,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ConfigError::Invalid("sprites values must be finite".into()));
        }
        if !(self.max_drift >= 0.0)
            || !(2.0 * self.max_drift).is_finite()
            || !(self.exit_overshoot >= 0.0)
        {
            return Err(ConfigError::Invalid(
                "sprites.max_drift and sprites.exit_overshoot cannot be negative".into(),
            ));
        }
        if !(self.base_scale > 0.0) || !(0.0..1.0).contains(&self.pulse_amplitude) {
            return Err(ConfigError::Invalid(
                "sprites.base_scale must be positive and pulse_amplitude in [0, 1)".into(),
            ));
        }
        if !(0.0..=0.5).contains(&self.fade_fraction) {
            return Err(ConfigError::Invalid("sprites.fade_fraction must be in [0, 0.5]".into()));
        }
        if self.max_active == 0 {
            return Err(ConfigError::Invalid("sprites.max_active must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpriteEmitterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_interval(), Duration::from_secs(3));
        assert_eq!(
            config.warmup_offsets().collect::<Vec<_>>(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[test]
    fn test_rejects_inverted_lifetime_range() {
        let config = SpriteEmitterConfig {
            lifetime_min_ms: 30_000,
            lifetime_max_ms: 10_000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = SpriteEmitterConfig { spawn_interval_ms: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let config = SpriteEmitterConfig { max_drift: f32::INFINITY, ..Default::default() };
        assert!(config.validate().is_err());

        let config = SpriteEmitterConfig { max_drift: f32::MAX, ..Default::default() };
        assert!(config.validate().is_err());

        let config = SpriteEmitterConfig { pulses_per_lifetime: f32::NAN, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_overlapping_fades() {
        let config = SpriteEmitterConfig { fade_fraction: 0.6, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
