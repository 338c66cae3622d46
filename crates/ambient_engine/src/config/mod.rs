//! Configuration system
//!
//! [`AmbientConfig`] gathers the tunables of both subsystems. It loads from
//! and saves to TOML or RON, picked by file extension.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

pub use crate::particles::ParticleFieldConfig;
pub use crate::sprites::SpriteEmitterConfig;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match Format::of(path)? {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of its accepted range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Top-level backdrop configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    /// Seed for both subsystems' generators; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Particle field settings
    pub particles: ParticleFieldConfig,
    /// Sprite layer settings
    pub sprites: SpriteEmitterConfig,
}

impl Config for AmbientConfig {}

impl AmbientConfig {
    /// Fix the random seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate both subsystem configurations
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.particles.validate()?;
        self.sprites.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ambient_engine_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AmbientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip_keeps_overrides() {
        let path = temp_path("round_trip.toml");
        let mut config = AmbientConfig::default().with_seed(9);
        config.particles.count = 64;
        config.sprites.spawn_interval_ms = 1500;

        config.save_to_file(&path).unwrap();
        let loaded = AmbientConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let path = temp_path("round_trip.ron");
        let config = AmbientConfig::default();

        config.save_to_file(&path).unwrap();
        let loaded = AmbientConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AmbientConfig = toml::from_str("[particles]\ncount = 50\n").unwrap();
        assert_eq!(config.particles.count, 50);
        assert_eq!(config.particles.bound, ParticleFieldConfig::default().bound);
        assert_eq!(config.sprites, SpriteEmitterConfig::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_non_finite_toml_values_fail_validation() {
        let config: AmbientConfig = toml::from_str("[sprites]\nmax_drift = inf\n").unwrap();
        assert!(config.sprites.max_drift.is_infinite());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config: AmbientConfig = toml::from_str("[particles]\nbound = inf\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = AmbientConfig::default().save_to_file(temp_path("config.yaml"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AmbientConfig::load_from_file(temp_path("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
