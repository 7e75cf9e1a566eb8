//! Mixer configuration

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Smallest accepted `sample_step`
pub const MIN_SAMPLE_STEP: f64 = 1e-4;

/// Errors that can occur when loading a mixer configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration for anchor matching and part assembly
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MixerConfig {
    /// Maximum Manhattan distance between an anchor and a curve sample
    pub tolerance: f64,
    /// Parametric sampling step along each curve segment
    pub sample_step: f64,
    /// Bind the same part to every slot of a category (both eyes, both arms)
    pub enforce_symmetry: bool,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            tolerance: 2.0,
            sample_step: 0.1,
            enforce_symmetry: true,
        }
    }
}

impl MixerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_sample_step(mut self, step: f64) -> Self {
        self.sample_step = step;
        self
    }

    pub fn with_symmetry(mut self, enforce: bool) -> Self {
        self.enforce_symmetry = enforce;
        self
    }

    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load config from TOML string; missing keys keep their defaults
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: MixerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_step.is_nan()
            || self.sample_step < MIN_SAMPLE_STEP
            || self.sample_step > 1.0
        {
            return Err(ConfigError::Invalid {
                field: "sample_step",
                reason: format!("{} is not in [{MIN_SAMPLE_STEP}, 1]", self.sample_step),
            });
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "tolerance",
                reason: format!("{} is negative", self.tolerance),
            });
        }
        Ok(())
    }
}
