//! Processing configuration.
//!
//! Handles loading and validating `config.toml`. The backend deploys one
//! config next to the binary; everything has a sensible default, so the
//! file is optional and sparse — override just the values you want:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! public_prefix = "results/images"  # Recorded filepath prefix
//!
//! [output]
//! jpeg_quality = 90         # JPEG encoding quality (1-100)
//!
//! [filter]
//! mood = 0.5                # Default filter intensity (0.0-1.0)
//! saturation_scale = 1.2    # Vivid: saturation multiplier
//! sharp_amount = 0.3        # Vivid: unsharp mask strength
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Pipeline configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessConfig {
    /// Prefix prepended to the filename in the recorded `filepath`,
    /// matching where the backend serves results from.
    pub public_prefix: String,
    /// Output encoding settings.
    pub output: OutputConfig,
    /// Filter tuning.
    pub filter: FilterConfig,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            public_prefix: "results/images".to_string(),
            output: OutputConfig::default(),
            filter: FilterConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG encoding quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { jpeg_quality: 90 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Default intensity for the sad and sketch filters (0.0-1.0).
    pub mood: f32,
    /// Vivid: HSV saturation multiplier.
    pub saturation_scale: f32,
    /// Vivid: unsharp mask strength.
    pub sharp_amount: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            mood: 0.5,
            saturation_scale: 1.2,
            sharp_amount: 0.3,
        }
    }
}

impl ProcessConfig {
    /// Shorthand accessors used throughout the filter engine.
    pub fn mood(&self) -> f32 {
        self.filter.mood
    }

    /// Load a config file, or the defaults when `path` does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: ProcessConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.jpeg_quality == 0 || self.output.jpeg_quality > 100 {
            return Err(ConfigError::Validation(
                "output.jpeg_quality must be 1-100".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.filter.mood) {
            return Err(ConfigError::Validation(
                "filter.mood must be 0.0-1.0".into(),
            ));
        }
        if self.filter.saturation_scale <= 0.0 {
            return Err(ConfigError::Validation(
                "filter.saturation_scale must be positive".into(),
            ));
        }
        if self.filter.sharp_amount < 0.0 {
            return Err(ConfigError::Validation(
                "filter.sharp_amount must not be negative".into(),
            ));
        }
        Ok(())
    }
}

// Kept in sync with the defaults above; `stock_matches_defaults` guards it.
const STOCK_CONFIG: &str = r#"# photoprep configuration
# All options are optional - defaults shown below.

# Prefix prepended to the recorded filepath (where the backend serves from)
public_prefix = "results/images"

[output]
# JPEG encoding quality (1-100)
jpeg_quality = 90

[filter]
# Default intensity for the sad and sketch filters (0.0-1.0)
mood = 0.5
# Vivid: saturation multiplier
saturation_scale = 1.2
# Vivid: unsharp mask strength
sharp_amount = 0.3
"#;

/// A documented stock `config.toml`, printed by `photoprep gen-config`.
pub fn stock_config_toml() -> &'static str {
    STOCK_CONFIG
}
