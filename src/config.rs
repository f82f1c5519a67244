use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DetectError;

pub const DEFAULT_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Detection settings supplied by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Classification cutoff, inclusive. Recognized range [0, 1].
    pub threshold: f64,
    /// Vocabulary cap.
    pub max_features: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] DetectError),
}

impl DetectorConfig {
    pub fn new(threshold: f64, max_features: usize) -> Result<Self, DetectError> {
        let config = Self {
            threshold,
            max_features,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values. Nothing is clamped.
    pub fn validate(&self) -> Result<(), DetectError> {
        validate_threshold(self.threshold)?;
        validate_max_features(self.max_features)
    }

    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }
}

pub fn validate_threshold(threshold: f64) -> Result<(), DetectError> {
    // NaN fails the range check as well
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(DetectError::InvalidThreshold { value: threshold })
    }
}

pub fn validate_max_features(max_features: usize) -> Result<(), DetectError> {
    if max_features == 0 {
        Err(DetectError::InvalidMaxFeatures { value: max_features })
    } else {
        Ok(())
    }
}
