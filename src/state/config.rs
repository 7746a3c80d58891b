use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::error::StoreResult;
use crate::timeline::AnimationDuration;

/// Errors that can occur while loading store configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
}

/// Tunables for a [`DesignStore`](crate::store::DesignStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to the defaults below
pub struct StoreConfig {
    /// Duration given to lazily created animations, in milliseconds
    pub default_duration_ms: u64,
    /// Delay given to lazily created animations, in milliseconds
    pub default_delay_ms: u64,
    /// Maximum number of undo steps kept
    pub history_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: AnimationDuration::ONE_SECOND.as_millis(),
            default_delay_ms: 0,
            history_limit: 100,
        }
    }
}

impl StoreConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn default_duration(&self) -> StoreResult<AnimationDuration> {
        AnimationDuration::new(self.default_duration_ms)
    }
}
