//! Registry configuration

use plugsy_core::PlugsyError;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

pub const ENV_REGISTRY_NAME: &str = "PLUGSY_REGISTRY_NAME";
pub const ENV_MAX_DEPTH: &str = "PLUGSY_MAX_DEPTH";

const DEFAULT_NAME: &str = "plugsy";
const DEFAULT_MAX_DEPTH: usize = 64;

/// Error type for loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl From<ConfigError> for PlugsyError {
    fn from(err: ConfigError) -> Self {
        PlugsyError::config_error(err.to_string())
    }
}

/// Settings for a `PluginRegistry`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name reported in snapshots and logs
    pub name: String,
    /// Deepest allowed nesting of `register` calls made from inside plugins
    pub max_depth: usize,
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read overrides from `PLUGSY_REGISTRY_NAME` and `PLUGSY_MAX_DEPTH`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        if let Some(name) = lookup(ENV_REGISTRY_NAME) {
            config.name = name;
        }
        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            config.max_depth = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue { key: ENV_MAX_DEPTH.to_string(), reason: e.to_string() }
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject settings a registry cannot work with; a depth of 0 would
    /// refuse every registration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}
