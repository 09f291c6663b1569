//! Plugin metadata

use serde::Serialize;
use thiserror::Error;

/// Reasons plugin metadata is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaError {
    #[error("plugin name is empty")]
    EmptyName,

    #[error("plugin name {0:?} contains control characters")]
    ControlCharacter(String),
}

/// Metadata describing a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMeta {
    pub name: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
}

impl PluginMeta {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }

    pub const fn named(name: &'static str) -> Self {
        Self { name, description: "" }
    }

    /// Check that the name can be shown in snapshots and errors
    pub fn validate(&self) -> Result<(), MetaError> {
        if self.name.trim().is_empty() {
            return Err(MetaError::EmptyName);
        }
        if self.name.chars().any(char::is_control) {
            return Err(MetaError::ControlCharacter(self.name.to_string()));
        }
        Ok(())
    }
}
