//! Startup announcement

use plugsy_core::{PluginMeta, PluginResult};
use plugsy_plugin::{Plugin, PluginRegistry};
use tracing::info;

/// Logs the registry's name and contents when installed
pub struct Announce;

impl Plugin for Announce {
    fn meta(&self) -> PluginMeta {
        PluginMeta::new("announce", "logs the plugins registered so far")
    }

    fn install(&self, registry: &PluginRegistry) -> PluginResult {
        info!(
            registry = registry.name(),
            plugins = registry.len(),
            names = ?registry.names(),
            "registry ready"
        );
        Ok(())
    }
}
