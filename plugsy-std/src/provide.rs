//! Extension providers

use plugsy_core::{PluginMeta, PluginResult};
use plugsy_plugin::{Plugin, PluginRegistry};

/// Stores a clone of `value` on the registry each time it is installed
pub struct Provide<T> {
    name: &'static str,
    value: T,
}

impl<T: Clone + 'static> Provide<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        Self { name, value }
    }
}

impl<T: Clone + 'static> Plugin for Provide<T> {
    fn meta(&self) -> PluginMeta {
        PluginMeta::new(self.name, "provides a shared value")
    }

    fn install(&self, registry: &PluginRegistry) -> PluginResult {
        if registry.provide(self.value.clone()).is_some() {
            tracing::debug!(plugin = self.name, "replaced existing extension");
        }
        Ok(())
    }
}
