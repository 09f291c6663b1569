//! Plugin traits

use plugsy_core::{PluginMeta, PluginResult};
use crate::PluginRegistry;

/// A unit of behavior installed into a registry
///
/// `install` runs exactly once, synchronously, inside the `register`
/// call that appended the plugin. Closures of shape
/// `Fn(&PluginRegistry) -> PluginResult` are plugins as-is.
pub trait Plugin {
    fn meta(&self) -> PluginMeta {
        PluginMeta::named(std::any::type_name::<Self>())
    }

    fn install(&self, registry: &PluginRegistry) -> PluginResult;
}

impl<F> Plugin for F
where
    F: Fn(&PluginRegistry) -> PluginResult,
{
    fn install(&self, registry: &PluginRegistry) -> PluginResult {
        self(registry)
    }
}

/// A closure carrying its own metadata
pub struct Named<F> {
    meta: PluginMeta,
    f: F,
}

/// Give a closure a name for snapshots and error messages
pub fn named<F>(name: &'static str, f: F) -> Named<F>
where
    F: Fn(&PluginRegistry) -> PluginResult,
{
    Named { meta: PluginMeta::named(name), f }
}

impl<F> Named<F> {
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.meta.description = description;
        self
    }
}

impl<F> Plugin for Named<F>
where
    F: Fn(&PluginRegistry) -> PluginResult,
{
    fn meta(&self) -> PluginMeta {
        self.meta.clone()
    }

    fn install(&self, registry: &PluginRegistry) -> PluginResult {
        (self.f)(registry)
    }
}
