//! Plugin bundles

use plugsy_core::{PluginMeta, PluginResult};
use plugsy_plugin::{Plugin, PluginRegistry};
use std::rc::Rc;

/// A named group of plugins
///
/// Installing a bundle registers its children in order, so they land in
/// the registry right after the bundle itself. The first failing child
/// stops the rest.
pub struct Bundle {
    meta: PluginMeta,
    children: Vec<Rc<dyn Plugin>>,
}

impl Bundle {
    pub fn new(name: &'static str) -> Self {
        Self {
            meta: PluginMeta::named(name),
            children: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.meta.description = description;
        self
    }

    pub fn with<P: Plugin + 'static>(mut self, plugin: P) -> Self {
        self.children.push(Rc::new(plugin));
        self
    }

    pub fn with_shared(mut self, plugin: Rc<dyn Plugin>) -> Self {
        self.children.push(plugin);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Plugin for Bundle {
    fn meta(&self) -> PluginMeta {
        self.meta.clone()
    }

    fn install(&self, registry: &PluginRegistry) -> PluginResult {
        registry.register_all(self.children.iter().cloned())
    }
}
