//! Plugin Registry

use crate::{ConfigError, Plugin, RegistryConfig};
use plugsy_core::{PlugsyError, PluginMeta, PluginResult};
use serde::Serialize;
use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Serializable view of a registry
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    pub name: String,
    pub plugins: Vec<PluginMeta>,
}

/// Ordered, append-only holder of plugins and the context passed to each
///
/// Single-threaded: plugins run on the caller's stack and may call
/// `register` again while they are being installed.
pub struct PluginRegistry {
    config: RegistryConfig,
    plugins: RefCell<Vec<Rc<dyn Plugin>>>,
    extensions: RefCell<HashMap<TypeId, Rc<dyn Any>>>,
    depth: Cell<usize>,
}

/// Restores the nesting depth when an installation ends, including by panic
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
    previous: usize,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.previous);
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::build(RegistryConfig::default())
    }

    /// Create a registry from validated settings
    pub fn with_config(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RegistryConfig) -> Self {
        Self {
            config,
            plugins: RefCell::new(Vec::new()),
            extensions: RefCell::new(HashMap::new()),
            depth: Cell::new(0),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Append `plugin`, then install it with this registry.
    ///
    /// Errors from the plugin propagate to the caller; the plugin stays
    /// appended because the append happens first.
    pub fn register<P: Plugin + 'static>(&self, plugin: P) -> PluginResult {
        self.register_shared(Rc::new(plugin))
    }

    /// Same as `register`, for a plugin that is already shared.
    /// Registering the same `Rc` twice appends it twice.
    pub fn register_shared(&self, plugin: Rc<dyn Plugin>) -> PluginResult {
        let meta = plugin.meta();
        let depth = self.depth.get();
        if let Err(e) = meta.validate() {
            warn!(
                registry = %self.config.name,
                depth,
                error = %e,
                "rejected plugin"
            );
            return Err(PlugsyError::from(e)
                .in_plugin(meta.name)
                .with_note(format!("rejected at depth {}", depth)));
        }

        if depth >= self.config.max_depth {
            warn!(
                registry = %self.config.name,
                plugin = meta.name,
                depth,
                "nesting limit reached"
            );
            return Err(PlugsyError::recursion_limit(meta.name, self.config.max_depth));
        }

        let index = {
            let mut plugins = self.plugins.borrow_mut();
            plugins.push(Rc::clone(&plugin));
            plugins.len() - 1
        };
        debug!(
            registry = %self.config.name,
            plugin = meta.name,
            index,
            depth,
            "plugin registered"
        );

        let _guard = DepthGuard { depth: &self.depth, previous: depth };
        self.depth.set(depth + 1);

        trace!(plugin = meta.name, "installing");
        match plugin.install(self) {
            Ok(()) => {
                trace!(plugin = meta.name, "installed");
                Ok(())
            }
            Err(e) => {
                warn!(
                    registry = %self.config.name,
                    plugin = meta.name,
                    error = %e,
                    "plugin failed"
                );
                Err(e
                    .in_plugin(meta.name)
                    .with_note(format!("while registering '{}'", meta.name)))
            }
        }
    }

    /// Register each plugin in order, stopping at the first error
    pub fn register_all<I>(&self, plugins: I) -> PluginResult
    where
        I: IntoIterator<Item = Rc<dyn Plugin>>,
    {
        for plugin in plugins {
            self.register_shared(plugin)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.plugins.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.borrow().is_empty()
    }

    /// Nesting depth of the `register` call currently running
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Registered plugins, in registration order
    pub fn plugins(&self) -> Vec<Rc<dyn Plugin>> {
        self.plugins.borrow().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.borrow().iter().map(|p| p.meta().name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.borrow().iter().any(|p| p.meta().name == name)
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            name: self.config.name.clone(),
            plugins: self.plugins.borrow().iter().map(|p| p.meta()).collect(),
        }
    }

    /// Store a shared value, replacing and returning any previous value of the same type
    pub fn provide<T: 'static>(&self, value: T) -> Option<Rc<T>> {
        let previous = self.extensions.borrow_mut().insert(TypeId::of::<T>(), Rc::new(value));
        previous.and_then(|p| p.downcast::<T>().ok())
    }

    pub fn extension<T: 'static>(&self) -> Option<Rc<T>> {
        let value = self.extensions.borrow().get(&TypeId::of::<T>()).cloned()?;
        value.downcast::<T>().ok()
    }

    pub fn has_extension<T: 'static>(&self) -> bool {
        self.extensions.borrow().contains_key(&TypeId::of::<T>())
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("name", &self.config.name)
            .field("plugins", &self.names())
            .field("depth", &self.depth.get())
            .finish()
    }
}
