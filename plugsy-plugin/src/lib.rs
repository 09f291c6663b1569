//! Plugsy Plugin System
//!
//! Provides the `Plugin` trait and the `PluginRegistry` that plugins are
//! registered into. Registering a plugin appends it and then installs it
//! right away, with the registry itself as the only argument.

mod traits;
mod registry;
mod config;

pub use traits::{Plugin, Named, named};
pub use registry::{PluginRegistry, RegistrySnapshot};
pub use config::{RegistryConfig, ConfigError, ENV_MAX_DEPTH, ENV_REGISTRY_NAME};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{Plugin, PluginRegistry, RegistryConfig, named};
    pub use plugsy_core::prelude::*;
}
