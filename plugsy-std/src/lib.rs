//! Plugsy Standard Plugins

pub mod bundle;
pub mod provide;
pub mod announce;

pub use bundle::Bundle;
pub use provide::Provide;
pub use announce::Announce;

use plugsy_core::PluginResult;
use plugsy_plugin::PluginRegistry;

/// Build information made available to every plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub package: &'static str,
    pub version: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            package: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// The standard plugins, as one bundle
pub fn standard_bundle() -> Bundle {
    Bundle::new("std")
        .with_description("standard plugins")
        .with(Provide::new("build-info", BuildInfo::current()))
        .with(Announce)
}

/// Register the standard plugins into `registry`
pub fn load_standard_plugins(registry: &PluginRegistry) -> PluginResult {
    registry.register(standard_bundle())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugsy_core::{codes, PlugsyError};
    use plugsy_plugin::{named, Plugin, RegistryConfig};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_load_standard_plugins() {
        let registry = PluginRegistry::new();
        load_standard_plugins(&registry).unwrap();

        assert_eq!(registry.names(), vec!["std", "build-info", "announce"]);
        let info = registry.extension::<BuildInfo>().unwrap();
        assert_eq!(info.package, "plugsy-std");
    }

    #[test]
    fn test_bundle_children_follow_bundle() {
        let registry = PluginRegistry::new();
        registry.register(named("before", |_| Ok(()))).unwrap();
        registry.register(
            Bundle::new("group")
                .with(named("a", |_| Ok(())))
                .with(Bundle::new("nested").with(named("b", |_| Ok(()))))
                .with(named("c", |_| Ok(()))),
        ).unwrap();
        registry.register(named("after", |_| Ok(()))).unwrap();

        assert_eq!(
            registry.names(),
            vec!["before", "group", "a", "nested", "b", "c", "after"]
        );
    }

    #[test]
    fn test_empty_bundle() {
        let registry = PluginRegistry::new();
        let bundle = Bundle::new("empty");
        assert!(bundle.is_empty());
        registry.register(bundle).unwrap();
        assert_eq!(registry.names(), vec!["empty"]);
    }

    #[test]
    fn test_bundle_stops_at_first_failure() {
        let registry = PluginRegistry::new();
        let err = registry.register(
            Bundle::new("group")
                .with(named("ok", |_| Ok(())))
                .with(named("bad", |_| Err(PlugsyError::plugin_failed("bad", "nope"))))
                .with(named("skipped", |_| Ok(()))),
        ).unwrap_err();

        assert!(err.is(codes::PLUGIN_FAILED));
        assert_eq!(err.notes().last().map(String::as_str), Some("while registering 'group'"));
        assert_eq!(registry.names(), vec!["group", "ok", "bad"]);
    }

    #[test]
    fn test_shared_child_registered_per_bundle() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let shared: Rc<dyn Plugin> = Rc::new(named("shared", move |_| {
            *counter.borrow_mut() += 1;
            Ok(())
        }));

        let registry = PluginRegistry::new();
        registry.register(Bundle::new("one").with_shared(Rc::clone(&shared))).unwrap();
        registry.register(Bundle::new("two").with_shared(Rc::clone(&shared))).unwrap();

        assert_eq!(*calls.borrow(), 2);
        assert_eq!(registry.names(), vec!["one", "shared", "two", "shared"]);
    }

    #[test]
    fn test_self_containing_bundles_hit_limit() {
        let config = RegistryConfig::new().with_max_depth(2);
        let registry = PluginRegistry::with_config(config).unwrap();
        let err = registry.register(
            Bundle::new("outer").with(Bundle::new("middle").with(Bundle::new("inner"))),
        ).unwrap_err();

        assert!(err.is(codes::RECURSION_LIMIT));
        assert_eq!(registry.names(), vec!["outer", "middle"]);
    }

    #[test]
    fn test_provide_replaces() {
        let registry = PluginRegistry::new();
        registry.register(Provide::new("first", 1u32)).unwrap();
        registry.register(Provide::new("second", 2u32)).unwrap();
        assert_eq!(*registry.extension::<u32>().unwrap(), 2);
    }
}
