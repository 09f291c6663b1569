//! Plugsy Core - Fundamental types
//!
//! This crate provides the types shared by every Plugsy crate:
//! - `PlugsyError`: Structured errors with codes and propagation notes
//! - `PluginMeta`: Name and description reported for each plugin

mod error;
mod meta;

pub use error::{PlugsyError, ErrorContext, Severity, codes};
pub use meta::{PluginMeta, MetaError};

/// Outcome of installing a plugin
pub type PluginResult = Result<(), PlugsyError>;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{PlugsyError, PluginMeta, PluginResult, Severity};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod meta_tests {
        use super::*;

        #[test]
        fn test_valid_name() {
            assert!(PluginMeta::named("logger").validate().is_ok());
            assert!(PluginMeta::new("theme store", "keeps the theme").validate().is_ok());
        }

        #[test]
        fn test_empty_name() {
            assert_eq!(PluginMeta::named("").validate(), Err(MetaError::EmptyName));
            assert_eq!(PluginMeta::named("   ").validate(), Err(MetaError::EmptyName));
        }

        #[test]
        fn test_control_characters() {
            let err = PluginMeta::named("bad\nname").validate().unwrap_err();
            assert!(matches!(err, MetaError::ControlCharacter(_)));
        }

        #[test]
        fn test_serialize_skips_empty_description() {
            let json = serde_json::to_value(PluginMeta::named("a")).unwrap();
            assert_eq!(json, serde_json::json!({ "name": "a" }));

            let json = serde_json::to_value(PluginMeta::new("a", "does a")).unwrap();
            assert_eq!(json["description"], "does a");
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_invalid_plugin_from_meta_error() {
            let err: PlugsyError = MetaError::EmptyName.into();
            assert!(err.is(codes::INVALID_PLUGIN));
            assert!(err.message.contains("empty"));
            assert!(err.suggestion.is_some());
        }

        #[test]
        fn test_plugin_is_set_once() {
            let err = PlugsyError::plugin_failed("inner", "boom").in_plugin("outer");
            assert_eq!(err.plugin(), Some("inner"));
        }

        #[test]
        fn test_notes_keep_order() {
            let err = PlugsyError::plugin_failed("c", "boom")
                .with_note("while registering 'b'")
                .with_note("while registering 'a'");
            assert_eq!(err.notes(), ["while registering 'b'", "while registering 'a'"]);
            let shown = err.to_string();
            assert!(shown.starts_with("[PLUGIN_FAILED] Plugin 'c' failed: boom"));
            assert!(shown.ends_with("; while registering 'a'"));
        }

        #[test]
        fn test_severity_defaults() {
            assert_eq!(PlugsyError::plugin_failed("p", "x").severity, Severity::Error);
            assert_eq!(PlugsyError::config_error("x").severity, Severity::Fatal);
            assert_eq!(PlugsyError::internal("x").severity, Severity::Fatal);
        }

        #[test]
        fn test_serialize_shape() {
            let err = PlugsyError::recursion_limit("loop", 4);
            let json = serde_json::to_value(&err).unwrap();
            assert_eq!(json["code"], "RECURSION_LIMIT");
            assert_eq!(json["severity"], "error");
            assert_eq!(json["context"]["plugin"], "loop");
            assert!(json["context"].get("notes").is_none());

            let back: PlugsyError = serde_json::from_value(json).unwrap();
            assert_eq!(back, err);
        }
    }
}
