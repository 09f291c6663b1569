//! Structured registry errors
//!
//! Every failure surfaced by the registry is a `PlugsyError`: a
//! machine-readable code, a human message, and where it happened.

use crate::MetaError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_PLUGIN: &str = "INVALID_PLUGIN";
    pub const PLUGIN_FAILED: &str = "PLUGIN_FAILED";
    pub const RECURSION_LIMIT: &str = "RECURSION_LIMIT";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Registration went through with a degraded result
    Warning,
    /// This registration failed
    Error,
    /// The registry cannot be used any further
    Fatal,
}

/// Where an error occurred
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Plugin that raised the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,

    /// Propagation notes, innermost first
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error returned by registry operations and plugins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlugsyError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    /// Severity level
    pub severity: Severity,
}

impl PlugsyError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set the plugin the error belongs to, unless already set
    pub fn in_plugin(mut self, plugin: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        if ctx.plugin.is_none() {
            ctx.plugin = Some(plugin.into());
        }
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Plugin the error is attributed to, if any
    pub fn plugin(&self) -> Option<&str> {
        self.context.as_ref().and_then(|c| c.plugin.as_deref())
    }

    /// Propagation notes, innermost first
    pub fn notes(&self) -> &[String] {
        self.context.as_ref().map(|c| c.notes.as_slice()).unwrap_or(&[])
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_plugin(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_PLUGIN, format!("Invalid plugin: {}", details.into()))
            .with_suggestion("Give the plugin a non-empty printable name")
    }

    pub fn plugin_failed(plugin: &str, details: impl Into<String>) -> Self {
        Self::new(codes::PLUGIN_FAILED, format!("Plugin '{}' failed: {}", plugin, details.into()))
            .in_plugin(plugin)
    }

    pub fn recursion_limit(plugin: &str, max_depth: usize) -> Self {
        Self::new(codes::RECURSION_LIMIT,
            format!("Registering '{}' would exceed the nesting limit of {}", plugin, max_depth))
            .with_suggestion("Check for a plugin that registers itself, or raise max_depth")
            .in_plugin(plugin)
    }

    pub fn config_error(details: impl Into<String>) -> Self {
        Self::new(codes::CONFIG_ERROR, format!("Configuration error: {}", details.into()))
            .with_severity(Severity::Fatal)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for PlugsyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        for note in self.notes() {
            write!(f, "; {}", note)?;
        }
        Ok(())
    }
}

impl std::error::Error for PlugsyError {}

impl From<MetaError> for PlugsyError {
    fn from(err: MetaError) -> Self {
        Self::invalid_plugin(err.to_string())
    }
}
