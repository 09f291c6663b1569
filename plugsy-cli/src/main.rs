//! Plugsy command-line host
//!
//! Builds a registry from configuration, installs the standard plugins,
//! and prints the resulting registry as JSON on stdout.
//!
//! Configuration:
//! - PLUGSY_CONFIG: path to a JSON config file (takes precedence)
//! - PLUGSY_REGISTRY_NAME, PLUGSY_MAX_DEPTH: individual overrides
//! - RUST_LOG: log filter, defaults to "info"

use plugsy_core::{PlugsyError, Severity};
use plugsy_plugin::{PluginRegistry, RegistryConfig, RegistrySnapshot};
use plugsy_std::BuildInfo;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const ENV_CONFIG_PATH: &str = "PLUGSY_CONFIG";

/// Output document
#[derive(Debug, Serialize)]
struct Report {
    version: &'static str,
    #[serde(flatten)]
    registry: RegistrySnapshot,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read a JSON config file
fn load_config_file(path: &Path) -> Result<RegistryConfig, PlugsyError> {
    let text = fs::read_to_string(path).map_err(|e| {
        PlugsyError::config_error(format!("cannot read {}: {}", path.display(), e))
    })?;
    Ok(RegistryConfig::from_json(&text)?)
}

fn load_config() -> Result<RegistryConfig, PlugsyError> {
    match env::var(ENV_CONFIG_PATH) {
        Ok(path) => load_config_file(Path::new(&path)),
        Err(_) => Ok(RegistryConfig::from_env()?),
    }
}

fn build_registry(config: RegistryConfig) -> Result<PluginRegistry, PlugsyError> {
    let registry = PluginRegistry::with_config(config)?;
    plugsy_std::load_standard_plugins(&registry)?;
    Ok(registry)
}

fn run() -> Result<Report, PlugsyError> {
    let config = load_config()?;
    info!(registry = %config.name, max_depth = config.max_depth, "configuration loaded");

    let registry = build_registry(config)?;
    let version = registry.extension::<BuildInfo>()
        .map(|info| info.version)
        .ok_or_else(|| PlugsyError::internal("build-info extension missing"))?;

    Ok(Report { version, registry: registry.snapshot() })
}

fn main() -> ExitCode {
    init_logging();

    match run().and_then(|report| {
        serde_json::to_string_pretty(&report)
            .map_err(|e| PlugsyError::internal(format!("cannot serialize report: {}", e)))
    }) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = %e.code, "{}", e.message);
            if let Ok(json) = serde_json::to_string(&e) {
                eprintln!("{}", json);
            }
            if e.severity == Severity::Fatal { ExitCode::from(2) } else { ExitCode::FAILURE }
        }
    }
}
