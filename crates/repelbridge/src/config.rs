//! CLI configuration: TOML file plus `REPELBRIDGE_*` environment overlay.
//!
//! Precedence, lowest to highest: built-in defaults, config file,
//! environment, CLI flags. The file stores exactly one controller; the
//! device is a single-purpose appliance, not a fleet.

use std::path::PathBuf;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use repelbridge_core::BridgeConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// On-disk and environment-sourced settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Controller host; `None` until configured or passed as a flag.
    pub host: Option<String>,
    pub port: u16,
    pub timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub offline_threshold: u32,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = BridgeConfig::default();
        Self {
            host: None,
            port: defaults.port,
            timeout_secs: defaults.timeout.as_secs(),
            poll_interval_secs: defaults.poll_interval.as_secs(),
            offline_threshold: defaults.offline_threshold,
        }
    }
}

/// Path of the config file: `$XDG_CONFIG_HOME/repelbridge/config.toml`
/// (or the platform equivalent).
pub fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "repelbridge")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("repelbridge.toml"))
}

/// Load configuration, falling back to defaults when no file exists.
pub fn load_config() -> Result<Config, CliError> {
    Ok(Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        // Keys that clap already reads from the environment are ignored
        // here so both layers agree on who owns them.
        .merge(Env::prefixed("REPELBRIDGE_").ignore(&["host", "port", "timeout", "output"]))
        .extract()?)
}

/// Write the config file, creating parent directories as needed.
pub fn save_config(config: &Config) -> Result<(), CliError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config)
        .map_err(|e| CliError::Request {
            message: format!("could not serialize config: {e}"),
        })?;
    std::fs::write(&path, body)?;
    Ok(())
}

/// Resolve the effective `BridgeConfig` from file, environment, and flags.
///
/// `poll_interval` is zeroed here; one-shot commands never want a
/// background poll task. `watch` re-enables it explicitly.
pub fn resolve_bridge_config(global: &GlobalOpts) -> Result<(BridgeConfig, Config), CliError> {
    let config = load_config()?;

    let host = global
        .host
        .clone()
        .or_else(|| config.host.clone())
        .ok_or_else(|| CliError::NoHost {
            path: config_path().display().to_string(),
        })?;

    let bridge = BridgeConfig {
        host,
        port: global.port.unwrap_or(config.port),
        timeout: Duration::from_secs(global.timeout.unwrap_or(config.timeout_secs)),
        poll_interval: Duration::ZERO,
        offline_threshold: config.offline_threshold,
    };
    Ok((bridge, config))
}
