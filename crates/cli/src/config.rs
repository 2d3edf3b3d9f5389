//! Configuration loading from capgate.toml.

use std::collections::BTreeMap;
use std::path::Path;

use nav::{MenuItem, User};
use registry::FeatureSet;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Enabled feature flags (license capabilities).
    #[serde(default)]
    pub features: FeatureSet,

    /// Extra admin navigation items, spliced in after the licensed ones.
    #[serde(default)]
    pub nav_items: Vec<MenuItem>,

    /// Named users for `capgate menu --user`.
    #[serde(default)]
    pub users: BTreeMap<String, User>,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Create a default configuration: no licensed features.
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Enable extra flags, e.g. from the environment (comma separated).
    pub fn with_extra_features(mut self, extra: Option<&str>) -> Self {
        for name in extra.into_iter().flat_map(|s| s.split(',')) {
            if !name.trim().is_empty() {
                self.features.enable(name);
            }
        }
        self
    }

    /// Look up a configured user by name.
    pub fn user(&self, name: &str) -> Result<&User, ConfigError> {
        self.users
            .get(name)
            .ok_or_else(|| ConfigError::UnknownUser(name.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("no user named '{0}' in config")]
    UnknownUser(String),
}
