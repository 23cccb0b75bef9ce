//! Plugin configuration.
//!
//! Values are layered, later sources winning: built-in defaults, an
//! optional config file, `MACKEREL_PLUGIN_FLUENTD_*` environment variables,
//! then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, Map};
use serde::Deserialize;

use fluentd_adapter::{DEFAULT_HOST, DEFAULT_PORT};

/// Prefix for environment overrides (`MACKEREL_PLUGIN_FLUENTD_PORT`, ...).
pub const ENV_PREFIX: &str = "MACKEREL_PLUGIN_FLUENTD";

/// Where to find `monitor_agent` and where to keep the state file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginConfig {
    /// `monitor_agent` host.
    pub host: String,

    /// `monitor_agent` port.
    pub port: u16,

    /// State file override. When unset, a per-endpoint path is derived.
    #[serde(default)]
    pub tempfile: Option<PathBuf>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            tempfile: None,
        }
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tempfile: Option<PathBuf>,
}

impl PluginConfig {
    /// Load configuration from all sources, reading the process environment.
    pub fn load(file: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        Self::load_with_env(file, overrides, None)
    }

    /// Like [`PluginConfig::load`], with an explicit environment map in place
    /// of the process environment.
    pub fn load_with_env(
        file: Option<&Path>,
        overrides: ConfigOverrides,
        env: Option<Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .set_override_option("host", overrides.host)?
            .set_override_option("port", overrides.port.map(i64::from))?
            .set_override_option(
                "tempfile",
                overrides
                    .tempfile
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()
            .context("Failed to load configuration")?;

        config
            .try_deserialize()
            .context("Invalid plugin configuration")
    }

    /// The plugin status URL for this endpoint.
    pub fn plugins_url(&self) -> String {
        fluentd_adapter::plugins_url(&self.host, self.port)
    }
}
