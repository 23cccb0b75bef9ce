//! State file kept for mackerel-agent's diff bookkeeping.
//!
//! The file holds the last emitted values as a flat JSON object plus a
//! `_lastTime` timestamp. It is written after every values run and never
//! read back by this plugin.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use fluentd_types::ProjectedMetricSet;

use crate::config::PluginConfig;

/// Directory mackerel-agent provides for plugin state.
pub const WORKDIR_ENV: &str = "MACKEREL_PLUGIN_WORKDIR";

const LAST_TIME_KEY: &str = "_lastTime";

/// Resolve the state file path, reading the workdir from the environment.
pub fn state_path(config: &PluginConfig) -> PathBuf {
    resolve_state_path(config, std::env::var_os(WORKDIR_ENV))
}

/// Resolve the state file path.
///
/// An explicit `tempfile` wins. Otherwise the file lives in `workdir` (or
/// the OS temp dir when that is unset or empty) and is named after the
/// endpoint, so plugins watching different daemons don't collide.
pub fn resolve_state_path(config: &PluginConfig, workdir: Option<OsString>) -> PathBuf {
    if let Some(path) = &config.tempfile {
        return path.clone();
    }

    let dir = workdir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    dir.join(format!(
        "mackerel-plugin-fluentd-{}-{}",
        config.host, config.port
    ))
}

/// Write `metrics` to the state file at `path`.
pub fn save_values(path: &Path, metrics: &ProjectedMetricSet, timestamp: u64) -> Result<()> {
    let mut state = match serde_json::to_value(metrics)? {
        Value::Object(values) => values,
        other => anyhow::bail!("Metric set serialized to a non-object: {}", other),
    };
    state.insert(LAST_TIME_KEY.to_string(), Value::from(timestamp));

    let json = serde_json::to_vec(&Value::Object(state))?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write state file {}", path.display()))?;
    Ok(())
}
