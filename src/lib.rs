//! # mackerel-plugin-fluentd
//!
//! A mackerel-agent plugin that reports fluentd buffer statistics.
//!
//! Each run fetches `/api/plugins.json` from fluentd's `monitor_agent` once,
//! then either prints the current values of every buffered output plugin or,
//! when mackerel-agent sets `MACKEREL_AGENT_PLUGIN_META`, the graph
//! definition for them.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐    ┌───────────────┐    ┌──────────────────────────┐
//! │  config    │───▶│ FluentdPlugin │───▶│ values │ definitions     │──▶ stdout
//! │ (CLI/env)  │    │ (one fetch)   │    │ (output)                 │
//! └────────────┘    └───────────────┘    └────────────┬─────────────┘
//!                                                     ▼
//!                                              state file (values)
//! ```
//!
//! - **[`config`]**: layered configuration (defaults, file, env, flags)
//! - **[`plugin`]**: the fetched snapshot, or the error that prevented it
//! - **[`mode`]**: values vs. definitions
//! - **[`output`]**: mackerel-agent plugin text/JSON format
//! - **[`state`]**: the per-endpoint state file
//!
//! ## Usage
//!
//! ```bash
//! mackerel-plugin-fluentd --host localhost --port 24220
//! MACKEREL_AGENT_PLUGIN_META=1 mackerel-plugin-fluentd
//! ```

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::warn;

pub mod config;
pub mod mode;
pub mod output;
pub mod plugin;
pub mod state;

pub use crate::config::{ConfigOverrides, PluginConfig};
pub use crate::mode::Mode;
pub use crate::plugin::FluentdPlugin;

/// Fetch once and write the output for `mode` to `out`.
///
/// Nothing is written when the fetch fails.
pub fn run<W: Write>(config: &PluginConfig, mode: Mode, out: &mut W) -> Result<()> {
    let plugin = FluentdPlugin::prepare(config);
    emit(&plugin, config, mode, out)
}

/// Write the output for `mode` from an already prepared plugin.
pub fn emit<W: Write>(
    plugin: &FluentdPlugin,
    config: &PluginConfig,
    mode: Mode,
    out: &mut W,
) -> Result<()> {
    let context = || format!("Failed to fetch fluentd metrics from {}", plugin.target());

    match mode {
        Mode::Definitions => {
            let graph = plugin.graph_definition().with_context(context)?;
            output::write_definitions(out, &graph).context("Failed to write graph definitions")?;
        }
        Mode::Values => {
            let metrics = plugin.fetch_metrics().with_context(context)?;
            let graph = plugin.graph_definition().with_context(context)?;
            let now = unix_now();

            output::write_values(out, &graph, &metrics, now).context("Failed to write values")?;

            let path = state::state_path(config);
            if let Err(e) = state::save_values(&path, &metrics, now) {
                warn!("{:#}", e);
            }
        }
    }

    out.flush().context("Failed to flush output")
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
