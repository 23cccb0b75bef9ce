//! The fluentd plugin: one fetch, then values or graph definitions.

use tracing::{info, warn};

use fluentd_adapter::{build_schema, project, FetchError, StatusFetcher};
use fluentd_types::{GraphSchema, ProjectedMetricSet, StatusSnapshot};

use crate::config::PluginConfig;

/// Result of the startup fetch, shared by both output modes.
///
/// A failed fetch is kept here and returned from every accessor, so nothing
/// is ever derived from a snapshot that was not fetched.
#[derive(Debug)]
pub struct FluentdPlugin {
    target: String,
    snapshot: Result<StatusSnapshot, FetchError>,
}

impl FluentdPlugin {
    /// Fetch plugin status from the endpoint in `config`.
    pub fn prepare(config: &PluginConfig) -> Self {
        let target = config.plugins_url();
        let snapshot = StatusFetcher::builder()
            .url(target.as_str())
            .build()
            .and_then(|fetcher| fetcher.fetch());

        match &snapshot {
            Ok(snapshot) => info!("Fetched {} plugins from {}", snapshot.len(), target),
            Err(e) => warn!("Fetching {} failed: {}", target, e),
        }

        Self::from_result(target, snapshot)
    }

    /// Wrap an already available fetch result.
    pub fn from_result(
        target: impl Into<String>,
        snapshot: Result<StatusSnapshot, FetchError>,
    ) -> Self {
        Self {
            target: target.into(),
            snapshot,
        }
    }

    /// URL the snapshot was fetched from.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Current metric values.
    pub fn fetch_metrics(&self) -> Result<ProjectedMetricSet, FetchError> {
        self.snapshot.as_ref().map(project).map_err(Clone::clone)
    }

    /// Graph definition for the current plugins.
    pub fn graph_definition(&self) -> Result<GraphSchema, FetchError> {
        self.snapshot.as_ref().map(build_schema).map_err(Clone::clone)
    }
}
