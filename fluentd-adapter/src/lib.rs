//! # fluentd-adapter
//!
//! Collects buffer and retry statistics from fluentd's `monitor_agent` and
//! shapes them for the Mackerel host agent.
//!
//! The pipeline has four stages:
//!
//! - **[`fetcher`]**: one blocking GET against `/api/plugins.json`
//! - **[`filter`]**: decides which plugins are worth reporting
//! - **[`projector`]**: turns eligible plugins into flat metric values
//! - **[`schema`]**: turns the same plugins into a graph definition
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fluentd_adapter::{build_schema, project, StatusFetcher};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = StatusFetcher::builder()
//!         .endpoint("localhost", 24220)
//!         .build()?;
//!
//!     let snapshot = fetcher.fetch()?;
//!     let metrics = project(&snapshot);
//!     let graph = build_schema(&snapshot);
//!
//!     println!("{} values across {} graph entries", metrics.len(), graph.metrics.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fetcher;
pub mod filter;
pub mod projector;
pub mod schema;

pub use error::FetchError;
pub use fetcher::{fetch, plugins_url, StatusFetcher, StatusFetcherBuilder, DEFAULT_HOST, DEFAULT_PORT};
pub use filter::{eligible_records, is_eligible};
pub use projector::project;
pub use schema::{build_schema, GRAPH_LABEL, GRAPH_NAME};

// Re-export types for convenience
pub use fluentd_types::{
    GraphSchema, MetricDescriptor, PluginStatusRecord, ProjectedMetricSet, StatusSnapshot,
};
