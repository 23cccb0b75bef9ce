//! # fluentd-types
//!
//! Core types shared by the fluentd Mackerel plugin. This crate describes
//! what fluentd's `monitor_agent` reports about its plugins, and the two
//! shapes those reports are turned into: a flat metric set and a graph
//! definition for the host agent.
//!
//! ## Features
//!
//! - `serde`: (de)serialization of status records via serde. Decoding follows
//!   the `/api/plugins.json` wire names (`plugin_id`, `output_plugin`, ...).
//!
//! ## Example
//!
//! ```rust
//! use fluentd_types::{GraphSchema, MetricDescriptor, PluginStatusRecord, StatusSnapshot};
//!
//! let snapshot = StatusSnapshot::from(vec![
//!     PluginStatusRecord::builder("out_forward")
//!         .output_plugin(true)
//!         .retry_count(2)
//!         .buffer_queue_length(5)
//!         .build(),
//! ]);
//! assert_eq!(snapshot.len(), 1);
//!
//! let mut schema = GraphSchema::new("fluentd.buffer", "Fluentd Buffer");
//! schema.push(MetricDescriptor::gauge("retry.out_forward", "Retry Count out_forward"));
//! assert_eq!(schema.metrics.len(), 1);
//! ```

mod graph;
mod metrics;
mod plugin;

pub use graph::*;
pub use metrics::*;
pub use plugin::*;
