//! Graph definitions describing how projected metrics are displayed.

/// Unit the host agent assumes when a graph does not declare one.
pub const DEFAULT_UNIT: &str = "float";

/// A single named graph and the metrics drawn on it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSchema {
    /// Graph key, e.g. `fluentd.buffer`. Prefixes every emitted metric name.
    pub name: String,

    /// Display label.
    pub label: String,

    /// Display unit (`float`, `integer`, `bytes`, ...).
    pub unit: String,

    /// Metrics on this graph, in display order.
    pub metrics: Vec<MetricDescriptor>,
}

impl GraphSchema {
    /// Create a graph with no metrics and the default unit.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            unit: DEFAULT_UNIT.to_string(),
            metrics: Vec::new(),
        }
    }

    /// Append a metric descriptor.
    pub fn push(&mut self, metric: MetricDescriptor) {
        self.metrics.push(metric);
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Fully qualified name of a metric on this graph (`<graph>.<metric>`).
    pub fn qualified_name(&self, metric: &MetricDescriptor) -> String {
        format!("{}.{}", self.name, metric.name)
    }
}

/// One metric on a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricDescriptor {
    /// Metric key, matching a key of the projected metric set.
    pub name: String,

    pub label: String,

    /// Whether the consumer should diff successive values (counter
    /// semantics) instead of plotting them as-is.
    pub is_cumulative_diff: bool,

    /// Whether the metric is stacked on the graph.
    pub stacked: bool,
}

impl MetricDescriptor {
    /// An instantaneous, unstacked value.
    pub fn gauge(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            is_cumulative_diff: false,
            stacked: false,
        }
    }
}
