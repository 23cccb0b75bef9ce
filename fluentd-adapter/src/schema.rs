//! Graph definition for the projected buffer metrics.

use fluentd_types::{GraphSchema, MetricDescriptor, StatusSnapshot};

use crate::filter::eligible_records;
use crate::projector::{queue_key, retry_key, size_key};

/// Key of the single graph all buffer metrics are drawn on.
pub const GRAPH_NAME: &str = "fluentd.buffer";

/// Display label of that graph.
pub const GRAPH_LABEL: &str = "Fluentd Buffer";

/// Build the `fluentd.buffer` graph with retry, queue and size entries for
/// every eligible record.
///
/// All entries are gauges. `retry_count` is a counter upstream, but diffing
/// is left to the host agent.
pub fn build_schema(snapshot: &StatusSnapshot) -> GraphSchema {
    let mut graph = GraphSchema::new(GRAPH_NAME, GRAPH_LABEL);

    for record in eligible_records(snapshot) {
        let id = &record.id;
        graph.push(MetricDescriptor::gauge(
            retry_key(id),
            format!("Retry Count {}", id),
        ));
        graph.push(MetricDescriptor::gauge(
            queue_key(id),
            format!("Queue Length {}", id),
        ));
        graph.push(MetricDescriptor::gauge(
            size_key(id),
            format!("Buffer Size {}", id),
        ));
    }

    graph
}
