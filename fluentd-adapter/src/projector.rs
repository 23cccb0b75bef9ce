//! Projection of a snapshot into flat metric values.

use fluentd_types::{PluginStatusRecord, ProjectedMetricSet, StatusSnapshot};

use crate::filter::eligible_records;

pub(crate) fn retry_key(id: &str) -> String {
    format!("retry.{}", id)
}

pub(crate) fn queue_key(id: &str) -> String {
    format!("queue.{}", id)
}

pub(crate) fn size_key(id: &str) -> String {
    format!("size.{}", id)
}

/// Project eligible records into `retry.<id>`, `queue.<id>` and `size.<id>`
/// values.
///
/// Records sharing an id overwrite each other; the last one in the snapshot
/// wins.
pub fn project(snapshot: &StatusSnapshot) -> ProjectedMetricSet {
    let mut metrics = ProjectedMetricSet::new();
    for record in eligible_records(snapshot) {
        project_record(&mut metrics, record);
    }
    metrics
}

fn project_record(metrics: &mut ProjectedMetricSet, record: &PluginStatusRecord) {
    metrics.insert(retry_key(&record.id), record.retry_count as f64);
    metrics.insert(queue_key(&record.id), record.buffer_queue_length as f64);
    metrics.insert(size_key(&record.id), record.buffer_total_queued_size as f64);
}
