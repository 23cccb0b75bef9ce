//! Eligibility rules for reporting a plugin.

use fluentd_types::{PluginStatusRecord, StatusSnapshot};

/// Id prefix fluentd gives plugins without an explicit `@id`.
const ANONYMOUS_ID_PREFIX: &str = "object:";

/// Whether a record should be surfaced as metrics.
///
/// Only output plugins carry buffer and retry state, and anonymous plugins
/// get a new `object:...` id on every restart.
pub fn is_eligible(record: &PluginStatusRecord) -> bool {
    if !record.is_output_plugin {
        return false;
    }
    if record.id.starts_with(ANONYMOUS_ID_PREFIX) {
        return false;
    }
    true
}

/// Eligible records of a snapshot, in snapshot order.
pub fn eligible_records(snapshot: &StatusSnapshot) -> impl Iterator<Item = &PluginStatusRecord> {
    snapshot.iter().filter(|record| is_eligible(record))
}
