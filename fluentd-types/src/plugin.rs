//! Plugin status records as reported by fluentd's `monitor_agent`.

use std::collections::BTreeMap;

/// One entry from `/api/plugins.json`.
///
/// Every field falls back to its zero value when it is missing (or `null`)
/// in the response, so partial records from older fluentd versions still
/// decode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PluginStatusRecord {
    /// Stable identifier of the plugin (`@id` in the fluentd config, or an
    /// `object:...` address for anonymous plugins).
    #[cfg_attr(
        feature = "serde",
        serde(rename = "plugin_id", default, deserialize_with = "de::null_as_default")
    )]
    pub id: String,

    /// Plugin category (`input`, `output`, `filter`, ...). Informational only.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "plugin_category",
            default,
            deserialize_with = "de::null_as_default"
        )
    )]
    pub category: String,

    /// Plugin type, e.g. `forward` or `s3`.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", default, deserialize_with = "de::null_as_default")
    )]
    pub kind: String,

    /// Plugin configuration, passed through untouched.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "de::string_map")
    )]
    pub config: BTreeMap<String, String>,

    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "output_plugin",
            default,
            deserialize_with = "de::null_as_default"
        )
    )]
    pub is_output_plugin: bool,

    /// Cumulative retry counter.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "de::null_as_default")
    )]
    pub retry_count: u64,

    /// Number of chunks waiting in the buffer queue.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "de::null_as_default")
    )]
    pub buffer_queue_length: u64,

    /// Bytes currently queued in the buffer.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "de::null_as_default")
    )]
    pub buffer_total_queued_size: u64,
}

impl PluginStatusRecord {
    /// Create a builder for a record with the given plugin id.
    pub fn builder(id: impl Into<String>) -> PluginStatusRecordBuilder {
        PluginStatusRecordBuilder::new(id)
    }
}

/// The ordered list of records returned by one fetch.
///
/// Order follows the response and drives the order of projected metrics
/// and graph entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSnapshot {
    #[cfg_attr(feature = "serde", serde(rename = "plugins"))]
    pub records: Vec<PluginStatusRecord>,
}

impl StatusSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the snapshot has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Iterate over records in response order.
    pub fn iter(&self) -> impl Iterator<Item = &PluginStatusRecord> {
        self.records.iter()
    }
}

impl From<Vec<PluginStatusRecord>> for StatusSnapshot {
    fn from(records: Vec<PluginStatusRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a StatusSnapshot {
    type Item = &'a PluginStatusRecord;
    type IntoIter = std::slice::Iter<'a, PluginStatusRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for `PluginStatusRecord`.
#[derive(Debug, Default)]
pub struct PluginStatusRecordBuilder {
    record: PluginStatusRecord,
}

impl PluginStatusRecordBuilder {
    /// Create a new builder.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            record: PluginStatusRecord {
                id: id.into(),
                ..Default::default()
            },
        }
    }

    /// Set the plugin category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.record.category = category.into();
        self
    }

    /// Set the plugin type.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.record.kind = kind.into();
        self
    }

    /// Add a config entry.
    pub fn config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.record.config.insert(key.into(), value.into());
        self
    }

    /// Mark the record as an output plugin (or not).
    pub fn output_plugin(mut self, output: bool) -> Self {
        self.record.is_output_plugin = output;
        self
    }

    /// Set the retry counter.
    pub fn retry_count(mut self, count: u64) -> Self {
        self.record.retry_count = count;
        self
    }

    /// Set the number of queued chunks.
    pub fn buffer_queue_length(mut self, length: u64) -> Self {
        self.record.buffer_queue_length = length;
        self
    }

    /// Set the number of queued bytes.
    pub fn buffer_total_queued_size(mut self, size: u64) -> Self {
        self.record.buffer_total_queued_size = size;
        self
    }

    /// Build the record.
    pub fn build(self) -> PluginStatusRecord {
        self.record
    }
}

#[cfg(feature = "serde")]
mod de {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    // monitor_agent occasionally reports numbers or nested values in `config`
    pub(super) fn string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_zero_values() {
        let record = PluginStatusRecord::builder("out1").build();
        assert_eq!(record.id, "out1");
        assert!(!record.is_output_plugin);
        assert_eq!(record.retry_count, 0);
        assert_eq!(record.buffer_queue_length, 0);
        assert_eq!(record.buffer_total_queued_size, 0);
        assert!(record.config.is_empty());
    }

    #[test]
    fn test_builder_all_fields() {
        let record = PluginStatusRecord::builder("out1")
            .category("output")
            .kind("forward")
            .config("host", "10.0.0.1")
            .output_plugin(true)
            .retry_count(2)
            .buffer_queue_length(5)
            .buffer_total_queued_size(1024)
            .build();

        assert_eq!(record.category, "output");
        assert_eq!(record.kind, "forward");
        assert_eq!(record.config.get("host").map(String::as_str), Some("10.0.0.1"));
        assert!(record.is_output_plugin);
        assert_eq!(record.retry_count, 2);
        assert_eq!(record.buffer_queue_length, 5);
        assert_eq!(record.buffer_total_queued_size, 1024);
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let snapshot = StatusSnapshot::from(vec![
            PluginStatusRecord::builder("b").build(),
            PluginStatusRecord::builder("a").build(),
        ]);
        let ids: Vec<&str> = snapshot.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(snapshot.len(), 2);
        assert!(!snapshot.is_empty());
        assert!(StatusSnapshot::new().is_empty());
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_decode_monitor_agent_response() {
            let json = r#"{
                "plugins": [
                    {
                        "plugin_id": "object:3fe1",
                        "plugin_category": "input",
                        "type": "monitor_agent",
                        "config": {"@type": "monitor_agent", "port": "24220"},
                        "output_plugin": false,
                        "retry_count": null
                    },
                    {
                        "plugin_id": "out_forward",
                        "plugin_category": "output",
                        "type": "forward",
                        "config": {"@type": "forward"},
                        "output_plugin": true,
                        "buffer_queue_length": 5,
                        "buffer_total_queued_size": 1024,
                        "retry_count": 2
                    }
                ]
            }"#;

            let snapshot: StatusSnapshot = serde_json::from_str(json).unwrap();
            assert_eq!(snapshot.len(), 2);

            let input = &snapshot.records[0];
            assert_eq!(input.id, "object:3fe1");
            assert_eq!(input.kind, "monitor_agent");
            assert!(!input.is_output_plugin);
            assert_eq!(input.retry_count, 0);

            let output = &snapshot.records[1];
            assert_eq!(output.id, "out_forward");
            assert_eq!(output.category, "output");
            assert!(output.is_output_plugin);
            assert_eq!(output.retry_count, 2);
            assert_eq!(output.buffer_queue_length, 5);
            assert_eq!(output.buffer_total_queued_size, 1024);
        }

        #[test]
        fn test_decode_missing_fields_default() {
            let snapshot: StatusSnapshot =
                serde_json::from_str(r#"{"plugins": [{"plugin_id": "out1"}]}"#).unwrap();
            assert_eq!(
                snapshot.records[0],
                PluginStatusRecord::builder("out1").build()
            );
        }

        #[test]
        fn test_decode_non_string_config_values() {
            let snapshot: StatusSnapshot = serde_json::from_str(
                r#"{"plugins": [{"plugin_id": "out1", "config": {"flush_interval": 5, "compress": true, "tags": ["a"], "empty": null}}]}"#,
            )
            .unwrap();
            let config = &snapshot.records[0].config;
            assert_eq!(config["flush_interval"], "5");
            assert_eq!(config["compress"], "true");
            assert_eq!(config["tags"], r#"["a"]"#);
            assert_eq!(config["empty"], "");
        }

        #[test]
        fn test_decode_requires_plugins_array() {
            assert!(serde_json::from_str::<StatusSnapshot>(r#"{"items": []}"#).is_err());
            assert!(serde_json::from_str::<StatusSnapshot>(r#"{"plugins": {}}"#).is_err());
            assert!(serde_json::from_str::<StatusSnapshot>("[]").is_err());
        }
    }
}
