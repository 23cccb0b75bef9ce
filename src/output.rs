//! mackerel-agent plugin output.
//!
//! Values are written as `<name>\t<value>\t<unix seconds>` lines. Graph
//! definitions are a `# mackerel-agent-plugin` header line followed by a
//! JSON document:
//!
//! ```text
//! # mackerel-agent-plugin
//! {"graphs":{"fluentd.buffer":{"label":"Fluentd Buffer","unit":"float","metrics":[...]}}}
//! ```

use std::collections::{BTreeMap, HashSet};
use std::io::{self, Write};

use serde::Serialize;
use tracing::warn;

use fluentd_types::{GraphSchema, ProjectedMetricSet};

/// First line of a graph definition response.
pub const META_HEADER: &str = "# mackerel-agent-plugin";

#[derive(Debug, Serialize)]
struct GraphDefinitions<'a> {
    graphs: BTreeMap<&'a str, GraphDef<'a>>,
}

#[derive(Debug, Serialize)]
struct GraphDef<'a> {
    label: &'a str,
    unit: &'a str,
    metrics: Vec<MetricDef<'a>>,
}

// `is_cumulative_diff` is not part of the agent wire format
#[derive(Debug, Serialize)]
struct MetricDef<'a> {
    name: &'a str,
    label: &'a str,
    stacked: bool,
}

/// Write one line per metric on `graph`, in graph order.
///
/// Each metric name is written at most once; its value comes from
/// `metrics`. Metrics without a value, or with a non-finite one, are
/// skipped.
pub fn write_values<W: Write>(
    out: &mut W,
    graph: &GraphSchema,
    metrics: &ProjectedMetricSet,
    timestamp: u64,
) -> io::Result<()> {
    let mut seen = HashSet::new();

    for descriptor in &graph.metrics {
        if !seen.insert(descriptor.name.as_str()) {
            continue;
        }
        let Some(value) = metrics.get(&descriptor.name) else {
            continue;
        };
        let name = graph.qualified_name(descriptor);
        if !value.is_finite() {
            warn!("Skipping invalid value: {} = {}", name, value);
            continue;
        }
        writeln!(out, "{}\t{:.6}\t{}", name, value, timestamp)?;
    }

    Ok(())
}

/// Write the graph definition response for `graph`.
pub fn write_definitions<W: Write>(out: &mut W, graph: &GraphSchema) -> io::Result<()> {
    let definition = GraphDef {
        label: &graph.label,
        unit: &graph.unit,
        metrics: graph
            .metrics
            .iter()
            .map(|m| MetricDef {
                name: &m.name,
                label: &m.label,
                stacked: m.stacked,
            })
            .collect(),
    };
    let mut graphs = BTreeMap::new();
    graphs.insert(graph.name.as_str(), definition);

    writeln!(out, "{}", META_HEADER)?;
    serde_json::to_writer(&mut *out, &GraphDefinitions { graphs }).map_err(io::Error::from)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluentd_types::MetricDescriptor;

    fn graph(names: &[&str]) -> GraphSchema {
        let mut graph = GraphSchema::new("fluentd.buffer", "Fluentd Buffer");
        for name in names {
            graph.push(MetricDescriptor::gauge(*name, format!("Label {}", name)));
        }
        graph
    }

    fn render_values(graph: &GraphSchema, metrics: &ProjectedMetricSet) -> String {
        let mut out = Vec::new();
        write_values(&mut out, graph, metrics, 1700000000).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_values_lines() {
        let mut metrics = ProjectedMetricSet::new();
        metrics.insert("retry.out1", 2.0);
        metrics.insert("queue.out1", 5.0);
        metrics.insert("size.out1", 1024.0);

        let output = render_values(&graph(&["retry.out1", "queue.out1", "size.out1"]), &metrics);

        assert_eq!(
            output,
            "fluentd.buffer.retry.out1\t2.000000\t1700000000\n\
             fluentd.buffer.queue.out1\t5.000000\t1700000000\n\
             fluentd.buffer.size.out1\t1024.000000\t1700000000\n"
        );
    }

    #[test]
    fn test_values_duplicate_names_written_once() {
        let mut metrics = ProjectedMetricSet::new();
        metrics.insert("retry.out1", 7.0);

        let output = render_values(&graph(&["retry.out1", "retry.out1"]), &metrics);

        assert_eq!(output, "fluentd.buffer.retry.out1\t7.000000\t1700000000\n");
    }

    #[test]
    fn test_values_skips_missing_and_non_finite() {
        let mut metrics = ProjectedMetricSet::new();
        metrics.insert("retry.a", f64::NAN);
        metrics.insert("queue.a", 1.0);

        let output = render_values(&graph(&["retry.a", "queue.a", "size.a"]), &metrics);

        assert_eq!(output, "fluentd.buffer.queue.a\t1.000000\t1700000000\n");
    }

    #[test]
    fn test_values_empty_graph() {
        assert_eq!(render_values(&graph(&[]), &ProjectedMetricSet::new()), "");
    }

    #[test]
    fn test_definitions_document() {
        let mut out = Vec::new();
        write_definitions(&mut out, &graph(&["retry.out1"])).unwrap();
        let output = String::from_utf8(out).unwrap();

        let (header, body) = output.split_once('\n').unwrap();
        assert_eq!(header, META_HEADER);
        assert!(body.ends_with('\n'));

        let json: serde_json::Value = serde_json::from_str(body.trim_end()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "graphs": {
                    "fluentd.buffer": {
                        "label": "Fluentd Buffer",
                        "unit": "float",
                        "metrics": [
                            {"name": "retry.out1", "label": "Label retry.out1", "stacked": false}
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_definitions_empty_graph_still_emitted() {
        let mut out = Vec::new();
        write_definitions(&mut out, &graph(&[])).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains(r#""metrics":[]"#));
    }
}
