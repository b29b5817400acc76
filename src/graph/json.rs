//! JSON persistence for `MemoryGraph`.
//!
//! A graph document maps every edge, keyed `"from,to"`, to its
//! `[weight, cost]` pair. The node list is stored alongside so isolated
//! nodes survive a round trip:
//!
//! ```text
//! {
//!   "nodes": [0, 1, 2],
//!   "edges": { "0,1": [1, 1], "0,2": [0, 1], "1,2": [2, 5] }
//! }
//! ```
//!
//! Loading runs every edge through `MemoryGraph::add_edge`, so a document
//! with negative vectors or duplicate pairs is refused with the same errors
//! as programmatic construction. Edge endpoints missing from `nodes` join
//! the universe.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};

use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::{Error, Result};
use super::{MemoryGraph, ResourceGraph};

#[derive(Debug, Serialize, Deserialize)]
struct GraphDocument {
    #[serde(default)]
    nodes: Vec<u64>,
    /// Entries in document order. A repeated key is kept, not merged, so
    /// the loader can refuse it.
    #[serde(
        serialize_with = "serde_edges::serialize",
        deserialize_with = "serde_edges::deserialize"
    )]
    edges: Vec<(String, [Resource; 2])>,
}

mod serde_edges {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};

    use crate::model::Resource;

    type Entry = (String, [Resource; 2]);

    pub fn serialize<S>(edges: &[Entry], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(edges.iter().map(|(key, value)| (key, value)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Entry>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Vec<Entry>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of \"from,to\" keys to [weight, cost] pairs")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0).min(1024));
                while let Some(entry) = map.next_entry::<String, [Resource; 2]>()? {
                    entries.push(entry);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn edge_key(from: NodeId, to: NodeId) -> String {
    format!("{},{}", from.0, to.0)
}

/// Parse one side of an edge key: ASCII digits only, no sign, no padding,
/// no leading zeros. Exactly what [`edge_key`] writes.
fn parse_node(digits: &str) -> Option<NodeId> {
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if !canonical {
        return None;
    }
    digits.parse::<u64>().ok().map(NodeId)
}

fn parse_edge_key(key: &str) -> Result<(NodeId, NodeId)> {
    let malformed = || Error::Persistence(format!("malformed edge key '{key}', expected \"from,to\""));
    let (from, to) = key.split_once(',').ok_or_else(malformed)?;
    let from = parse_node(from).ok_or_else(malformed)?;
    let to = parse_node(to).ok_or_else(malformed)?;
    Ok((from, to))
}

/// Write `graph` as a JSON document, edges ordered by (from, to).
pub fn write_json(graph: &MemoryGraph, writer: &mut dyn Write) -> Result<()> {
    let mut edges: Vec<&Edge> = graph.edges().collect();
    edges.sort_by_key(|e| (e.from, e.to));

    let doc = GraphDocument {
        nodes: graph.nodes().into_iter().map(|n| n.0).collect(),
        edges: edges
            .into_iter()
            .map(|e| (edge_key(e.from, e.to), [e.resources.weight, e.resources.cost]))
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)?;
    Ok(())
}

/// Read a graph from a JSON document.
pub fn read_json(reader: &mut dyn Read) -> Result<MemoryGraph> {
    let doc: GraphDocument = serde_json::from_reader(reader)?;

    let mut graph = MemoryGraph::new();
    for node in doc.nodes {
        graph.add_node(NodeId(node));
    }
    for (key, [weight, cost]) in doc.edges {
        let (from, to) = parse_edge_key(&key)?;
        graph.add_node(from);
        graph.add_node(to);
        graph.add_edge(Edge::new(from, to, ResourceVector::new(weight, cost)))?;
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph document"
    );
    Ok(graph)
}

/// Serialize `graph` to a JSON string.
pub fn to_json(graph: &MemoryGraph) -> Result<String> {
    let mut buf = Vec::new();
    write_json(graph, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::Persistence(e.to_string()))
}

/// Parse a graph from a JSON string.
pub fn from_json(json: &str) -> Result<MemoryGraph> {
    read_json(&mut json.as_bytes())
}

/// Save `graph` to a file, replacing any previous content.
pub fn save(graph: &MemoryGraph, path: impl AsRef<std::path::Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(graph, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Load a graph previously written by [`save`].
pub fn load(path: impl AsRef<std::path::Path>) -> Result<MemoryGraph> {
    let mut reader = BufReader::new(File::open(path)?);
    read_json(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_format() {
        assert_eq!(edge_key(NodeId(3), NodeId(14)), "3,14");
        assert_eq!(parse_edge_key("3,14").unwrap(), (NodeId(3), NodeId(14)));
        assert_eq!(parse_edge_key("0,0").unwrap(), (NodeId(0), NodeId(0)));
        assert_eq!(
            parse_edge_key(&edge_key(NodeId(u64::MAX), NodeId(10))).unwrap(),
            (NodeId(u64::MAX), NodeId(10))
        );
    }

    #[test]
    fn test_malformed_keys() {
        let keys = [
            "3", "a,b", "3,", ",4", "-1,2", "+0,1", "0,+1", " 3,14", "3 ,14", "03,1", "1,00",
            "1,2,3", "18446744073709551616,0",
        ];
        for key in keys {
            assert!(
                matches!(parse_edge_key(key), Err(Error::Persistence(_))),
                "key {key:?} should be refused"
            );
        }
    }

    #[test]
    fn test_document_shape() {
        let graph = MemoryGraph::from_edges([((0, 1), (1, 2))]).unwrap();
        let json = to_json(&graph).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"], serde_json::json!([0, 1]));
        assert_eq!(value["edges"]["0,1"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_nodes_optional_on_read() {
        let graph = from_json(r#"{"edges": {"0,1": [1, 1], "1,2": [2, 5]}}"#).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_rejects_invalid_edges() {
        assert!(matches!(
            from_json(r#"{"edges": {"0,1": [1, -1]}}"#),
            Err(Error::NegativeResource { .. })
        ));
        assert!(matches!(from_json(r#"{"edges": {"0;1": [1, 1]}}"#), Err(Error::Persistence(_))));
        assert!(matches!(from_json("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_repeated_key_is_duplicate_edge() {
        let json = r#"{"edges": {"0,1": [1, 1], "0,1": [5, 5]}}"#;
        assert!(matches!(
            from_json(json),
            Err(Error::DuplicateEdge { from: NodeId(0), to: NodeId(1) })
        ));

        // Same pair spelled differently is refused as a malformed key.
        assert!(matches!(
            from_json(r#"{"edges": {"0,1": [1, 1], "+0,1": [5, 5]}}"#),
            Err(Error::Persistence(_))
        ));
    }

    #[test]
    fn test_edges_written_in_numeric_order() {
        let graph = MemoryGraph::from_edges([((0, 10), (1, 1)), ((0, 2), (1, 1)), ((1, 0), (1, 1))]).unwrap();
        let json = to_json(&graph).unwrap();
        let first = json.find("\"0,2\"").unwrap();
        let second = json.find("\"0,10\"").unwrap();
        let third = json.find("\"1,0\"").unwrap();
        assert!(first < second && second < third, "{json}");
    }
}
