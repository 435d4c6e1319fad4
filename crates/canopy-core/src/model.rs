//! Input records: nodes, edges and the combined graph document.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A node identifier as it appears in the input.
///
/// JSON documents may use either strings or integers; CSV input always yields strings. Ordering is
/// numeric among integers, lexicographic among strings, and integers sort before strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl NodeId {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeId::Str(s) => Some(s),
            NodeId::Int(_) => None,
        }
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NodeId::Int(a), NodeId::Int(b)) => a.cmp(b),
            (NodeId::Str(a), NodeId::Str(b)) => a.cmp(b),
            (NodeId::Int(_), NodeId::Str(_)) => Ordering::Less,
            (NodeId::Str(_), NodeId::Int(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{n}"),
            NodeId::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Str(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId::Str(value)
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId::Int(value)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NodeIdVisitor;

        impl Visitor<'_> for NodeIdVisitor {
            type Value = NodeId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer node id")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<NodeId, E> {
                Ok(NodeId::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeId, E> {
                i64::try_from(v)
                    .map(NodeId::Int)
                    .map_err(|_| E::custom(format!("node id {v} is out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeId, E> {
                Ok(NodeId::Str(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<NodeId, E> {
                Ok(NodeId::Str(v))
            }
        }

        deserializer.deserialize_any(NodeIdVisitor)
    }
}

/// A node record.
///
/// `color` and `level` are required by the hierarchy builder but optional here so that the same
/// record type also carries node-graph datasets, which omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

impl Node {
    /// A node with only the fields the hierarchy builder reads.
    pub fn new(
        id: impl Into<NodeId>,
        label: impl Into<String>,
        color: impl Into<String>,
        level: i64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: Some(color.into()),
            level: Some(level),
            title: None,
            size: None,
            font_color: None,
            status: None,
            error_rate: None,
            latency: None,
            throughput: None,
            shape: None,
        }
    }
}

pub const DEFAULT_EDGE_KIND: &str = "default";

fn default_edge_kind() -> String {
    DEFAULT_EDGE_KIND.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Free-form tag read only by renderers (e.g. `spouse`, `sibling`).
    #[serde(rename = "type", default = "default_edge_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput_rps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: String::new(),
            color: None,
            kind: default_edge_kind(),
            latency_ms: None,
            error_rate: None,
            throughput_rps: None,
            status: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A flat node/edge document, the loader's output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphData {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_id_accepts_strings_and_integers() {
        let ids: Vec<NodeId> = serde_json::from_value(json!(["a", 7, "7"])).unwrap();
        assert_eq!(
            ids,
            vec![NodeId::from("a"), NodeId::Int(7), NodeId::from("7")]
        );
        assert_eq!(serde_json::to_value(&ids).unwrap(), json!(["a", 7, "7"]));
    }

    #[test]
    fn node_id_orders_integers_numerically_before_strings() {
        let mut ids = vec![
            NodeId::from("b"),
            NodeId::Int(10),
            NodeId::from("10"),
            NodeId::Int(2),
            NodeId::from("2"),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                NodeId::Int(2),
                NodeId::Int(10),
                NodeId::from("10"),
                NodeId::from("2"),
                NodeId::from("b"),
            ]
        );
    }

    #[test]
    fn edge_type_defaults_to_default() {
        let edge: Edge = serde_json::from_value(json!({"from": "a", "to": "b"})).unwrap();
        assert_eq!(edge.kind, DEFAULT_EDGE_KIND);
        assert_eq!(edge.label, "");

        let spouse: Edge =
            serde_json::from_value(json!({"from": "a", "to": "b", "type": "spouse"})).unwrap();
        assert_eq!(spouse.kind, "spouse");
    }
}
