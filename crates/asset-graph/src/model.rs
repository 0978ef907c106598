use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category of a graph node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Asset,
    Risk,
    Contextual,
}

/// Severity attached to a node.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Critical,
    High,
    Medium,
    Low,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Critical => "critical",
            Status::High => "high",
            Status::Medium => "medium",
            Status::Low => "low",
        }
    }
}

/// Annotation payload carried by a node. The details map is open-ended;
/// values are arbitrary JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub kind: NodeKind,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl NodeData {
    pub fn new(kind: NodeKind, status: Status) -> Self {
        Self {
            kind,
            status,
            badge: None,
            ip: None,
            description: None,
            details: BTreeMap::new(),
        }
    }
}

/// A node is an immutable value snapshot; replacing it in the aggregate
/// is the only way to "edit" it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
    /// Optional layout hint in canvas coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<(f32, f32)>,
}

impl GraphNode {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            data: None,
            position: None,
        }
    }

    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn status(&self) -> Option<Status> {
        self.data.as_ref().map(|d| d.status)
    }
}

/// Relation type of a directed edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Connection,
    Dependency,
    Flow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub kind: EdgeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Directed source -> target relation between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

impl GraphEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
            data: None,
        }
    }

    pub fn with_kind(mut self, kind: EdgeKind) -> Self {
        self.data = Some(EdgeData { kind, weight: None });
        self
    }
}

/// The aggregate: ordered node and edge sequences, replaced as one unit.
///
/// Invariant: every edge's source/target references a node in the same
/// aggregate. Upheld by the mutation API in [`crate::graph`].
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize,
)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
}
