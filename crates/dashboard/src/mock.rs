//! Seed aggregate shown at startup. Mirrors the demo security/asset
//! graph: four nodes of mixed severity and three typed edges.

use asset_graph::{
    EdgeKind, GraphData, GraphEdge, GraphNode, NodeData, NodeKind,
    Status,
};
use serde_json::json;
use std::collections::BTreeMap;

fn details(
    entries: &[(&str, &str)],
) -> BTreeMap<String, serde_json::Value> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect()
}

pub fn mock_graph_data() -> GraphData {
    let mut data = GraphData::default();

    let nodes = [
        GraphNode::new("node1", "Loremipsumdolorit").with_data(
            NodeData {
                kind: NodeKind::Asset,
                status: Status::Critical,
                badge: Some(2),
                ip: Some("192.168.1.1".into()),
                description: Some("Critical asset node".into()),
                details: details(&[("asset", "Asset 1")]),
            },
        ),
        GraphNode::new("node2", "Loremipsum").with_data(NodeData {
            kind: NodeKind::Risk,
            status: Status::High,
            badge: Some(0),
            ip: None,
            description: Some("High risk node".into()),
            details: details(&[("contextualRisk", "High")]),
        }),
        GraphNode::new("node3", "Loremipsi").with_data(NodeData {
            kind: NodeKind::Contextual,
            status: Status::Medium,
            badge: Some(0),
            ip: None,
            description: Some("Medium contextual node".into()),
            details: details(&[("contextualRisk", "Medium")]),
        }),
        GraphNode::new("node4", "Loremipsumdolorit002").with_data(
            NodeData {
                kind: NodeKind::Asset,
                status: Status::Low,
                badge: Some(3),
                ip: Some("192.168.1.2".into()),
                description: Some("Low risk asset".into()),
                details: details(&[("asset", "Asset 2")]),
            },
        ),
    ];

    let links = [
        GraphEdge::new("edge1", "node1", "node2").with_kind(
            EdgeKind::Connection,
        ),
        GraphEdge::new("edge2", "node2", "node3").with_kind(
            EdgeKind::Dependency,
        ),
        GraphEdge::new("edge3", "node1", "node4")
            .with_kind(EdgeKind::Flow),
    ];

    // The seed is known-consistent; a failure here is a programming
    // error in this module, not user input.
    for node in nodes {
        data.add_node(node).expect("mock node ids are unique");
    }
    for link in links {
        data.add_edge(link).expect("mock edges are consistent");
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_shape_matches_the_demo_dataset() {
        let data = mock_graph_data();
        assert_eq!(data.node_count(), 4);
        assert_eq!(data.edge_count(), 3);
        assert_eq!(data.critical_nodes().len(), 1);
        assert_eq!(data.critical_nodes()[0].id, "node1");
        assert_eq!(
            data.node("node1").unwrap().data.as_ref().unwrap().badge,
            Some(2)
        );
    }

    #[test]
    fn mock_edge_kinds() {
        let data = mock_graph_data();
        let kinds: Vec<EdgeKind> = data
            .links
            .iter()
            .filter_map(|e| e.data.as_ref().map(|d| d.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                EdgeKind::Connection,
                EdgeKind::Dependency,
                EdgeKind::Flow
            ]
        );
    }

    #[test]
    fn edge_data_defaults_have_no_weight() {
        let data = mock_graph_data();
        assert!(data.links.iter().all(|e| {
            e.data
                .as_ref()
                .map(|d| d.weight.is_none())
                .unwrap_or(true)
        }));
    }
}
