//! Validated mutation API for the graph aggregate.
//!
//! All mutations either apply fully or leave the aggregate untouched and
//! return a [`GraphError`]. Errors are meant to be reported back to the
//! caller, not propagated as fatal failures.

use crate::model::{GraphData, GraphEdge, GraphNode, Status};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("no node with id `{id}`")]
    NotFound { id: String },
    #[error("id `{id}` already exists")]
    DuplicateId { id: String },
    #[error("edge `{edge}` references missing node `{node}`")]
    DanglingReference { edge: String, node: String },
}

impl GraphData {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Append a node. Duplicate ids are rejected rather than silently
    /// accepted, so downstream id lookups stay unambiguous.
    pub fn add_node(
        &mut self,
        node: GraphNode,
    ) -> Result<(), GraphError> {
        if self.contains_node(&node.id) {
            return Err(GraphError::DuplicateId { id: node.id });
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Remove the node with the given id and cascade: every edge whose
    /// source or target equals `id` is dropped with it. This is what
    /// keeps the referential invariant on the aggregate.
    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> Result<GraphNode, GraphError> {
        let pos = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| GraphError::NotFound {
                id: id.to_owned(),
            })?;
        let node = self.nodes.remove(pos);
        self.links
            .retain(|e| e.source != id && e.target != id);
        Ok(node)
    }

    /// Append an edge. Both endpoints must already exist and the edge id
    /// must be new; otherwise the aggregate is left unchanged.
    pub fn add_edge(
        &mut self,
        edge: GraphEdge,
    ) -> Result<(), GraphError> {
        if self.links.iter().any(|e| e.id == edge.id) {
            return Err(GraphError::DuplicateId { id: edge.id });
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::DanglingReference {
                    edge: edge.id,
                    node: endpoint.clone(),
                });
            }
        }
        self.links.push(edge);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.links.len()
    }

    /// The subset of nodes whose status is Critical, in aggregate order.
    pub fn critical_nodes(&self) -> Vec<&GraphNode> {
        self.nodes_with_status(Status::Critical)
    }

    pub fn nodes_with_status(
        &self,
        status: Status,
    ) -> Vec<&GraphNode> {
        self.nodes
            .iter()
            .filter(|n| n.status() == Some(status))
            .collect()
    }

    pub fn count_by_status(&self, status: Status) -> usize {
        self.nodes_with_status(status).len()
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeKind, NodeData, NodeKind};

    fn node(id: &str, status: Status) -> GraphNode {
        GraphNode::new(id, id.to_uppercase())
            .with_data(NodeData::new(NodeKind::Asset, status))
    }

    /// Four nodes (node1 critical, the rest not) and three edges, the
    /// same shape as the dashboard's seed aggregate.
    fn sample() -> GraphData {
        let mut g = GraphData::default();
        g.add_node(node("node1", Status::Critical)).unwrap();
        g.add_node(node("node2", Status::High)).unwrap();
        g.add_node(node("node3", Status::Medium)).unwrap();
        g.add_node(node("node4", Status::Low)).unwrap();
        g.add_edge(
            GraphEdge::new("edge1", "node1", "node2")
                .with_kind(EdgeKind::Connection),
        )
        .unwrap();
        g.add_edge(
            GraphEdge::new("edge2", "node2", "node3")
                .with_kind(EdgeKind::Dependency),
        )
        .unwrap();
        g.add_edge(
            GraphEdge::new("edge3", "node1", "node4")
                .with_kind(EdgeKind::Flow),
        )
        .unwrap();
        g
    }

    #[test]
    fn counts_track_the_aggregate() {
        let mut g = sample();
        assert_eq!(g.node_count(), g.nodes.len());
        assert_eq!(g.edge_count(), g.links.len());

        g.add_node(node("x", Status::Critical)).unwrap();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.critical_nodes().len(), 2);

        g.remove_node("x").unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.critical_nodes().len(), 1);
    }

    #[test]
    fn critical_subset_is_exact() {
        let g = sample();
        let critical = g.critical_nodes();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].id, "node1");

        let mut g = g;
        g.remove_node("node1").unwrap();
        assert!(g.critical_nodes().is_empty());
    }

    #[test]
    fn remove_node_cascades_to_edges() {
        let mut g = sample();
        // node1 is connected to node2 and node4.
        let removed = g.remove_node("node1").unwrap();
        assert_eq!(removed.id, "node1");
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 1);
        assert!(g
            .links
            .iter()
            .all(|e| e.source != "node1" && e.target != "node1"));
    }

    #[test]
    fn remove_missing_node_is_reported() {
        let mut g = sample();
        let before = g.clone();
        let err = g.remove_node("nope").unwrap_err();
        assert_eq!(
            err,
            GraphError::NotFound { id: "nope".into() }
        );
        assert_eq!(g, before);
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let mut g = sample();
        let before = g.clone();
        let err =
            g.add_node(node("node1", Status::Low)).unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateId { id: "node1".into() }
        );
        assert_eq!(g, before);
    }

    #[test]
    fn dangling_edge_is_rejected() {
        let mut g = sample();
        let before = g.clone();
        let err = g
            .add_edge(GraphEdge::new("e9", "node1", "ghost"))
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::DanglingReference {
                edge: "e9".into(),
                node: "ghost".into(),
            }
        );
        assert_eq!(g, before);
    }

    #[test]
    fn duplicate_edge_id_is_rejected() {
        let mut g = sample();
        let err = g
            .add_edge(GraphEdge::new("edge1", "node2", "node4"))
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateId { id: "edge1".into() }
        );
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn nodes_without_data_have_no_status() {
        let mut g = GraphData::default();
        g.add_node(GraphNode::new("bare", "Bare")).unwrap();
        assert!(g.critical_nodes().is_empty());
        assert_eq!(g.count_by_status(Status::Low), 0);
    }
}
