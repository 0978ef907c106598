//! Bridge between the graph aggregate and the egui_graphs widget.

use crate::layout_radial::{LayoutRadial, LayoutStateRadial};
use crate::node_shapes::StatusNodeShape;
use asset_graph::{GraphData, GraphNode};
use egui_graphs::{DefaultEdgeShape, Graph, GraphView};
use petgraph::Directed;
use petgraph::graph::DefaultIx;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use std::collections::HashMap;

/// Display graph rendered by the widget; node payloads are the data
/// nodes themselves so a visual node resolves back to its id.
pub type AssetGraphDisplay = Graph<
    GraphNode,
    f32,
    Directed,
    DefaultIx,
    StatusNodeShape,
    DefaultEdgeShape,
>;

pub type AssetGraphView<'a> = GraphView<
    'a,
    GraphNode,
    f32,
    Directed,
    DefaultIx,
    StatusNodeShape,
    DefaultEdgeShape,
    LayoutStateRadial,
    LayoutRadial,
>;

/// Rebuild the display graph from the aggregate. Called through the
/// cache whenever the aggregate version changes; display node indices
/// follow aggregate order.
pub fn build_display(data: &GraphData) -> AssetGraphDisplay {
    let mut g: StableGraph<GraphNode, f32> = StableGraph::new();

    let mut index_of: HashMap<&str, NodeIndex> = HashMap::new();
    for node in &data.nodes {
        let idx = g.add_node(node.clone());
        index_of.insert(node.id.as_str(), idx);
    }

    for edge in &data.links {
        // The store upholds the referential invariant, so both lookups
        // succeed for any aggregate that went through the mutation API.
        if let (Some(&source), Some(&target)) = (
            index_of.get(edge.source.as_str()),
            index_of.get(edge.target.as_str()),
        ) {
            let weight = edge
                .data
                .as_ref()
                .and_then(|d| d.weight)
                .unwrap_or(1.0) as f32;
            g.add_edge(source, target, weight);
        }
    }

    let mut display = AssetGraphDisplay::from(&g);
    for (idx, node) in g.node_indices().zip(g.node_weights()) {
        if let Some(display_node) = display.node_mut(idx) {
            display_node.set_label(node.label.clone());
        }
    }

    // Edge indices follow insertion order, which is aggregate order.
    let edge_indices: Vec<_> =
        display.edges_iter().map(|(idx, _)| idx).collect();
    for (edge_idx, edge) in edge_indices.into_iter().zip(&data.links)
    {
        if let Some(display_edge) = display.edge_mut(edge_idx) {
            display_edge
                .set_label(edge.label.clone().unwrap_or_default());
        }
    }

    display
}

/// Resolve a visual node back to its data node id.
pub fn node_id_at(
    display: &AssetGraphDisplay,
    idx: NodeIndex,
) -> Option<String> {
    display.node(idx).map(|n| n.payload().id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::mock_graph_data;

    #[test]
    fn display_mirrors_the_aggregate() {
        let data = mock_graph_data();
        let display = build_display(&data);
        assert_eq!(display.node_count(), data.node_count());
        assert_eq!(display.edge_count(), data.edge_count());
    }

    #[test]
    fn display_nodes_resolve_back_to_ids() {
        let data = mock_graph_data();
        let display = build_display(&data);
        let ids: Vec<String> = display
            .nodes_iter()
            .filter_map(|(idx, _)| node_id_at(&display, idx))
            .collect();
        assert_eq!(ids, vec!["node1", "node2", "node3", "node4"]);
    }

    #[test]
    fn display_labels_come_from_the_data_nodes() {
        let data = mock_graph_data();
        let display = build_display(&data);
        let first = display
            .nodes_iter()
            .next()
            .map(|(_, n)| n.payload().label.clone())
            .unwrap();
        assert_eq!(first, "Loremipsumdolorit");
    }
}
