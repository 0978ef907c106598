//! Radial layout for the dashboard graph: nodes are placed once on a
//! circle (sorted by label), except nodes carrying an explicit position
//! hint, which are pinned where the aggregate says. After the initial
//! placement the user is free to drag nodes around.

use eframe::egui;
use egui_graphs::{
    DisplayEdge, DisplayNode, Graph, Layout, LayoutState,
};
use once_cell::sync::Lazy;
use petgraph::EdgeType;
use petgraph::graph::IndexType;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

const BASE_RADIUS: f32 = 110.0;
const RADIUS_PER_NODE: f32 = 9.0;

// The widget constructs layout state via Default, so the seed for the
// next reset is handed over through this slot beforehand (same handoff
// scheme the editor uses for its layouts).
static PENDING_SEED: Lazy<RwLock<Option<RadialSeed>>> =
    Lazy::new(|| RwLock::new(None));

pub fn set_pending_seed(seed: RadialSeed) {
    *PENDING_SEED.write().unwrap() = Some(seed);
}

/// Placement input derived from the aggregate: display indices in
/// label order, plus pinned positions for nodes with a hint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadialSeed {
    pub order: Vec<usize>,
    pub pinned: Vec<(usize, (f32, f32))>,
}

impl RadialSeed {
    pub fn from_graph(data: &asset_graph::GraphData) -> Self {
        let mut order: Vec<usize> =
            (0..data.nodes.len()).collect();
        order.sort_by(|&a, &b| {
            data.nodes[a].label.cmp(&data.nodes[b].label)
        });
        let pinned = data
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.position.map(|p| (i, p)))
            .collect();
        Self { order, pinned }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutStateRadial {
    seed: RadialSeed,
    applied: bool,
}

impl LayoutStateRadial {
    fn take_pending() -> Self {
        let seed = PENDING_SEED
            .write()
            .unwrap()
            .take()
            .unwrap_or_default();
        Self {
            seed,
            applied: false,
        }
    }
}

impl LayoutState for LayoutStateRadial {}

#[derive(Debug, Default)]
pub struct LayoutRadial {
    state: LayoutStateRadial,
}

impl Layout<LayoutStateRadial> for LayoutRadial {
    fn from_state(
        state: LayoutStateRadial,
    ) -> impl Layout<LayoutStateRadial> {
        // A freshly reset state picks up the pending seed.
        let state = if state.applied {
            state
        } else {
            LayoutStateRadial::take_pending()
        };
        Self { state }
    }

    fn next<N, E, Ty, Ix, Dn, De>(
        &mut self,
        g: &mut Graph<N, E, Ty, Ix, Dn, De>,
        ui: &egui::Ui,
    ) where
        N: Clone,
        E: Clone,
        Ty: EdgeType,
        Ix: IndexType,
        Dn: DisplayNode<N, E, Ty, Ix>,
        De: DisplayEdge<N, E, Ty, Ix, Dn>,
    {
        if self.state.applied {
            return;
        }

        let order = &self.state.seed.order;
        let node_count = order.len();
        if node_count == 0 {
            return;
        }

        let rect = ui.available_rect_before_wrap();
        let center = rect.center();
        let radius =
            BASE_RADIUS + (node_count as f32) * RADIUS_PER_NODE;

        for (i, node_idx) in order.iter().enumerate() {
            // Start at the top and go clockwise.
            let angle = -std::f32::consts::PI / 2.0
                + (i as f32) * 2.0 * std::f32::consts::PI
                    / (node_count as f32);
            let pos = egui::Pos2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            );
            let idx = petgraph::stable_graph::NodeIndex::<Ix>::new(
                *node_idx,
            );
            if let Some(node) = g.node_mut(idx) {
                node.set_location(pos);
            }
        }

        // Position hints override the circle placement.
        for (node_idx, (x, y)) in &self.state.seed.pinned {
            let idx = petgraph::stable_graph::NodeIndex::<Ix>::new(
                *node_idx,
            );
            if let Some(node) = g.node_mut(idx) {
                node.set_location(egui::Pos2::new(*x, *y));
            }
        }

        self.state.applied = true;
    }

    fn state(&self) -> LayoutStateRadial {
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_graph::{GraphData, GraphNode};

    #[test]
    fn seed_orders_nodes_by_label() {
        let mut data = GraphData::default();
        data.add_node(GraphNode::new("a", "Zeta")).unwrap();
        data.add_node(GraphNode::new("b", "Alpha")).unwrap();
        data.add_node(GraphNode::new("c", "Mid")).unwrap();

        let seed = RadialSeed::from_graph(&data);
        assert_eq!(seed.order, vec![1, 2, 0]);
        assert!(seed.pinned.is_empty());
    }

    #[test]
    fn seed_collects_position_hints() {
        let mut data = GraphData::default();
        let mut hinted = GraphNode::new("a", "A");
        hinted.position = Some((42.0, 7.0));
        data.add_node(hinted).unwrap();
        data.add_node(GraphNode::new("b", "B")).unwrap();

        let seed = RadialSeed::from_graph(&data);
        assert_eq!(seed.pinned, vec![(0, (42.0, 7.0))]);
    }
}
