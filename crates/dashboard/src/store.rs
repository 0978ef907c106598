//! Single source of truth for the graph aggregate, the selection
//! pointer and the sidebar flag. All mutation goes through the action
//! reducer in [`crate::actions`]; presentation code only reads.

use crate::versioned::Versioned;
use asset_graph::{
    GraphData, GraphEdge, GraphError, GraphNode,
};

pub struct Store {
    graph: Versioned<GraphData>,
    selected: Option<GraphNode>,
    pub sidebar_collapsed: bool,
    /// Last rejected mutation, surfaced in the error window.
    pub last_error: Option<String>,
}

impl Store {
    pub fn new(graph: GraphData) -> Self {
        Self {
            graph: Versioned::new(graph),
            selected: None,
            sidebar_collapsed: false,
            last_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn graph(&self) -> &GraphData {
        self.graph.get()
    }

    /// Bumps on every committed aggregate mutation; keys the memoized
    /// derived values in [`crate::cache`].
    pub fn graph_version(&self) -> u64 {
        self.graph.version()
    }

    pub fn node_count(&self) -> usize {
        self.graph.get().node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.get().edge_count()
    }

    pub fn selected_node(&self) -> Option<&GraphNode> {
        self.selected.as_ref()
    }

    // ------------------------------------------------------------------
    // Mutations (reducer-only)
    // ------------------------------------------------------------------

    /// Atomic replacement of the whole aggregate; caller-supplied data
    /// is trusted verbatim. A selection that no longer resolves in the
    /// new aggregate is dropped.
    pub(crate) fn set_graph_data(&mut self, data: GraphData) {
        if let Some(sel) = &self.selected
            && !data.contains_node(&sel.id)
        {
            self.selected = None;
        }
        self.graph.set(data);
    }

    /// Mutations apply to a draft and commit atomically, so a rejected
    /// mutation neither changes the aggregate nor bumps the version.
    pub(crate) fn add_node(
        &mut self,
        node: GraphNode,
    ) -> Result<(), GraphError> {
        let mut next = self.graph.get().clone();
        next.add_node(node)?;
        self.graph.set(next);
        Ok(())
    }

    /// Removes the node and, via the aggregate cascade, every edge that
    /// references it. A matching selection is cleared as well.
    pub(crate) fn remove_node(
        &mut self,
        id: &str,
    ) -> Result<GraphNode, GraphError> {
        let mut next = self.graph.get().clone();
        let removed = next.remove_node(id)?;
        self.graph.set(next);
        if self
            .selected
            .as_ref()
            .is_some_and(|n| n.id == id)
        {
            self.selected = None;
        }
        Ok(removed)
    }

    pub(crate) fn add_edge(
        &mut self,
        edge: GraphEdge,
    ) -> Result<(), GraphError> {
        let mut next = self.graph.get().clone();
        next.add_edge(edge)?;
        self.graph.set(next);
        Ok(())
    }

    /// Wholesale replacement of the selection pointer; `None` clears it.
    pub(crate) fn select_node(&mut self, node: Option<GraphNode>) {
        self.selected = node;
    }

    pub(crate) fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub(crate) fn report(&mut self, err: &GraphError) {
        log::warn!("rejected mutation: {err}");
        self.last_error = Some(err.to_string());
    }
}
