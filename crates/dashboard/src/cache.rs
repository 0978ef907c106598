use crate::graph_view::{self, AssetGraphDisplay};
use crate::store::Store;
use crate::versioned::Memoized;
use asset_graph::GraphNode;

/// Derived values keyed by the aggregate version. Recomputation is the
/// only path to these values; nothing here is independently mutable
/// state that could drift from the store.
pub struct Cache {
    pub critical_nodes: Memoized<Store, u64, Vec<GraphNode>>,
    pub display: Memoized<Store, u64, AssetGraphDisplay>,
}

impl Cache {
    pub fn new() -> Self {
        let critical_nodes = Memoized::new(
            |s: &Store| s.graph_version(),
            |s: &Store| {
                s.graph()
                    .critical_nodes()
                    .into_iter()
                    .cloned()
                    .collect()
            },
        );

        let display = Memoized::new(
            |s: &Store| s.graph_version(),
            |s: &Store| graph_view::build_display(s.graph()),
        );

        Self {
            critical_nodes,
            display,
        }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}
