use crate::popover::{PopoverPayload, PopoverStore};
use crate::store::Store;
use asset_graph::{GraphData, GraphEdge, GraphNode};
use instant::Instant;

/// Actions dispatched by the presentation layer. The reducer below is
/// the only mutation path into either store.
#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the whole aggregate atomically
    SetGraphData { data: GraphData },
    /// Append a node to the aggregate
    AddNode { node: GraphNode },
    /// Remove a node and cascade to its edges
    RemoveNode { id: String },
    /// Append an edge between two existing nodes
    AddEdge { edge: GraphEdge },
    /// Replace the selection pointer; None clears it
    SelectNode { node: Option<GraphNode> },
    /// Flip the sidebar collapsed flag
    ToggleSidebar,
    /// Show the detail popover for a node
    ShowPopover { payload: PopoverPayload },
    /// Hide the popover; its payload clears after the exit delay
    HidePopover,
    /// Move the popover without touching the rest of its payload
    UpdatePopoverPosition { x: f32, y: f32 },
    /// Dismiss the last rejected-mutation message
    ClearError,
}

/// Apply a single action. Rejected graph mutations leave the aggregate
/// untouched and are recorded on the store instead of propagating.
pub fn update(
    store: &mut Store,
    popover: &mut PopoverStore,
    now: Instant,
    action: Action,
) {
    match action {
        Action::SetGraphData { data } => {
            store.set_graph_data(data);
        }
        Action::AddNode { node } => {
            if let Err(e) = store.add_node(node) {
                store.report(&e);
            }
        }
        Action::RemoveNode { id } => {
            if let Err(e) = store.remove_node(&id) {
                store.report(&e);
            }
        }
        Action::AddEdge { edge } => {
            if let Err(e) = store.add_edge(edge) {
                store.report(&e);
            }
        }
        Action::SelectNode { node } => {
            store.select_node(node);
        }
        Action::ToggleSidebar => {
            store.toggle_sidebar();
        }
        Action::ShowPopover { payload } => {
            popover.show(payload);
        }
        Action::HidePopover => {
            popover.hide(now);
        }
        Action::UpdatePopoverPosition { x, y } => {
            popover.update_position(x, y);
        }
        Action::ClearError => {
            store.last_error = None;
        }
    }
}
