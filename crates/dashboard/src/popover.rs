//! Transient overlay state for the node detail popover, independent of
//! the graph store.

use asset_graph::{GraphNode, Status};
use instant::{Duration, Instant};
use std::collections::BTreeMap;

/// How long a hidden popover keeps its payload so the exit transition
/// can finish before the content disappears.
pub const CLEAR_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq)]
pub struct PopoverPayload {
    pub node_id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub details: BTreeMap<String, serde_json::Value>,
    /// Screen-space position in pixels.
    pub position: (f32, f32),
}

impl PopoverPayload {
    /// Build a payload from a data node, with fallback defaults for the
    /// optional annotation fields.
    pub fn from_node(
        node: &GraphNode,
        position: (f32, f32),
    ) -> Self {
        let data = node.data.as_ref();
        Self {
            node_id: node.id.clone(),
            title: if node.label.is_empty() {
                String::from("Unknown Node")
            } else {
                node.label.clone()
            },
            description: data
                .and_then(|d| d.description.clone())
                .unwrap_or_else(|| {
                    String::from("No description available")
                }),
            status: data
                .map(|d| d.status)
                .unwrap_or(Status::Low),
            details: data
                .map(|d| d.details.clone())
                .unwrap_or_default(),
            position,
        }
    }
}

/// Two-phase teardown: `hide` drops visibility immediately and arms a
/// deferred payload clear. Any later `show` or `hide` supersedes the
/// pending clear, so a stale deadline can never wipe a payload that was
/// re-shown in the meantime.
pub struct PopoverStore {
    visible: bool,
    payload: Option<PopoverPayload>,
    pending_clear: Option<Instant>,
}

impl Default for PopoverStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PopoverStore {
    pub fn new() -> Self {
        Self {
            visible: false,
            payload: None,
            pending_clear: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn payload(&self) -> Option<&PopoverPayload> {
        self.payload.as_ref()
    }

    /// True while a deferred clear is armed; the app keeps repainting
    /// until the deadline fires.
    pub fn has_pending_clear(&self) -> bool {
        self.pending_clear.is_some()
    }

    /// Payload is set before the visible flag flips, so readers that
    /// react to visibility always observe a complete payload.
    pub fn show(&mut self, payload: PopoverPayload) {
        self.pending_clear = None;
        self.payload = Some(payload);
        self.visible = true;
    }

    pub fn hide(&mut self, now: Instant) {
        self.visible = false;
        self.pending_clear = Some(now + CLEAR_DELAY);
    }

    /// Replace only the position of the current payload, if any.
    pub fn update_position(&mut self, x: f32, y: f32) {
        if let Some(payload) = &mut self.payload {
            payload.position = (x, y);
        }
    }

    /// Drive the deferred clear; called once per frame.
    pub fn tick(&mut self, now: Instant) {
        if let Some(due) = self.pending_clear
            && now >= due
        {
            self.payload = None;
            self.pending_clear = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_graph::{NodeData, NodeKind};

    fn payload(id: &str) -> PopoverPayload {
        let node = GraphNode::new(id, "Node").with_data(
            NodeData::new(NodeKind::Asset, Status::Critical),
        );
        PopoverPayload::from_node(&node, (10.0, 20.0))
    }

    #[test]
    fn show_sets_payload_and_visibility() {
        let mut store = PopoverStore::new();
        store.show(payload("a"));
        assert!(store.is_visible());
        assert_eq!(store.payload().unwrap().node_id, "a");
    }

    #[test]
    fn hide_defers_the_payload_clear() {
        let t0 = Instant::now();
        let mut store = PopoverStore::new();
        store.show(payload("a"));
        store.hide(t0);

        assert!(!store.is_visible());
        // Payload survives until the delay elapses.
        store.tick(t0 + Duration::from_millis(50));
        assert!(store.payload().is_some());
        store.tick(t0 + CLEAR_DELAY);
        assert!(store.payload().is_none());
    }

    #[test]
    fn reshow_within_the_delay_cancels_the_stale_clear() {
        let t0 = Instant::now();
        let mut store = PopoverStore::new();
        store.show(payload("a"));
        store.hide(t0);
        store.show(payload("b"));

        // The old deadline passes; the fresh payload must survive.
        store.tick(t0 + Duration::from_millis(500));
        assert!(store.is_visible());
        assert_eq!(store.payload().unwrap().node_id, "b");
    }

    #[test]
    fn repeated_hide_extends_the_deadline() {
        let t0 = Instant::now();
        let mut store = PopoverStore::new();
        store.show(payload("a"));
        store.hide(t0);
        store.hide(t0 + Duration::from_millis(150));

        store.tick(t0 + Duration::from_millis(250));
        assert!(store.payload().is_some());
        store.tick(t0 + Duration::from_millis(350));
        assert!(store.payload().is_none());
    }

    #[test]
    fn update_position_touches_only_position() {
        let mut store = PopoverStore::new();
        store.show(payload("a"));
        store.update_position(99.0, 7.0);
        let p = store.payload().unwrap();
        assert_eq!(p.position, (99.0, 7.0));
        assert_eq!(p.node_id, "a");
        assert_eq!(p.status, Status::Critical);
    }

    #[test]
    fn update_position_without_payload_is_a_no_op() {
        let mut store = PopoverStore::new();
        store.update_position(1.0, 2.0);
        assert!(store.payload().is_none());
    }

    #[test]
    fn payload_fallbacks_for_bare_nodes() {
        let node = GraphNode::new("bare", "");
        let p = PopoverPayload::from_node(&node, (0.0, 0.0));
        assert_eq!(p.title, "Unknown Node");
        assert_eq!(p.description, "No description available");
        assert_eq!(p.status, Status::Low);
        assert!(p.details.is_empty());
    }
}
