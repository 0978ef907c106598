use crate::actions::{self, Action};
use crate::cache::Cache;
use crate::popover::PopoverStore;
use crate::store::Store;
use instant::Instant;

/// Owns both stores, the derived-value cache and the action queue.
/// Presentation components dispatch actions during a frame; the app
/// flushes them before drawing, so readers never observe a torn state.
pub struct State {
    pub store: Store,
    pub popover: PopoverStore,
    pub cache: Cache,
    action_queue: Vec<Action>,
}

impl State {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            popover: PopoverStore::new(),
            cache: Cache::new(),
            action_queue: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        self.action_queue.push(action);
    }

    pub fn flush_actions(&mut self, now: Instant) {
        let actions = std::mem::take(&mut self.action_queue);
        for action in actions {
            actions::update(
                &mut self.store,
                &mut self.popover,
                now,
                action,
            );
        }
    }

    /// Per-frame housekeeping: drives the popover's deferred clear.
    pub fn tick(&mut self, now: Instant) {
        self.popover.tick(now);
    }

    /// Whether another frame is needed: queued actions or an armed
    /// deferred clear.
    pub fn has_pending_work(&self) -> bool {
        !self.action_queue.is_empty()
            || self.popover.has_pending_clear()
    }
}
