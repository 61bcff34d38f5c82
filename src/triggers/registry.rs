//! Listener registry.
//!
//! The registry stores listeners and finds the ones registered for an
//! (event type, timing) pair. Firing them needs the whole engine, so the
//! sweep itself lives in `Engine::trigger`; the registry only answers
//! lookups and keeps registration order stable.

use rustc_hash::FxHashMap;

use crate::core::{CardId, ListenerId};

use super::event::{EventListener, EventType, Timing};

/// Registry for listeners.
///
/// Listeners are indexed by (event type, timing) in registration order.
#[derive(Clone, Debug, Default)]
pub struct ListenerRegistry {
    /// All registered listeners.
    listeners: FxHashMap<ListenerId, EventListener>,

    /// Index by (event type, timing) for fast lookup.
    by_event: FxHashMap<(EventType, Timing), Vec<ListenerId>>,

    /// Next listener ID to allocate.
    next_id: u32,
}

impl ListenerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, returns its assigned ID.
    pub fn register(&mut self, mut listener: EventListener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId::new(self.next_id);
        listener.id = id;

        self.by_event
            .entry((listener.event_type, listener.timing))
            .or_default()
            .push(id);
        self.listeners.insert(id, listener);
        id
    }

    /// Unregister a listener.
    pub fn unregister(&mut self, id: ListenerId) -> Option<EventListener> {
        let listener = self.listeners.remove(&id)?;
        let key = (listener.event_type, listener.timing);
        let now_empty = match self.by_event.get_mut(&key) {
            Some(list) => {
                list.retain(|&lid| lid != id);
                list.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.by_event.remove(&key);
        }
        Some(listener)
    }

    /// Remove every listener owned by `source`. Returns how many were removed.
    pub fn remove_by_source(&mut self, source: CardId) -> usize {
        let to_remove: Vec<_> = self
            .listeners
            .iter()
            .filter(|(_, l)| l.source == source)
            .map(|(&id, _)| id)
            .collect();

        let count = to_remove.len();
        for id in to_remove {
            self.unregister(id);
        }
        count
    }

    /// Get a listener by ID.
    #[must_use]
    pub fn get(&self, id: ListenerId) -> Option<&EventListener> {
        self.listeners.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    /// Listeners registered for an event and timing, in registration order.
    #[must_use]
    pub fn matching(&self, event_type: EventType, timing: Timing) -> Vec<EventListener> {
        let Some(ids) = self.by_event.get(&(event_type, timing)) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|id| self.listeners.get(id))
            .cloned()
            .collect()
    }

    /// Listeners owned by a source card.
    pub fn for_source(&self, source: CardId) -> Vec<&EventListener> {
        let mut found: Vec<_> = self
            .listeners
            .values()
            .filter(|l| l.source == source)
            .collect();
        found.sort_by_key(|l| l.id);
        found
    }

    /// Drop every listener. IDs keep increasing.
    pub fn clear(&mut self) {
        self.listeners.clear();
        self.by_event.clear();
    }

    /// Get total listener count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Iterate all listeners.
    pub fn iter(&self) -> impl Iterator<Item = &EventListener> {
        self.listeners.values()
    }
}
