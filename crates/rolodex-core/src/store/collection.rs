// ── Generic reactive entity collection ──
//
// Identifier-keyed ordered storage with O(1) lookups and push-based
// change notification via `watch` channels. Insertion order is the
// display order: `push` appends, `remove` preserves the order of the rest.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::watch;

use crate::model::{Entity, EntityId};

/// An ordered, reactive collection for a single entity type.
///
/// Every mutation bumps a version counter and rebuilds the snapshot that
/// subscribers receive. Mutations take `&mut self`: the owning controller
/// is the only writer.
pub struct EntityCollection<T: Entity> {
    /// Primary storage: id -> entity, in insertion order.
    by_id: IndexMap<EntityId, Arc<T>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Entity> Default for EntityCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityCollection<T> {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: IndexMap::new(),
            version,
            snapshot,
        }
    }

    /// Replace the whole collection (not merged).
    pub fn replace_all<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<Arc<T>>,
    {
        self.by_id = items
            .into_iter()
            .map(Into::into)
            .map(|item: Arc<T>| (item.id().clone(), item))
            .collect();
        self.publish();
    }

    /// Append an entity at the end. An existing entry with the same id is
    /// replaced where it stands.
    pub fn push(&mut self, item: T) {
        self.by_id.insert(item.id().clone(), Arc::new(item));
        self.publish();
    }

    /// Replace the entry sharing `item`'s id in place.
    ///
    /// Returns `false` (and changes nothing) when no such entry exists.
    pub fn replace(&mut self, item: T) -> bool {
        match self.by_id.get_mut(item.id()) {
            Some(slot) => {
                *slot = Arc::new(item);
                self.publish();
                true
            }
            None => false,
        }
    }

    /// Remove an entity by id. Returns the removed entity if it existed.
    pub fn remove(&mut self, id: &EntityId) -> Option<Arc<T>> {
        let removed = self.by_id.shift_remove(id);
        if removed.is_some() {
            self.publish();
        }
        removed
    }

    pub fn get(&self, id: &EntityId) -> Option<Arc<T>> {
        self.by_id.get(id).map(Arc::clone)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    /// Number of mutations applied so far.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Remove all entities.
    pub fn clear(&mut self) {
        self.by_id.clear();
        self.publish();
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All ids in display order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.by_id.keys().cloned().collect()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Rebuild the snapshot, broadcast it, and bump the version.
    fn publish(&mut self) {
        let values: Vec<Arc<T>> = self.by_id.values().map(Arc::clone).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: EntityId,
        label: &'static str,
    }

    impl Entity for Item {
        fn id(&self) -> &EntityId {
            &self.id
        }
    }

    fn item(id: u64, label: &'static str) -> Item {
        Item {
            id: EntityId::Numeric(id),
            label,
        }
    }

    fn labels(col: &EntityCollection<Item>) -> Vec<&'static str> {
        col.snapshot().iter().map(|i| i.label).collect()
    }

    #[test]
    fn push_appends_in_creation_order() {
        let mut col = EntityCollection::new();
        col.push(item(3, "c"));
        col.push(item(1, "a"));
        col.push(item(2, "b"));
        assert_eq!(labels(&col), vec!["c", "a", "b"]);
    }

    #[test]
    fn replace_all_is_wholesale() {
        let mut col = EntityCollection::new();
        col.push(item(1, "a"));
        col.replace_all(vec![item(2, "b"), item(3, "c")]);
        assert!(!col.contains(&EntityId::Numeric(1)));
        assert_eq!(labels(&col), vec!["b", "c"]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut col = EntityCollection::new();
        col.replace_all(vec![item(1, "a"), item(2, "b"), item(3, "c")]);
        assert!(col.replace(item(2, "B")));
        assert_eq!(labels(&col), vec!["a", "B", "c"]);
    }

    #[test]
    fn replace_of_unknown_id_is_a_no_op() {
        let mut col = EntityCollection::new();
        col.push(item(1, "a"));
        let before = col.version();
        assert!(!col.replace(item(9, "z")));
        assert_eq!(col.version(), before);
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut col = EntityCollection::new();
        col.replace_all(vec![item(1, "a"), item(2, "b"), item(3, "c")]);
        let removed = col.remove(&EntityId::Numeric(1)).unwrap();
        assert_eq!(removed.label, "a");
        assert_eq!(labels(&col), vec!["b", "c"]);
        assert!(col.remove(&EntityId::Numeric(1)).is_none());
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let mut col = EntityCollection::new();
        let mut rx = col.subscribe();
        col.push(item(1, "a"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
        col.clear();
        assert!(rx.borrow_and_update().is_empty());
        assert!(col.is_empty());
    }

    #[test]
    fn get_returns_shared_handle() {
        let mut col = EntityCollection::new();
        col.push(item(1, "a"));
        assert_eq!(col.get(&EntityId::Numeric(1)).unwrap().label, "a");
        assert_eq!(col.ids(), vec![EntityId::Numeric(1)]);
    }
}
