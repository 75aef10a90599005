//! # Collection
//!
//! One ordered, lock-protected list of identified records.
//!
//! Every mutation happens under a single write lock, so a reader either sees
//! the whole previous list or the whole new one, never a partial write.

use parking_lot::RwLock;
use shared_types::Identified;
use std::collections::HashSet;
use tracing::{debug, warn};

struct Inner<T> {
    items: Vec<T>,
    /// Bumped on every mutation so renderers can skip unchanged snapshots.
    version: u64,
}

/// An ordered collection whose ids are unique.
pub struct Collection<T> {
    name: &'static str,
    inner: RwLock<Inner<T>>,
}

impl<T: Identified + Clone> Collection<T> {
    /// Create an empty collection. `name` is only used in logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(Inner {
                items: Vec::new(),
                version: 0,
            }),
        }
    }

    /// Replace the whole collection.
    ///
    /// Order is preserved. If the incoming list repeats an id, only the first
    /// occurrence is kept.
    pub fn replace_all(&self, items: Vec<T>) {
        let mut seen = HashSet::with_capacity(items.len());
        let incoming = items.len();
        let items: Vec<T> = items
            .into_iter()
            .filter(|item| seen.insert(item.id().to_string()))
            .collect();

        if items.len() != incoming {
            warn!(
                collection = self.name,
                dropped = incoming - items.len(),
                "Duplicate ids in replacement, keeping first occurrence"
            );
        }

        let mut inner = self.inner.write();
        inner.items = items;
        inner.version += 1;
        debug!(collection = self.name, len = inner.items.len(), "Collection replaced");
    }

    /// Insert `item` at index 0.
    ///
    /// An existing record with the same id is removed first, so the id stays
    /// unique and the new record wins.
    pub fn insert_front(&self, item: T) {
        let mut inner = self.inner.write();
        if let Some(pos) = inner.items.iter().position(|existing| existing.id() == item.id()) {
            warn!(collection = self.name, id = item.id(), "Replacing record with same id");
            inner.items.remove(pos);
        }
        inner.items.insert(0, item);
        inner.version += 1;
    }

    /// Remove the record with `id`, returning it if present.
    pub fn remove_by_id(&self, id: &str) -> Option<T> {
        let mut inner = self.inner.write();
        let pos = inner.items.iter().position(|item| item.id() == id)?;
        let removed = inner.items.remove(pos);
        inner.version += 1;
        Some(removed)
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.read().items.clone()
    }

    /// Copy of the record with `id`.
    pub fn get(&self, id: &str) -> Option<T> {
        self.inner.read().items.iter().find(|item| item.id() == id).cloned()
    }

    /// Copy of the records matching `predicate`, in collection order.
    pub fn filtered<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .items
            .iter()
            .filter(|item| predicate(*item))
            .cloned()
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().items.iter().any(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().items.is_empty()
    }

    /// Mutation counter.
    pub fn version(&self) -> u64 {
        self.inner.read().version
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        label: &'static str,
    }

    impl Identified for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, label: &'static str) -> Item {
        Item {
            id: id.to_string(),
            label,
        }
    }

    #[test]
    fn test_replace_all_preserves_order() {
        let c = Collection::new("items");
        c.insert_front(item("old", "stale"));
        c.replace_all(vec![item("a", "A"), item("b", "B")]);
        assert_eq!(c.snapshot(), vec![item("a", "A"), item("b", "B")]);
    }

    #[test]
    fn test_replace_all_with_empty_clears() {
        let c = Collection::new("items");
        c.replace_all(vec![item("a", "A")]);
        c.replace_all(vec![]);
        assert!(c.is_empty());
    }

    #[test]
    fn test_replace_all_drops_duplicate_ids() {
        let c = Collection::new("items");
        c.replace_all(vec![item("a", "first"), item("b", "B"), item("a", "second")]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get("a").unwrap().label, "first");
    }

    #[test]
    fn test_insert_front_is_newest_first() {
        let c = Collection::new("items");
        c.insert_front(item("1", "one"));
        c.insert_front(item("2", "two"));
        let ids: Vec<String> = c.snapshot().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_insert_front_same_id_replaces() {
        let c = Collection::new("items");
        c.insert_front(item("1", "one"));
        c.insert_front(item("2", "two"));
        c.insert_front(item("1", "uno"));
        assert_eq!(c.len(), 2);
        assert_eq!(c.snapshot()[0], item("1", "uno"));
    }

    #[test]
    fn test_remove_by_id_removes_exactly_one() {
        let c = Collection::new("items");
        c.replace_all(vec![item("a", "same"), item("b", "same"), item("c", "other")]);
        let removed = c.remove_by_id("b").unwrap();
        assert_eq!(removed.id, "b");
        assert_eq!(c.snapshot(), vec![item("a", "same"), item("c", "other")]);
    }

    #[test]
    fn test_remove_missing_is_none() {
        let c: Collection<Item> = Collection::new("items");
        let before = c.version();
        assert!(c.remove_by_id("nope").is_none());
        assert_eq!(c.version(), before);
    }

    #[test]
    fn test_version_bumps_on_mutation() {
        let c = Collection::new("items");
        assert_eq!(c.version(), 0);
        c.replace_all(vec![item("a", "A")]);
        c.insert_front(item("b", "B"));
        c.remove_by_id("a");
        assert_eq!(c.version(), 3);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let c = Collection::new("items");
        c.replace_all(vec![item("a", "A")]);
        let snap = c.snapshot();
        c.replace_all(vec![]);
        assert_eq!(snap.len(), 1);
        assert!(!c.contains("a"));
    }
}
