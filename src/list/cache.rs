//! Typed Resource Cache
//!
//! Short-lived cache of detail records keyed by id. Cleared on every route
//! change; a fetch started before a clear must not repopulate it.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct ResourceCache<K, V> {
    entries: HashMap<K, V>,
    generation: u64,
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for ResourceCache<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries && self.generation == other.generation
    }
}

impl<K, V> Default for ResourceCache<K, V> {
    fn default() -> Self {
        Self { entries: HashMap::new(), generation: 0 }
    }
}

impl<K: Eq + Hash, V> ResourceCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capture before starting a fetch, pass back to `insert_at`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    /// Insert only if the cache was not cleared since `generation` was read
    pub fn insert_at(&mut self, generation: u64, key: K, value: V) -> bool {
        if generation != self.generation {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_invalidate() {
        let mut cache = ResourceCache::new();
        cache.insert(3u32, "Coach Kim");
        assert_eq!(cache.get(&3), Some(&"Coach Kim"));
        assert_eq!(cache.invalidate(&3), Some("Coach Kim"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_rejects_inflight_insert() {
        let mut cache = ResourceCache::new();
        let before = cache.generation();
        cache.clear();

        assert!(!cache.insert_at(before, 1u32, "stale"));
        assert!(cache.get(&1).is_none());

        let now = cache.generation();
        assert!(cache.insert_at(now, 1u32, "fresh"));
        assert_eq!(cache.len(), 1);
    }
}
