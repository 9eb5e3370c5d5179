//! Fetched Collection
//!
//! Local cache of one resource list plus its loading flag. The backend is
//! the source of truth; this only mirrors the latest accepted response.

use super::{Id, Record};
use crate::error::ApiError;

/// Identifies one fetch; only the newest ticket may write results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(usize),
    Failed(ApiError),
    /// A newer fetch was issued while this one was in flight
    Stale,
}

/// Where a removed item sat, by neighbour identity as well as position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    pub before: Option<Id>,
    pub after: Option<Id>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
    loading: bool,
    issued: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new(), loading: false, issued: 0 }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<T>) -> Self {
        Self { items, ..Self::default() }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        self.issued += 1;
        self.loading = true;
        Ticket(self.issued)
    }

    /// Read failures degrade to an empty list
    pub fn finish_fetch(&mut self, ticket: Ticket, result: Result<Vec<T>, ApiError>) -> FetchOutcome {
        if ticket.0 != self.issued {
            return FetchOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                FetchOutcome::Loaded(self.items.len())
            }
            Err(e) => {
                self.items.clear();
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Swap in `item` by id, returning the previous value
    pub fn replace(&mut self, item: T) -> Option<T> {
        let slot = self.items.iter_mut().find(|existing| existing.id() == item.id())?;
        Some(std::mem::replace(slot, item))
    }

    pub fn upsert(&mut self, item: T) {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => *slot = item,
            None => self.items.push(item),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn remove(&mut self, id: Id) -> Option<(Slot, T)> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        let slot = Slot {
            index,
            before: index.checked_sub(1).map(|i| self.items[i].id()),
            after: self.items.get(index + 1).map(Record::id),
        };
        Some((slot, self.items.remove(index)))
    }

    /// Put a removed item back next to its old neighbours.
    ///
    /// Returns false without inserting when the id is already present, e.g.
    /// a refetch brought the row back first.
    pub fn restore(&mut self, slot: Slot, item: T) -> bool {
        if self.get(item.id()).is_some() {
            return false;
        }
        let position_of = |id: Id| self.items.iter().position(|existing| existing.id() == id);
        let index = slot
            .before
            .and_then(position_of)
            .map(|i| i + 1)
            .or_else(|| slot.after.and_then(position_of))
            .unwrap_or(slot.index)
            .min(self.items.len());
        self.items.insert(index, item);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: Id,
        label: &'static str,
    }

    impl Record for Entry {
        fn id(&self) -> Id {
            self.id
        }
    }

    fn entry(id: Id, label: &'static str) -> Entry {
        Entry { id, label }
    }

    #[test]
    fn test_fetch_sets_and_clears_loading() {
        let mut coll = Collection::new();
        let ticket = coll.begin_fetch();
        assert!(coll.loading());

        let outcome = coll.finish_fetch(ticket, Ok(vec![entry(1, "a"), entry(2, "b")]));
        assert_eq!(outcome, FetchOutcome::Loaded(2));
        assert!(!coll.loading());
        assert_eq!(coll.len(), 2);
    }

    #[test]
    fn test_read_failure_degrades_to_empty() {
        let mut coll = Collection::from_items(vec![entry(1, "a")]);
        let ticket = coll.begin_fetch();
        let outcome = coll.finish_fetch(ticket, Err(ApiError::Network("offline".into())));
        assert!(matches!(outcome, FetchOutcome::Failed(ApiError::Network(_))));
        assert!(coll.is_empty());
        assert!(!coll.loading());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut coll = Collection::new();
        let first = coll.begin_fetch();
        let second = coll.begin_fetch();

        assert_eq!(coll.finish_fetch(second, Ok(vec![entry(2, "new")])), FetchOutcome::Loaded(1));
        assert_eq!(coll.finish_fetch(first, Ok(vec![entry(1, "old")])), FetchOutcome::Stale);
        assert_eq!(coll.items(), &[entry(2, "new")]);
    }

    #[test]
    fn test_replace_remove_restore() {
        let mut coll = Collection::from_items(vec![entry(1, "a"), entry(2, "b"), entry(3, "c")]);

        assert_eq!(coll.replace(entry(2, "B")), Some(entry(2, "b")));
        assert_eq!(coll.replace(entry(9, "z")), None);

        let (slot, removed) = coll.remove(2).unwrap();
        assert_eq!(slot, Slot { index: 1, before: Some(1), after: Some(3) });
        assert_eq!(coll.items(), &[entry(1, "a"), entry(3, "c")]);

        assert!(coll.restore(slot, removed));
        assert_eq!(coll.items(), &[entry(1, "a"), entry(2, "B"), entry(3, "c")]);

        coll.upsert(entry(4, "d"));
        coll.upsert(entry(1, "A"));
        assert_eq!(coll.len(), 4);
        assert_eq!(coll.get(1), Some(&entry(1, "A")));
    }

    #[test]
    fn test_restore_follows_neighbours_not_index() {
        let mut coll = Collection::from_items(vec![entry(1, "a"), entry(2, "b"), entry(3, "c")]);
        let (slot, removed) = coll.remove(3).unwrap();
        coll.push(entry(0, "z"));
        coll.items.insert(0, entry(4, "d"));

        assert!(coll.restore(slot, removed));
        let ids: Vec<Id> = coll.items().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 1, 2, 3, 0]);
    }

    #[test]
    fn test_restore_skips_present_id() {
        let mut coll = Collection::from_items(vec![entry(1, "a"), entry(2, "b")]);
        let (slot, removed) = coll.remove(2).unwrap();
        coll.push(entry(2, "fresh"));

        assert!(!coll.restore(slot, removed));
        assert_eq!(coll.items(), &[entry(1, "a"), entry(2, "fresh")]);
    }
}
