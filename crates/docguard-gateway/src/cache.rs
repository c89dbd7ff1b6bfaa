//! Record cache
//!
//! Unbounded map from record id to a copy of a previously authorized record.
//! A cache hit only saves the store round-trip; the gateway re-checks
//! clearance on every hit.
//!
//! ## Invalidation
//!
//! Each id carries an invalidation generation. A reader that misses takes a
//! [`CacheTicket`] before going to the store and may only insert while the
//! generation is unchanged. [`RecordCache::invalidate`] bumps the generation,
//! so a fetch that started before an edit can never re-insert pre-edit
//! content after the edit's eviction.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use docguard_core::domain::{Record, RecordId};

/// Snapshot of an id's invalidation generation, taken on a cache miss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTicket(u64);

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<RecordId, Record>,
    generations: HashMap<RecordId, u64>,
}

impl CacheState {
    fn generation(&self, id: &RecordId) -> u64 {
        self.generations.get(id).copied().unwrap_or(0)
    }
}

/// Generation-checked record cache
#[derive(Debug, Default)]
pub struct RecordCache {
    state: Mutex<CacheState>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // Every critical section leaves the maps consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the cached record, if present
    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.lock().entries.get(id).cloned()
    }

    /// Takes a ticket for a later [`RecordCache::insert_if_current`]
    pub fn ticket(&self, id: &RecordId) -> CacheTicket {
        CacheTicket(self.lock().generation(id))
    }

    /// Inserts `record` unless its id was invalidated since `ticket` was taken
    ///
    /// Returns `true` if the record was stored.
    pub fn insert_if_current(&self, record: Record, ticket: CacheTicket) -> bool {
        let mut state = self.lock();
        if state.generation(record.id()) != ticket.0 {
            return false;
        }
        state.entries.insert(record.id().clone(), record);
        true
    }

    /// Evicts `id` and bumps its generation
    ///
    /// Returns `true` if an entry was present.
    pub fn invalidate(&self, id: &RecordId) -> bool {
        let mut state = self.lock();
        *state.generations.entry(id.clone()).or_insert(0) += 1;
        state.entries.remove(id).is_some()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.lock().entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Cached ids, sorted
    pub fn ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self.lock().entries.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use docguard_core::domain::ClearanceLevel;

    use super::*;

    fn record(id: &str, content: &str) -> Record {
        Record::new(
            RecordId::new(id).unwrap(),
            "Title",
            content,
            ClearanceLevel::Internal,
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let cache = RecordCache::new();
        let r = record("R1", "body");
        let ticket = cache.ticket(r.id());

        assert!(cache.insert_if_current(r.clone(), ticket));
        assert_eq!(cache.get(r.id()), Some(r.clone()));
        assert!(cache.contains(r.id()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_returns_copy() {
        let cache = RecordCache::new();
        let r = record("R1", "body");
        cache.insert_if_current(r.clone(), cache.ticket(r.id()));

        let mut copy = cache.get(r.id()).unwrap();
        copy.update_content("mutated");
        assert_eq!(cache.get(r.id()).unwrap().content(), "body");
    }

    #[test]
    fn test_invalidate_removes_entry() {
        let cache = RecordCache::new();
        let r = record("R1", "body");
        cache.insert_if_current(r.clone(), cache.ticket(r.id()));

        assert!(cache.invalidate(r.id()));
        assert!(!cache.contains(r.id()));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_absent_id() {
        let cache = RecordCache::new();
        let id = RecordId::new("R404").unwrap();
        assert!(!cache.invalidate(&id));
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let cache = RecordCache::new();
        let stale = record("R1", "before edit");
        let ticket = cache.ticket(stale.id());

        cache.invalidate(stale.id());

        assert!(!cache.insert_if_current(stale.clone(), ticket));
        assert!(!cache.contains(stale.id()));
    }

    #[test]
    fn test_fresh_ticket_after_invalidate_accepted() {
        let cache = RecordCache::new();
        let r = record("R1", "v1");
        cache.invalidate(r.id());

        let ticket = cache.ticket(r.id());
        assert!(cache.insert_if_current(r.clone(), ticket));
    }

    #[test]
    fn test_invalidation_is_per_id() {
        let cache = RecordCache::new();
        let a = record("A", "a");
        let b = record("B", "b");
        let ticket_b = cache.ticket(b.id());

        cache.invalidate(a.id());

        assert!(cache.insert_if_current(b, ticket_b));
        assert_eq!(cache.ids(), vec![RecordId::new("B").unwrap()]);
    }
}
