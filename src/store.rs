// 🗄️ Score Store - In-memory receipt points by id
// Process-lifetime only; entries are written once and never updated or removed

use crate::error::StoreError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Shared id → points map
///
/// Each operation takes the lock for its own duration, so a `get` that starts
/// after a `put` has returned always observes it.
#[derive(Debug, Default)]
pub struct ScoreStore {
    scores: RwLock<HashMap<String, i64>>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store points for a freshly minted id. Existing entries are never overwritten.
    pub fn put(&self, id: &str, points: i64) -> Result<(), StoreError> {
        // Values are plain integers, so a poisoned lock still guards a consistent map.
        let mut scores = self.scores.write().unwrap_or_else(PoisonError::into_inner);

        match scores.entry(id.to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateId(id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(points);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: &str) -> Result<i64, StoreError> {
        let scores = self.scores.read().unwrap_or_else(PoisonError::into_inner);

        scores
            .get(id)
            .copied()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.scores.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_put_then_get() {
        let store = ScoreStore::new();
        store.put("abc", 28).unwrap();

        assert_eq!(store.get("abc").unwrap(), 28);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_unknown_id() {
        let store = ScoreStore::new();
        assert!(store.is_empty());
        assert_eq!(
            store.get("missing"),
            Err(StoreError::NotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_existing_entry_is_never_overwritten() {
        let store = ScoreStore::new();
        store.put("abc", 28).unwrap();

        assert_eq!(
            store.put("abc", 109),
            Err(StoreError::DuplicateId("abc".to_string()))
        );
        assert_eq!(store.get("abc").unwrap(), 28);
    }

    #[test]
    fn test_concurrent_puts_for_distinct_ids() {
        let store = ScoreStore::new();

        thread::scope(|s| {
            for worker in 0..8 {
                let store = &store;
                s.spawn(move || {
                    for i in 0..100 {
                        let id = format!("{}-{}", worker, i);
                        store.put(&id, worker * 1000 + i).unwrap();
                        assert_eq!(store.get(&id).unwrap(), worker * 1000 + i);
                    }
                });
            }
        });

        assert_eq!(store.len(), 800);
        assert_eq!(store.get("7-99").unwrap(), 7099);
    }
}
