//! In-memory query cache for tests and ephemeral runs

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{canonical_query, CacheEntry, DomainError, ExpansionResult, QueryCache};

/// Stored entry plus an insertion sequence to break timestamp ties when
/// pruning and listing
#[derive(Debug, Clone)]
struct Slot {
    entry: CacheEntry,
    seq: u64,
}

#[derive(Debug)]
pub struct InMemoryQueryCache {
    entries: Mutex<HashMap<String, Slot>>,
    next_seq: Mutex<u64>,
    max_entries: usize,
}

impl InMemoryQueryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            next_seq: Mutex::new(0),
            max_entries,
        }
    }

    fn bump_seq(&self) -> u64 {
        let mut seq = self.next_seq.lock().unwrap();
        *seq += 1;
        *seq
    }

    fn prune(entries: &mut HashMap<String, Slot>, max_entries: usize) {
        while entries.len() > max_entries {
            let oldest = entries
                .values()
                .min_by_key(|s| (s.entry.timestamp, s.seq))
                .map(|s| s.entry.query.clone());

            match oldest {
                Some(key) => {
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl Default for InMemoryQueryCache {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl QueryCache for InMemoryQueryCache {
    async fn get(&self, query: &str) -> Result<Option<ExpansionResult>, DomainError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&canonical_query(query))
            .map(|s| s.entry.data.clone()))
    }

    async fn put(&self, query: &str, data: ExpansionResult) -> Result<(), DomainError> {
        let key = canonical_query(query);
        let slot = Slot {
            entry: CacheEntry::new(key.clone(), data),
            seq: self.bump_seq(),
        };

        let mut entries = self.entries.lock().unwrap();
        entries.insert(key, slot);
        Self::prune(&mut entries, self.max_entries);

        Ok(())
    }

    async fn list(&self) -> Result<Vec<CacheEntry>, DomainError> {
        let entries = self.entries.lock().unwrap();
        let mut slots: Vec<&Slot> = entries.values().collect();
        slots.sort_by_key(|s| (s.entry.timestamp, s.seq));
        Ok(slots.into_iter().map(|s| s.entry.clone()).collect())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}
