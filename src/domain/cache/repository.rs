//! Query cache trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use super::CacheEntry;
use crate::domain::topic::ExpansionResult;
use crate::domain::DomainError;

/// Durable key-value store mapping canonical query strings to expansion
/// results.
///
/// Implementations canonicalize keys via [`super::canonical_query`] so get
/// and put agree on addressing. Same-key writes are last-write-wins; there
/// are no cross-key guarantees. The store survives process restarts and is
/// scoped to one device.
#[async_trait]
pub trait QueryCache: Send + Sync + Debug {
    /// Looks up a previously stored expansion for the query
    async fn get(&self, query: &str) -> Result<Option<ExpansionResult>, DomainError>;

    /// Stores an expansion for the query, replacing any existing entry
    async fn put(&self, query: &str, data: ExpansionResult) -> Result<(), DomainError>;

    /// Returns all entries, oldest write first
    async fn list(&self) -> Result<Vec<CacheEntry>, DomainError>;

    /// Empties the store entirely
    async fn clear(&self) -> Result<(), DomainError>;

    /// Returns the number of entries
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::domain::cache::canonical_query;

    /// Mock cache for testing
    #[derive(Debug)]
    pub struct MockQueryCache {
        entries: Mutex<HashMap<String, CacheEntry>>,
        error: Mutex<Option<String>>,
    }

    impl MockQueryCache {
        pub fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
                error: Mutex::new(None),
            }
        }

        pub fn with_entry(self, query: &str, data: ExpansionResult) -> Self {
            let key = canonical_query(query);
            self.entries
                .lock()
                .unwrap()
                .insert(key.clone(), CacheEntry::new(key, data));
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::cache(error));
            }
            Ok(())
        }
    }

    impl Default for MockQueryCache {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl QueryCache for MockQueryCache {
        async fn get(&self, query: &str) -> Result<Option<ExpansionResult>, DomainError> {
            self.check_error()?;
            Ok(self
                .entries
                .lock()
                .unwrap()
                .get(&canonical_query(query))
                .map(|e| e.data.clone()))
        }

        async fn put(&self, query: &str, data: ExpansionResult) -> Result<(), DomainError> {
            self.check_error()?;
            let key = canonical_query(query);
            self.entries
                .lock()
                .unwrap()
                .insert(key.clone(), CacheEntry::new(key, data));
            Ok(())
        }

        async fn list(&self) -> Result<Vec<CacheEntry>, DomainError> {
            self.check_error()?;
            let mut entries: Vec<CacheEntry> =
                self.entries.lock().unwrap().values().cloned().collect();
            entries.sort_by_key(|e| e.timestamp);
            Ok(entries)
        }

        async fn clear(&self) -> Result<(), DomainError> {
            self.check_error()?;
            self.entries.lock().unwrap().clear();
            Ok(())
        }
    }
}
