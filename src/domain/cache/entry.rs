use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::topic::ExpansionResult;

/// One cached expansion, keyed by the canonical query string.
///
/// The timestamp is epoch milliseconds at write time; re-putting the same key
/// replaces the entry and refreshes it (last-write-wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub query: String,
    pub data: ExpansionResult,
    pub timestamp: i64,
}

impl CacheEntry {
    /// Build an entry stamped with the current time
    pub fn new(query: impl Into<String>, data: ExpansionResult) -> Self {
        Self {
            query: query.into(),
            data,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }
}
