//! Query cache store implementations

mod in_memory;
mod sqlite;

pub use in_memory::InMemoryQueryCache;
pub use sqlite::SqliteQueryCache;
