//! SQLite-backed query cache
//!
//! One row per canonical query; the store lives in a single file on the
//! user's device and survives restarts. Initialization is idempotent: only
//! missing structures are created, existing rows are left alone.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::domain::{canonical_query, CacheEntry, DomainError, ExpansionResult, QueryCache};

#[derive(Debug)]
pub struct SqliteQueryCache {
    pool: SqlitePool,
    max_entries: usize,
}

impl SqliteQueryCache {
    /// Opens (creating if needed) the cache database at the given path
    pub async fn open(path: impl AsRef<Path>, max_entries: usize) -> Result<Self, DomainError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DomainError::storage(format!("Failed to create cache directory: {}", e))
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        Self::connect(options, max_entries).await
    }

    /// Opens an in-memory database (tests, ephemeral runs)
    pub async fn in_memory(max_entries: usize) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DomainError::storage(format!("Invalid SQLite options: {}", e)))?;

        Self::connect(options, max_entries).await
    }

    async fn connect(
        options: SqliteConnectOptions,
        max_entries: usize,
    ) -> Result<Self, DomainError> {
        // Single connection: the cache is per-device and a second connection
        // to an in-memory database would see a different store
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to open cache database: {}", e)))?;

        let cache = Self { pool, max_entries };
        cache.ensure_table().await?;

        Ok(cache)
    }

    async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS query_cache (
                query TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create cache table: {}", e)))?;

        Ok(())
    }

    async fn prune(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            DELETE FROM query_cache
            WHERE query NOT IN (
                SELECT query FROM query_cache
                ORDER BY timestamp DESC, rowid DESC
                LIMIT ?
            )
            "#,
        )
        .bind(self.max_entries as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to prune cache: {}", e)))?;

        Ok(())
    }

    fn decode_entry(row: &sqlx::sqlite::SqliteRow) -> Result<CacheEntry, DomainError> {
        let query: String = row.get("query");
        let raw: String = row.get("data");
        let timestamp: i64 = row.get("timestamp");

        let data: ExpansionResult = serde_json::from_str(&raw).map_err(|e| {
            DomainError::storage(format!("Failed to deserialize cache entry: {}", e))
        })?;

        Ok(CacheEntry {
            query,
            data,
            timestamp,
        })
    }
}

#[async_trait]
impl QueryCache for SqliteQueryCache {
    async fn get(&self, query: &str) -> Result<Option<ExpansionResult>, DomainError> {
        let row = sqlx::query("SELECT data FROM query_cache WHERE query = ?")
            .bind(canonical_query(query))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to read cache entry: {}", e)))?;

        match row {
            Some(row) => {
                let raw: String = row.get("data");
                let data: ExpansionResult = serde_json::from_str(&raw).map_err(|e| {
                    DomainError::storage(format!("Failed to deserialize cache entry: {}", e))
                })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, query: &str, data: ExpansionResult) -> Result<(), DomainError> {
        let entry = CacheEntry::new(canonical_query(query), data);
        let raw = serde_json::to_string(&entry.data).map_err(|e| {
            DomainError::storage(format!("Failed to serialize cache entry: {}", e))
        })?;

        sqlx::query(
            r#"
            INSERT INTO query_cache (query, data, timestamp)
            VALUES (?, ?, ?)
            ON CONFLICT(query) DO UPDATE
            SET data = excluded.data, timestamp = excluded.timestamp
            "#,
        )
        .bind(&entry.query)
        .bind(&raw)
        .bind(entry.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to write cache entry: {}", e)))?;

        self.prune().await
    }

    async fn list(&self) -> Result<Vec<CacheEntry>, DomainError> {
        let rows =
            sqlx::query("SELECT query, data, timestamp FROM query_cache ORDER BY timestamp, rowid")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to list cache: {}", e)))?;

        rows.iter().map(Self::decode_entry).collect()
    }

    async fn clear(&self) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM query_cache")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to clear cache: {}", e)))?;

        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM query_cache")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count cache: {}", e)))?;

        let count: i64 = row.get("count");
        Ok(count as usize)
    }
}
