//! LocationStore trait definition.

use async_trait::async_trait;

use crate::records::{LocationQuery, LocationRecord, NewLocation};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Interface for location record persistence.
///
/// Records form an append-only log partitioned by `user_id`. The store
/// assigns each record a strictly increasing `id` at append time; ids are
/// never reused or reassigned, which makes `id` the ordering and
/// resumption key for incremental reads. There is no update or delete.
///
/// Implementations:
/// - `SqliteLocationStore`: SQLite storage
/// - `MockLocationStore`: In-memory mock for testing
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Append one record and return its store-assigned id.
    ///
    /// Atomic: concurrent appends never share an id, and a failed append
    /// leaves no partially-visible record behind.
    async fn append(&self, location: &NewLocation) -> Result<i64>;

    /// Retrieve the records matching `query`, ordered by id ascending.
    ///
    /// Returns every record in the client partition that satisfies all
    /// present filter predicates, windowed by pagination when requested.
    /// No duplicates, no omissions relative to what was durably appended
    /// before the query began.
    async fn query(&self, query: &LocationQuery) -> Result<Vec<LocationRecord>>;
}
