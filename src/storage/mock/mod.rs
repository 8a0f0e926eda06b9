//! Mock storage implementation for testing.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::records::{LocationFilter, LocationQuery, LocationRecord, NewLocation};

use super::{LocationStore, Result, StorageError};

/// Stored record with its assigned id.
struct StoredLocation {
    id: i64,
    location: NewLocation,
}

/// Mock location store that keeps records in memory.
///
/// Honors the full store contract (monotonic ids, id-ascending filtered
/// queries) so service tests exercise real semantics.
#[derive(Default)]
pub struct MockLocationStore {
    records: RwLock<Vec<StoredLocation>>,
    next_id: AtomicI64,
    fail_on_append: RwLock<bool>,
    fail_on_query: RwLock<bool>,
}

impl MockLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_append(&self, fail: bool) {
        *self.fail_on_append.write().await = fail;
    }

    pub async fn set_fail_on_query(&self, fail: bool) {
        *self.fail_on_query.write().await = fail;
    }

    /// Number of records appended so far.
    pub async fn stored_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// The most recently appended record, if any.
    pub async fn last_appended(&self) -> Option<NewLocation> {
        self.records
            .read()
            .await
            .last()
            .map(|stored| stored.location.clone())
    }
}

fn matches_filter(timestamp: &str, id: i64, filter: &LocationFilter) -> bool {
    if let Some(ref start) = filter.start {
        if timestamp < start.as_str() {
            return false;
        }
    }
    if let Some(ref end) = filter.end {
        if timestamp > end.as_str() {
            return false;
        }
    }
    if let Some(ref after_ts) = filter.after_ts {
        if timestamp <= after_ts.as_str() {
            return false;
        }
    }
    if let Some(after_id) = filter.after_id {
        if id <= after_id {
            return false;
        }
    }
    true
}

#[async_trait]
impl LocationStore for MockLocationStore {
    async fn append(&self, location: &NewLocation) -> Result<i64> {
        if *self.fail_on_append.read().await {
            return Err(StorageError::Unavailable("mock append failure".to_string()));
        }

        // Id assignment happens under the write lock so vec order always
        // matches id order.
        let mut records = self.records.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        records.push(StoredLocation {
            id,
            location: location.clone(),
        });
        Ok(id)
    }

    async fn query(&self, query: &LocationQuery) -> Result<Vec<LocationRecord>> {
        if *self.fail_on_query.read().await {
            return Err(StorageError::Unavailable("mock query failure".to_string()));
        }

        let records = self.records.read().await;
        let mut matched: Vec<LocationRecord> = records
            .iter()
            .filter(|stored| stored.location.user_id == query.user_id)
            .filter(|stored| matches_filter(&stored.location.timestamp, stored.id, &query.filter))
            .map(|stored| LocationRecord {
                id: stored.id,
                latitude: stored.location.latitude,
                longitude: stored.location.longitude,
                timestamp: stored.location.timestamp.clone(),
            })
            .collect();

        matched.sort_by_key(|r| r.id);

        if let Some(page) = query.page {
            matched = matched
                .into_iter()
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .collect();
        }

        Ok(matched)
    }
}
