//! Storage implementations.

use std::sync::Arc;

use tracing::info;

use crate::config::StorageConfig;

pub mod location_store;
pub mod mock;
pub mod schema;
pub mod sqlite;

pub use location_store::{LocationStore, Result, StorageError};
pub use sqlite::SqliteLocationStore;

/// Initialize storage based on configuration.
///
/// Ensures the data directory exists, connects the pool, and runs schema
/// initialization before handing the store out.
pub async fn init_storage(
    config: &StorageConfig,
) -> std::result::Result<Arc<dyn LocationStore>, Box<dyn std::error::Error>> {
    info!("Storage: sqlite at {}", config.path);

    if let Some(parent) = std::path::Path::new(&config.path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", config.path)).await?;

    let store = Arc::new(SqliteLocationStore::new(pool));
    store.init().await?;

    Ok(store)
}
