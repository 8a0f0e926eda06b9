//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.

use sea_query::Iden;

/// Locations table schema.
#[derive(Iden)]
pub enum Locations {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "user_id"]
    UserId,
    #[iden = "latitude"]
    Latitude,
    #[iden = "longitude"]
    Longitude,
    #[iden = "timestamp"]
    Timestamp,
}

/// SQL for creating the locations table.
///
/// AUTOINCREMENT guarantees ids are strictly increasing and never reused,
/// even across deletes or rolled-back inserts. The secondary indexes back
/// incremental polling (user_id, id) and time-range queries
/// (user_id, timestamp).
pub const CREATE_LOCATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    latitude REAL,
    longitude REAL,
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_locations_user_id ON locations(user_id, id);

CREATE INDEX IF NOT EXISTS idx_locations_user_ts ON locations(user_id, timestamp);
"#;
