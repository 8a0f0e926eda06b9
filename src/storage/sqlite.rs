//! SQLite implementation of the location store.

use async_trait::async_trait;
use sea_query::{Expr, Order, Query, SqliteQueryBuilder};
use sqlx::{Row, SqlitePool};

use crate::records::{LocationQuery, LocationRecord, NewLocation};

use super::location_store::{LocationStore, Result};
use super::schema::{Locations, CREATE_LOCATIONS_TABLE};

/// SQLite implementation of LocationStore.
///
/// Id assignment rides on the table's INTEGER PRIMARY KEY AUTOINCREMENT:
/// each insert gets the next rowid atomically, so concurrent appends
/// never collide.
pub struct SqliteLocationStore {
    pool: SqlitePool,
}

impl SqliteLocationStore {
    /// Create a new SQLite location store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_LOCATIONS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl LocationStore for SqliteLocationStore {
    async fn append(&self, location: &NewLocation) -> Result<i64> {
        let query = Query::insert()
            .into_table(Locations::Table)
            .columns([
                Locations::UserId,
                Locations::Latitude,
                Locations::Longitude,
                Locations::Timestamp,
            ])
            .values_panic([
                location.user_id.as_str().into(),
                location.latitude.into(),
                location.longitude.into(),
                location.timestamp.as_str().into(),
            ])
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;

        Ok(result.last_insert_rowid())
    }

    async fn query(&self, query: &LocationQuery) -> Result<Vec<LocationRecord>> {
        // SelectStatement is not Send; render the SQL before the first await.
        let sql = {
            let mut select = Query::select();
            select
                .columns([
                    Locations::Id,
                    Locations::Latitude,
                    Locations::Longitude,
                    Locations::Timestamp,
                ])
                .from(Locations::Table)
                .and_where(Expr::col(Locations::UserId).eq(query.user_id.as_str()))
                .order_by(Locations::Id, Order::Asc);

            if let Some(ref start) = query.filter.start {
                select.and_where(Expr::col(Locations::Timestamp).gte(start.as_str()));
            }
            if let Some(ref end) = query.filter.end {
                select.and_where(Expr::col(Locations::Timestamp).lte(end.as_str()));
            }
            if let Some(ref after_ts) = query.filter.after_ts {
                select.and_where(Expr::col(Locations::Timestamp).gt(after_ts.as_str()));
            }
            if let Some(after_id) = query.filter.after_id {
                select.and_where(Expr::col(Locations::Id).gt(after_id));
            }
            if let Some(page) = query.page {
                select.limit(page.limit).offset(page.offset);
            }

            select.to_string(SqliteQueryBuilder)
        };

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(LocationRecord {
                id: row.get("id"),
                latitude: row.get("latitude"),
                longitude: row.get("longitude"),
                timestamp: row.get("timestamp"),
            });
        }

        Ok(records)
    }
}
