//! Ingest and query endpoint handlers.
//!
//! Thin shells over the services: extraction and response encoding here,
//! all contract logic in `services`.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};

use crate::records::LocationRecord;
use crate::services::{ApiError, QueryParams};

use super::AppState;

/// `POST /add_location` -- append one position payload.
pub async fn add_location(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    state.ingest.handle(&body).await?;
    Ok(Json(json!({ "status": "ok" })))
}

/// `GET /get_locations` -- filtered, ordered, paginated records for one
/// client partition.
pub async fn get_locations(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<LocationRecord>>, ApiError> {
    let records = state.query.handle(params).await?;
    Ok(Json(records))
}
