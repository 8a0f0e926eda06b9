//! Location query service.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::records::{LocationFilter, LocationQuery, LocationRecord, Page};
use crate::services::ApiError;
use crate::storage::LocationStore;

/// Ceiling silently applied to client-requested page sizes.
pub const MAX_QUERY_LIMIT: i64 = 5000;

/// Raw query parameters exactly as they arrive on the query string.
///
/// Everything is an optional string; validation turns them into a typed
/// [`LocationQuery`] or rejects the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryParams {
    pub user_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub after_ts: Option<String>,
    pub after_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Location query service.
///
/// Validates raw request parameters before any store access; a rejected
/// request never reaches the store.
pub struct QueryService {
    store: Arc<dyn LocationStore>,
}

impl QueryService {
    /// Create a new query service.
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Self { store }
    }

    /// Validate `params` and execute the resulting query.
    pub async fn handle(&self, params: QueryParams) -> Result<Vec<LocationRecord>, ApiError> {
        let query = validate(params)?;
        debug!(user_id = %query.user_id, "Executing location query");
        Ok(self.store.query(&query).await?)
    }
}

/// Validate raw parameters into a typed query.
///
/// The rejection messages are part of the wire contract. Timestamp
/// filters pass through unvalidated: they are comparison operands, and
/// garbage input yields an empty result rather than an error.
fn validate(params: QueryParams) -> Result<LocationQuery, ApiError> {
    let user_id = params
        .user_id
        .filter(|user_id| !user_id.is_empty())
        .ok_or(ApiError::MissingParameter("user_id"))?;

    let after_id = params
        .after_id
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| ApiError::InvalidParameter("after_id must be an integer".to_string()))
        })
        .transpose()?;

    let limit = params
        .limit
        .map(|raw| match raw.parse::<i64>() {
            Ok(limit) if limit > 0 => Ok(limit.min(MAX_QUERY_LIMIT) as u64),
            _ => Err(ApiError::InvalidParameter(
                "limit must be a positive integer".to_string(),
            )),
        })
        .transpose()?;

    let offset = params
        .offset
        .map(|raw| match raw.parse::<i64>() {
            Ok(offset) if offset >= 0 => Ok(offset as u64),
            _ => Err(ApiError::InvalidParameter(
                "offset must be a non-negative integer".to_string(),
            )),
        })
        .transpose()?;

    let page = match (limit, offset) {
        (Some(limit), offset) => Some(Page {
            limit,
            offset: offset.unwrap_or(0),
        }),
        (None, Some(_)) => {
            return Err(ApiError::InvalidParameter(
                "offset requires limit to be set".to_string(),
            ))
        }
        (None, None) => None,
    };

    Ok(LocationQuery {
        user_id,
        filter: LocationFilter {
            start: params.start,
            end: params.end,
            after_ts: params.after_ts,
            after_id,
        },
        page,
    })
}
