//! HTTP handlers for the location API.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::services::{ApiError, IngestService, QueryService};

mod health;
mod locations;

pub use health::health;
pub use locations::{add_location, get_locations};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub ingest: Arc<IngestService>,
    pub query: Arc<QueryService>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        let body = match &self {
            ApiError::StorageUnavailable(source) => json!({
                "error": self.to_string(),
                "details": source.to_string(),
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_input_maps_to_400() {
        let response = ApiError::MalformedInput.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body, json!({ "error": "no data" }));
    }

    #[tokio::test]
    async fn test_missing_parameter_maps_to_400() {
        let response = ApiError::MissingParameter("user_id").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body, json!({ "error": "user_id required" }));
    }

    #[tokio::test]
    async fn test_invalid_parameter_maps_to_400() {
        let response = ApiError::InvalidParameter("limit must be a positive integer".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body, json!({ "error": "limit must be a positive integer" }));
    }

    #[tokio::test]
    async fn test_storage_failure_maps_to_500_with_details() {
        let error = ApiError::StorageUnavailable(StorageError::Unavailable("down".to_string()));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response_json(response).await;
        assert_eq!(body["error"], "database error");
        assert_eq!(body["details"], "Storage unavailable: down");
    }
}
