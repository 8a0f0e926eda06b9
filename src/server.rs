//! HTTP server assembly and lifecycle.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::handlers::{add_location, get_locations, health, AppState};
use crate::services::{IngestService, QueryService};
use crate::storage::LocationStore;

/// Assemble the application router.
///
/// Routes:
/// - `POST /add_location` -- ingest one position payload
/// - `GET /get_locations` -- query one client partition
/// - `GET /health` -- liveness check
pub fn build_router(store: Arc<dyn LocationStore>, config: &ServerConfig) -> Router {
    let state = AppState {
        ingest: Arc::new(IngestService::new(store.clone())),
        query: Arc::new(QueryService::new(store)),
    };

    Router::new()
        .route("/add_location", post(add_location))
        .route("/get_locations", get(get_locations))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.cors_origins))
        .with_state(state)
}

/// Builds the CORS layer from the configured list of allowed origins.
///
/// A wildcard `"*"` in the origins list allows any origin. Otherwise,
/// each origin string is parsed and added to an explicit allowlist.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Serve the router on an already-bound listener until ctrl-c.
pub async fn serve(
    listener: TcpListener,
    router: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            // Without a handler installed there is no graceful shutdown.
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::mock::MockLocationStore;

    fn test_router() -> Router {
        let store = Arc::new(MockLocationStore::new());
        build_router(store, &ServerConfig::default())
    }

    #[tokio::test]
    async fn test_router_serves_health() {
        use axum::body::Body;
        use http::Request;
        use tower::ServiceExt;

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let resp = test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_router_round_trips_a_record() {
        use axum::body::Body;
        use http::Request;
        use tower::ServiceExt;

        let router = test_router();

        let req = Request::builder()
            .method("POST")
            .uri("/add_location")
            .body(Body::from(
                r#"{"user_id":"alice","lat":1.0,"lng":2.0,"timestamp":"2024-01-01T10:00:00"}"#,
            ))
            .unwrap();
        let resp = router.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), http::StatusCode::OK);

        let req = Request::builder()
            .uri("/get_locations?user_id=alice")
            .body(Body::empty())
            .unwrap();
        let resp = router.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), http::StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["lat"], 1.0);
        assert_eq!(json[0]["lng"], 2.0);
    }

    #[tokio::test]
    async fn test_router_rejects_query_without_user_id() {
        use axum::body::Body;
        use http::Request;
        use tower::ServiceExt;

        let req = Request::builder()
            .uri("/get_locations")
            .body(Body::empty())
            .unwrap();

        let resp = test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_build_cors_layer_wildcard() {
        let origins = vec!["*".to_string()];
        let _cors = build_cors_layer(&origins);
    }

    #[test]
    fn test_build_cors_layer_specific_origins() {
        let origins = vec![
            "http://localhost:3000".to_string(),
            "https://example.com".to_string(),
        ];
        let _cors = build_cors_layer(&origins);
    }
}
