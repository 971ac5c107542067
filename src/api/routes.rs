//! API Routes
//!
//! Configures the Axum router with all cache proxy endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, get_handler, health_handler, not_found_handler, root_handler, set_handler,
    AppState,
};
use crate::auth::require_api_key;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - API key check on every route, including unknown paths
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/cache/get", post(get_handler))
        .route("/cache/set", post(set_handler))
        .route("/cache/delete", post(delete_handler))
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBackend, Store};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    const KEY: &str = "test-key";

    fn create_test_app() -> Router {
        let store = Store::connected(Arc::new(MemoryBackend::new()));
        create_router(AppState::new(Arc::new(store), KEY))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-api-key", KEY)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("x-api-key", KEY)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/cache/set")
                    .header("x-api-key", KEY)
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"key":"test","value":{"a":1}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_key_is_unauthorized() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/cache/get")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"key":"test"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_path_requires_key() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_get_is_post_only() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/cache/get")
                    .header("x-api-key", KEY)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
