//! API Handlers
//!
//! HTTP request handlers for each cache proxy endpoint.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{ProxyError, Result};
use crate::models::{
    DeleteRequest, DeleteResponse, ErrorResponse, GetRequest, GetResponse, HealthResponse,
    InfoResponse, SetRequest, SetResponse,
};
use crate::store::Store;

/// Application state shared across all handlers.
///
/// The store is shared as-is; its backend handles concurrent use.
#[derive(Clone)]
pub struct AppState {
    /// Lifecycle-managed store connection
    pub store: Arc<Store>,
    /// Credential expected in the `X-API-Key` header
    pub api_key: Arc<str>,
}

impl AppState {
    /// Creates a new AppState over the given store.
    pub fn new(store: Arc<Store>, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            api_key: api_key.into(),
        }
    }
}

/// Logs a failed store operation at the request boundary.
fn log_failure(operation: &str, key: &str, err: &ProxyError) {
    match err {
        ProxyError::StoreUnavailable => warn!("{} '{}' skipped: {}", operation, key, err),
        _ => error!("{} '{}' failed: {}", operation, key, err),
    }
}

/// Handler for GET /
///
/// Static service metadata; never touches the store.
pub async fn root_handler() -> Json<InfoResponse> {
    Json(InfoResponse::running())
}

/// Handler for GET /health
///
/// Probes the store on demand and answers 503 when it is unreachable or was
/// never connected.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(err) => {
            warn!("Health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::unhealthy(err.to_string())),
            )
        }
    }
}

/// Handler for POST /cache/get
pub async fn get_handler(
    State(state): State<AppState>,
    Json(req): Json<GetRequest>,
) -> Result<Json<GetResponse>> {
    let value = state
        .store
        .get_json(&req.key)
        .await
        .inspect_err(|err| log_failure("GET", &req.key, err))?;

    debug!("GET '{}' found={}", req.key, value.is_some());
    Ok(Json(GetResponse::new(value)))
}

/// Handler for POST /cache/set
///
/// Stores the document; a strictly positive `ttl` sets an expiry.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    let value = Value::Object(req.value);
    let ttl = state
        .store
        .set_json(&req.key, &value, req.ttl)
        .await
        .inspect_err(|err| log_failure("SET", &req.key, err))?;

    debug!("SET '{}' ttl={:?}", req.key, ttl);
    Ok(Json(SetResponse::new(req.key, ttl)))
}

/// Handler for POST /cache/delete
///
/// Deleting an absent key succeeds with `deleted: false`.
pub async fn delete_handler(
    State(state): State<AppState>,
    Json(req): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state
        .store
        .delete(&req.key)
        .await
        .inspect_err(|err| log_failure("DELETE", &req.key, err))?;

    debug!("DELETE '{}' deleted={}", req.key, deleted);
    Ok(Json(DeleteResponse::new(deleted)))
}

/// Fallback for unknown paths.
pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not Found")))
}
