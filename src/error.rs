//! Error types for the cache proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Proxy Error Enum ==
/// Unified error type for the cache proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Missing or mismatched API key
    #[error("Invalid or missing API key")]
    Unauthorized,

    /// The store connection was never established or has been closed
    #[error("Redis not connected")]
    StoreUnavailable,

    /// Network or protocol fault while talking to the store
    #[error("Error accessing Redis: {0}")]
    Store(String),

    /// Stored text could not be decoded as JSON
    #[error("Error decoding cached value: {0}")]
    Serialization(String),
}

impl ProxyError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Unauthorized => StatusCode::UNAUTHORIZED,
            ProxyError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::Store(_) | ProxyError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<redis::RedisError> for ProxyError {
    fn from(err: redis::RedisError) -> Self {
        ProxyError::Store(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.to_string()));
        (self.status(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
