//! API Key Authentication
//!
//! Middleware guarding every route with the static `X-API-Key` credential.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::api::AppState;
use crate::error::{ProxyError, Result};

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects requests whose `X-API-Key` header is missing or wrong.
///
/// Runs before body extraction, so unauthenticated requests never reach the
/// store regardless of their payload.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    let reason = match provided {
        Some(key) if credentials_match(key, &state.api_key) => None,
        Some(_) => Some("invalid API key"),
        None => Some("missing API key"),
    };

    match reason {
        None => Ok(next.run(request).await),
        Some(reason) => {
            warn!("Rejected {} {}: {}", request.method(), request.uri(), reason);
            Err(ProxyError::Unauthorized)
        }
    }
}

/// Compares credentials without short-circuiting on the first differing byte.
///
/// Only the contents are compared in constant time: a length mismatch returns
/// early, so response timing can still reveal the secret's length.
/// An empty configured credential matches nothing.
pub fn credentials_match(provided: &str, expected: &str) -> bool {
    let (provided, expected) = (provided.as_bytes(), expected.as_bytes());
    if expected.is_empty() || provided.len() != expected.len() {
        return false;
    }

    provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_credentials() {
        assert!(credentials_match("secret-key", "secret-key"));
    }

    #[test]
    fn test_mismatched_credentials() {
        assert!(!credentials_match("secret-kez", "secret-key"));
        assert!(!credentials_match("secret", "secret-key"));
        assert!(!credentials_match("secret-key-long", "secret-key"));
        assert!(!credentials_match("", "secret-key"));
    }

    #[test]
    fn test_empty_expected_rejects_everything() {
        assert!(!credentials_match("", ""));
        assert!(!credentials_match("anything", ""));
    }
}
