//! Response DTOs for the cache proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

/// Response body for POST /cache/get
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// Whether the key was present
    pub found: bool,
    /// The stored document, null when absent
    pub value: Option<Value>,
}

impl GetResponse {
    /// Creates a GetResponse from an optional stored value
    pub fn new(value: Option<Value>) -> Self {
        Self {
            found: value.is_some(),
            value,
        }
    }
}

/// Response body for POST /cache/set
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub success: bool,
    /// The key that was set, without namespace prefix
    pub key: String,
    /// Effective TTL in seconds, null when the entry never expires
    pub ttl: Option<u64>,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>, ttl: Option<u64>) -> Self {
        Self {
            success: true,
            key: key.into(),
            ttl,
        }
    }
}

/// Response body for POST /cache/delete
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    /// Whether a key was actually removed
    pub deleted: bool,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(deleted: bool) -> Self {
        Self {
            success: true,
            deleted,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Store connection status, present when healthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<String>,
    /// Failure description, present when unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a healthy HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            redis: Some("connected".to_string()),
            message: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates an unhealthy HealthResponse describing the failure
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            redis: None,
            message: Some(message.into()),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Response body for the root endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub service: String,
    pub version: String,
    pub status: String,
}

impl InfoResponse {
    /// Static service metadata
    pub fn running() -> Self {
        Self {
            service: "Redis Cache Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "running".to_string(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description of the failure
    pub detail: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_found() {
        let resp = GetResponse::new(Some(json!({"name": "Ana"})));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, json!({"found": true, "value": {"name": "Ana"}}));
    }

    #[test]
    fn test_get_response_missing_serializes_null() {
        let json = serde_json::to_value(GetResponse::new(None)).unwrap();
        assert_eq!(json, json!({"found": false, "value": null}));
    }

    #[test]
    fn test_set_response_serialize() {
        let json = serde_json::to_value(SetResponse::new("user:42", Some(60))).unwrap();
        assert_eq!(json, json!({"success": true, "key": "user:42", "ttl": 60}));

        let json = serde_json::to_value(SetResponse::new("k", None)).unwrap();
        assert!(json["ttl"].is_null());
    }

    #[test]
    fn test_delete_response_serialize() {
        let json = serde_json::to_value(DeleteResponse::new(false)).unwrap();
        assert_eq!(json, json!({"success": true, "deleted": false}));
    }

    #[test]
    fn test_health_response_variants() {
        let json = serde_json::to_value(HealthResponse::healthy()).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["redis"], "connected");
        assert!(json.get("message").is_none());
        assert!(json.get("timestamp").is_some());

        let json = serde_json::to_value(HealthResponse::unhealthy("Redis not connected")).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["message"], "Redis not connected");
        assert!(json.get("redis").is_none());
    }

    #[test]
    fn test_info_response() {
        let resp = InfoResponse::running();
        assert_eq!(resp.service, "Redis Cache Service");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(resp.status, "running");
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Something went wrong")).unwrap();
        assert!(json.contains("detail"));
        assert!(json.contains("Something went wrong"));
    }
}
