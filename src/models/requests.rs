//! Request DTOs for the cache proxy API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Request body for POST /cache/get
#[derive(Debug, Clone, Deserialize)]
pub struct GetRequest {
    /// The caller-supplied key, without namespace prefix
    pub key: String,
}

/// Request body for POST /cache/set
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: JSON object to store
/// - `ttl`: Optional TTL in seconds; absent, zero or negative means no expiry
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The document to store
    pub value: Map<String, Value>,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<i64>,
}

/// Request body for POST /cache/delete
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    /// The cache key
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "user:42", "value": {"name": "Ana"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "user:42");
        assert_eq!(req.value["name"], "Ana");
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"key": "test", "value": {}, "ttl": 60}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl, Some(60));
    }

    #[test]
    fn test_set_request_null_ttl() {
        let json = r#"{"key": "test", "value": {}, "ttl": null}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_rejects_non_object_value() {
        let json = r#"{"key": "test", "value": "plain string"}"#;
        assert!(serde_json::from_str::<SetRequest>(json).is_err());
    }

    #[test]
    fn test_get_request_requires_key() {
        assert!(serde_json::from_str::<GetRequest>("{}").is_err());
    }
}
