//! Store Module
//!
//! Access to the backing key-value store. All caching semantics (storage,
//! expiry, concurrency) live in the backend; this module only namespaces keys,
//! encodes JSON and tracks the connection lifecycle.

mod backend;
mod lifecycle;
mod memory;
mod redis_backend;


// Re-export public types
pub use backend::CacheBackend;
pub use lifecycle::{Store, StoreState};
pub use memory::MemoryBackend;
pub use redis_backend::RedisBackend;

// == Public Constants ==
/// Prefix isolating this service's entries from other data in the same database
pub const KEY_PREFIX: &str = "cache:";

/// Returns the store key for a caller-supplied key.
pub fn namespaced_key(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_key() {
        assert_eq!(namespaced_key("user:42"), "cache:user:42");
        assert_eq!(namespaced_key(""), "cache:");
    }
}
