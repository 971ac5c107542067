//! Backend trait implemented by every store the proxy can talk to.

use async_trait::async_trait;

use crate::error::Result;

/// Raw text operations against a key-value store.
///
/// Keys passed here are already namespaced. Implementations must be safe to
/// share between concurrent requests; the proxy adds no locking around them.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the stored text, or None when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value`, expiring after `ttl` seconds when given.
    async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> Result<()>;

    /// Removes `key`, reporting whether it existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Liveness probe.
    async fn ping(&self) -> Result<()>;
}
