//! In-process Backend
//!
//! A HashMap-backed store with the same TTL semantics as Redis. It backs the
//! HTTP test suite and supports fault injection so store errors can be
//! exercised without a server.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CacheBackend;
use crate::error::{ProxyError, Result};

// == Memory Entry ==
/// A stored value with its optional expiry.
#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    expires_at: Option<u64>,
}

impl MemoryEntry {
    fn new(value: String, ttl_seconds: Option<u64>) -> Self {
        // Saturates so absurdly long TTLs behave as "far future" instead of overflowing
        let expires_at =
            ttl_seconds.map(|ttl| current_timestamp_ms().saturating_add(ttl.saturating_mul(1000)));
        Self { value, expires_at }
    }

    /// An entry is expired once the current time reaches its expiration time.
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }
}

// == Memory Backend ==
/// In-process [`CacheBackend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, MemoryEntry>>,
    /// When set, every operation fails with this message
    failure: RwLock<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw text under an already-namespaced key, bypassing JSON encoding.
    pub async fn insert_raw(&self, key: impl Into<String>, text: impl Into<String>) {
        self.entries
            .write()
            .await
            .insert(key.into(), MemoryEntry::new(text.into(), None));
    }

    /// Makes every following operation fail as a communication error.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().await = Some(message.into());
    }

    /// Clears an injected failure.
    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn check_failure(&self) -> Result<()> {
        match self.failure.read().await.as_ref() {
            Some(message) => Err(ProxyError::Store(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_failure().await?;

        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> Result<()> {
        self.check_failure().await?;

        self.entries
            .write()
            .await
            .insert(key.to_string(), MemoryEntry::new(value.to_string(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.check_failure().await?;

        let removed = self.entries.write().await.remove(key);
        Ok(matches!(removed, Some(entry) if !entry.is_expired()))
    }

    async fn ping(&self) -> Result<()> {
        self.check_failure().await
    }
}

/// Returns current Unix timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
