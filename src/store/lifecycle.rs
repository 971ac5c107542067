//! Store Lifecycle
//!
//! Owns the process-wide store connection and its explicit state.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use tracing::{error, info};

use super::{namespaced_key, CacheBackend, RedisBackend};
use crate::config::Config;
use crate::error::{ProxyError, Result};

// == Store State ==
/// Connection state. Transitions only go forward:
/// Uninitialized -> Connected -> Closed, or Uninitialized -> Closed.
#[derive(Clone)]
pub enum StoreState {
    /// Startup connection attempt failed or never happened
    Uninitialized,
    /// Live backend shared by all requests
    Connected(Arc<dyn CacheBackend>),
    /// Released at shutdown
    Closed,
}

impl StoreState {
    pub fn name(&self) -> &'static str {
        match self {
            StoreState::Uninitialized => "uninitialized",
            StoreState::Connected(_) => "connected",
            StoreState::Closed => "closed",
        }
    }
}

impl fmt::Debug for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// == Store ==
/// Lifecycle-managed handle to the backing store.
///
/// The state lock is held only long enough to clone the backend handle;
/// store commands run outside it.
#[derive(Debug)]
pub struct Store {
    state: RwLock<StoreState>,
}

impl Store {
    /// Connects to Redis as described by `config`.
    ///
    /// Best-effort: a failed attempt is logged and leaves the store
    /// `Uninitialized` so the service can still report itself unhealthy.
    pub async fn connect(config: &Config) -> Self {
        info!(
            "Connecting to Redis: {}:{} (DB: {})",
            config.redis_host, config.redis_port, config.redis_db
        );

        match RedisBackend::connect(config).await {
            Ok(backend) => {
                info!("Redis connected");
                Self::connected(Arc::new(backend))
            }
            Err(err) => {
                error!("Failed to connect to Redis: {}", err);
                Self::uninitialized()
            }
        }
    }

    /// Creates a store over an already connected backend.
    pub fn connected(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            state: RwLock::new(StoreState::Connected(backend)),
        }
    }

    /// Creates a store that never connected.
    pub fn uninitialized() -> Self {
        Self {
            state: RwLock::new(StoreState::Uninitialized),
        }
    }

    pub fn state(&self) -> StoreState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state_name(&self) -> &'static str {
        self.state().name()
    }

    /// Releases the connection. Calling it again is a no-op.
    pub fn close(&self) {
        let previous = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *state, StoreState::Closed)
        };

        match previous {
            StoreState::Connected(_) => info!("Closing Redis connection"),
            StoreState::Uninitialized => info!("Store was never connected, nothing to close"),
            StoreState::Closed => {}
        }
    }

    fn backend(&self) -> Result<Arc<dyn CacheBackend>> {
        match self.state() {
            StoreState::Connected(backend) => Ok(backend),
            StoreState::Uninitialized | StoreState::Closed => Err(ProxyError::StoreUnavailable),
        }
    }

    // == Get ==
    /// Looks up `key` and decodes the stored JSON.
    ///
    /// Returns `Ok(None)` when absent; undecodable text is a
    /// [`ProxyError::Serialization`].
    pub async fn get_json(&self, key: &str) -> Result<Option<Value>> {
        let backend = self.backend()?;

        match backend.get(&namespaced_key(key)).await? {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|err| ProxyError::Serialization(err.to_string())),
            None => Ok(None),
        }
    }

    // == Set ==
    /// Stores `value` under `key`.
    ///
    /// Only a strictly positive `ttl` sets an expiry; the effective TTL is
    /// returned, None meaning the entry persists until deleted.
    pub async fn set_json(&self, key: &str, value: &Value, ttl: Option<i64>) -> Result<Option<u64>> {
        let backend = self.backend()?;

        let serialized =
            serde_json::to_string(value).map_err(|err| ProxyError::Serialization(err.to_string()))?;
        let effective_ttl = ttl.and_then(|t| u64::try_from(t).ok()).filter(|t| *t > 0);

        backend
            .set(&namespaced_key(key), &serialized, effective_ttl)
            .await?;

        Ok(effective_ttl)
    }

    // == Delete ==
    /// Removes `key`, reporting whether it was present.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let backend = self.backend()?;
        backend.delete(&namespaced_key(key)).await
    }

    /// Probes the backend on demand.
    pub async fn ping(&self) -> Result<()> {
        let backend = self.backend()?;
        backend.ping().await
    }
}
