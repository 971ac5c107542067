//! Redis Backend
//!
//! A single multiplexed Redis connection shared by all requests.

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use tracing::debug;

use super::CacheBackend;
use crate::config::Config;
use crate::error::Result;

/// Retries performed by the client itself when (re)establishing the connection.
const CONNECT_RETRIES: usize = 1;

// == Redis Backend ==
/// Backend over a `ConnectionManager`.
///
/// The manager multiplexes every command over one connection, so each call
/// works on a cheap clone of the handle rather than taking a lock.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    /// Opens the connection described by `config` and verifies it with a PING.
    ///
    /// Connect and per-command timeouts come from the configuration and
    /// surface as errors when exceeded.
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = redis::Client::open(config.connection_info())?;
        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(config.connect_timeout)
            .set_response_timeout(config.response_timeout)
            .set_number_of_retries(CONNECT_RETRIES);

        let conn = ConnectionManager::new_with_config(client, manager_config).await?;
        let backend = Self { conn };
        backend.ping().await?;

        Ok(backend)
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> Result<()> {
        let mut conn = self.conn.clone();
        match ttl {
            Some(seconds) => {
                let _: () = conn.set_ex(key, value, seconds).await?;
            }
            None => {
                let _: () = conn.set(key, value).await?;
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let reply: String = redis::cmd("PING").query_async(&mut conn).await?;
        debug!("Redis replied to PING with {}", reply);
        Ok(())
    }
}
