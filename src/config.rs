//! Configuration Module
//!
//! Handles loading service and backing-store settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis host name or address
    pub redis_host: String,
    /// Redis port
    pub redis_port: u16,
    /// Optional Redis password, None when unset or empty
    pub redis_password: Option<String>,
    /// Logical Redis database index
    pub redis_db: i64,
    /// Shared secret expected in the `X-API-Key` header
    pub api_key: String,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout for establishing the store connection
    pub connect_timeout: Duration,
    /// Timeout for each store command
    pub response_timeout: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_HOST` - Store host (default: localhost)
    /// - `REDIS_PORT` - Store port (default: 6379)
    /// - `REDIS_PASSWORD` - Store password (default: none)
    /// - `REDIS_DB` - Store database index (default: 1)
    /// - `REDIS_SERVICE_API_KEY` - Service credential (default: empty, rejects everything)
    /// - `PORT` - HTTP server port (default: 8080)
    /// - `REDIS_CONNECT_TIMEOUT_SECS` - Connect timeout (default: 5)
    /// - `REDIS_RESPONSE_TIMEOUT_SECS` - Per-command timeout (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            redis_host: env::var("REDIS_HOST").unwrap_or(defaults.redis_host),
            redis_port: parse_var("REDIS_PORT").unwrap_or(defaults.redis_port),
            redis_password: env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),
            redis_db: parse_var("REDIS_DB").unwrap_or(defaults.redis_db),
            api_key: env::var("REDIS_SERVICE_API_KEY").unwrap_or(defaults.api_key),
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            connect_timeout: parse_var("REDIS_CONNECT_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            response_timeout: parse_var("REDIS_RESPONSE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.response_timeout),
        }
    }

    /// Builds the connection descriptor for the backing store.
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.redis_host.clone(), self.redis_port),
            redis: RedisConnectionInfo {
                db: self.redis_db,
                password: self.redis_password.clone(),
                ..Default::default()
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_host: "localhost".to_string(),
            redis_port: 6379,
            redis_password: None,
            redis_db: 1,
            api_key: String::new(),
            server_port: 8080,
            connect_timeout: Duration::from_secs(5),
            response_timeout: Duration::from_secs(5),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
