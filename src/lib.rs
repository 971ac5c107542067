//! Redis Cache Proxy - HTTP/JSON front for a shared Redis connection
//!
//! Exposes authenticated get/set/delete of JSON documents; expiry, storage and
//! concurrency are left to Redis.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{ProxyError, Result};
pub use store::{CacheBackend, MemoryBackend, Store, StoreState};
