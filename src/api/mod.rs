//! API Module
//!
//! HTTP handlers and routing for the cache proxy REST API.
//!
//! # Endpoints
//! - `GET /` - Service metadata
//! - `GET /health` - Store reachability
//! - `POST /cache/get` - Retrieve a document by key
//! - `POST /cache/set` - Store a document with optional TTL
//! - `POST /cache/delete` - Delete a key
//!
//! Every endpoint requires the `X-API-Key` header.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
