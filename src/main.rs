//! Redis Cache Proxy - HTTP/JSON front for a shared Redis connection
//!
//! Keeps one Redis connection open for the lifetime of the process and
//! exposes authenticated cache operations over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_cache_proxy::{create_router, AppState, Config, Store};

/// Main entry point for the cache proxy.
///
/// # Startup Sequence
/// 1. Load `.env` if present and initialize tracing
/// 2. Load configuration from environment variables
/// 3. Connect to Redis (best-effort)
/// 4. Serve HTTP until SIGINT/SIGTERM
/// 5. Close the store connection, whether serving succeeded or not
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_cache_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    info!("Starting Redis Cache Service v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    info!(
        "Configuration loaded: redis={}:{} db={}, port={}",
        config.redis_host, config.redis_port, config.redis_db, config.server_port
    );
    if config.api_key.is_empty() {
        warn!("REDIS_SERVICE_API_KEY is not set, every request will be rejected");
    }

    let store = Arc::new(Store::connect(&config).await);
    let state = AppState::new(store.clone(), config.api_key.as_str());

    let outcome = serve(&config, state).await;
    if let Err(err) = &outcome {
        error!("Server stopped with error: {:#}", err);
    }

    store.close();
    info!("Server shutdown complete");

    outcome
}

/// Binds the listener and serves until a shutdown signal arrives.
async fn serve(config: &Config, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
