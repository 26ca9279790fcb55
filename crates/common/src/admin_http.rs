//! Lightweight admin HTTP listener
//!
//! Exposes `/healthz` and `/metrics` on a separate address, with metrics provided by caller.

use axum::http::StatusCode;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::{error, info};

async fn healthz() -> &'static str { "OK" }

/// Build the admin router; `metrics_fn` renders the metrics exposition text.
pub fn admin_router(metrics_fn: fn() -> (StatusCode, String)) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(move || async move { metrics_fn() }))
}

/// Bind `addr` and serve the admin router on the current runtime.
/// Bind failures are returned; serve failures are logged from the spawned task.
pub async fn spawn_admin_server(addr: &str, metrics_fn: fn() -> (StatusCode, String)) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "admin server listening");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, admin_router(metrics_fn)).await {
            error!(error = %e, "admin server stopped");
        }
    });
    Ok(())
}
