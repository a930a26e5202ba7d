//! Web UI Host
//!
//! Serves the built web UI and forwards its `/api` calls to the analysis
//! backend, built with Axum.
//!
//! # Routes
//!
//! - `GET /health` - Liveness probe
//! - `ANY /api/*path` - Forwarded to `{backend}/api/{path}`
//! - everything else - Static files from the UI directory, `index.html` fallback

pub mod error;
pub mod proxy;

pub use error::ServerError;
pub use proxy::ProxyState;

use axum::{
    routing::{any, get},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::{BackendSettings, ServerSettings};

/// Build the host router
pub fn build_router(state: ProxyState, ui_dir: &Path) -> Router {
    let assets = ServeDir::new(ui_dir).fallback(ServeFile::new(ui_dir.join("index.html")));

    Router::new()
        .route("/health", get(liveness))
        .route("/api/*path", any(proxy::forward))
        .with_state(Arc::new(state))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// GET /health
async fn liveness() -> &'static str {
    "ok"
}

/// Start the web host
pub async fn serve(server: &ServerSettings, backend: &BackendSettings) -> Result<(), ServerError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(backend.request_timeout_secs))
        .build()
        .map_err(|e| ServerError::Internal(format!("HTTP client error: {}", e)))?;

    let ui_dir = Path::new(&server.ui_dir);
    if !ui_dir.join("index.html").exists() {
        tracing::warn!("No index.html in {:?}; only /api and /health will respond", ui_dir);
    }

    let router = build_router(ProxyState::new(client, &backend.url), ui_dir);

    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("QPU console UI listening on http://{} (backend {})", addr, backend.url);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("QPU console UI shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
