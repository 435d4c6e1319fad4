#![forbid(unsafe_code)]

//! HTTP front end: serves the hierarchy, node graph and treemap pages plus the treemap data API.
//!
//! Datasets are read from disk on every request, so edits to the data files show up on reload.

pub mod error;
pub mod routes;

pub use error::{Result, ServerError};

use axum::Router;
use axum::routing::get;
use canopy::CanopyConfig;
use canopy::render::PageRenderer;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone)]
pub struct ServerState {
    pub pages: Arc<PageRenderer>,
}

impl ServerState {
    pub fn new(config: CanopyConfig) -> Self {
        Self {
            pages: Arc::new(PageRenderer::new(config)),
        }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/nodegraph", get(routes::nodegraph))
        .route("/treemap", get(routes::treemap))
        .route("/api/treemap-data", get(routes::treemap_data))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `config.server` and serves until Ctrl-C.
pub async fn serve(config: CanopyConfig) -> Result<()> {
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!(
        %addr,
        data_dir = %config.data.dir.display(),
        "listening"
    );

    axum::serve(listener, router(ServerState::new(config)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
