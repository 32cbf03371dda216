//! Axum-based HTTP channel — JSON API under `/api/`.
//!
//! ## URL layout
//!
//! ```text
//! GET  /health
//! POST /api/chat               {message, sessionId?}
//! POST /api/weather            {city?}
//! POST /api/search-wikipedia   {query}
//! ```
//!
//! [`serve`] drives the axum event loop until the [`CancellationToken`] is
//! cancelled, then shuts down gracefully.

mod api;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::AppError;

use super::state::CommsState;

/// Axum router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone — all fields are reference-counted.
#[derive(Clone)]
pub(crate) struct AxumState {
    pub comms: Arc<CommsState>,
}

pub fn build_router(comms: Arc<CommsState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/chat", post(api::chat))
        .route("/api/weather", post(api::weather))
        .route("/api/search-wikipedia", post(api::search_wikipedia))
        .with_state(AxumState { comms })
}

/// Bind `bind_addr` and serve until `shutdown` is cancelled.
pub async fn serve(
    bind_addr: &str,
    comms: Arc<CommsState>,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

    let local = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| bind_addr.to_string());
    info!(bind = %local, "http channel listening");

    axum::serve(listener, build_router(comms))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("axum server error: {e}")))?;

    info!("http channel shut down");
    Ok(())
}
