// src/server/mod.rs
//! HTTP front end: the two relay endpoints behind an axum router.
//!
//! The router is a thin adapter. It translates requests into
//! [`QueryRequest`](crate::query::QueryRequest) /
//! [`PageRequest`](crate::query::PageRequest), runs them, and maps the
//! result or [`AppError`] back onto a status code and JSON body.

mod handlers;
mod response;

use crate::api::UpstreamClient;
use crate::error::AppError;
use crate::query::DatabaseQueryAggregator;
use crate::types::PageSize;
use axum::routing::any;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

pub use response::ErrorBody;

/// Path of the query aggregation endpoint.
pub const QUERY_PATH: &str = "/api/notion";

/// Path of the page fetch endpoint.
pub const PAGE_PATH: &str = "/api/notion-page";

/// Shared, stateless request context.
#[derive(Clone)]
pub struct RelayState {
    aggregator: DatabaseQueryAggregator,
    upstream: Arc<dyn UpstreamClient>,
}

impl RelayState {
    pub fn new(upstream: Arc<dyn UpstreamClient>, page_size: PageSize) -> Self {
        Self {
            aggregator: DatabaseQueryAggregator::new(Arc::clone(&upstream), page_size),
            upstream,
        }
    }
}

/// Builds the relay router.
///
/// Every route accepts any method so that `OPTIONS` and unsupported
/// methods get the relay's own answers, with CORS headers attached.
pub fn router(state: RelayState) -> Router {
    Router::new()
        .route(QUERY_PATH, any(handlers::query_database))
        .route(PAGE_PATH, any(handlers::fetch_page))
        .layer(axum::middleware::map_response(response::with_cors_headers))
        .with_state(state)
}

/// Binds `addr` and serves until SIGINT or SIGTERM.
pub async fn serve(addr: &str, state: RelayState) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await.map_err(|e| AppError::InternalError {
        message: format!("Failed to bind to {}", addr),
        source: Some(Box::new(e)),
    })?;

    log::info!("Relay listening on {} ({}, {})", addr, QUERY_PATH, PAGE_PATH);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(wait_for_signal())
        .await?;

    log::info!("Relay stopped");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received SIGINT, shutting down"),
        _ = terminate => log::info!("Received SIGTERM, shutting down"),
    }
}
