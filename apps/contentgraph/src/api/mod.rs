//! # contentgraph HTTP API Module
//!
//! The inbound write surface, implemented with axum.
//!
//! ## Endpoints
//!
//! - `PUT /content/{uuid}` - Write a single document (202 on enqueue)
//! - `POST /content` - Bulk write of concatenated document bodies
//! - `GET /health` - Health check
//!
//! Handlers only parse, validate, map, and enqueue; every graph write
//! happens in the writer pipeline. There is no admission control
//! beyond the bounded queue's backpressure.

mod handlers;
mod types;

pub use handlers::{bulk_write_handler, health_handler, write_handler};
pub use types::{BulkWriteResponse, HealthResponse, WriteResponse};

use crate::error::ServiceError;
use crate::pipeline::IngestHandle;
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Request body cap. Bulk writes carry many concatenated documents,
/// so this is deliberately larger than any single article.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the producer side of the ingestion queue.
///
/// Cloned per request by axum; the clone inside the router is the last
/// long-lived `IngestHandle`, so the queue closes when the server
/// (and with it this state) is dropped after graceful shutdown.
#[derive(Clone)]
pub struct AppState {
    /// Producer handle onto the writer pipeline's queue.
    pub ingest: IngestHandle,
}

impl AppState {
    /// Create new app state around the pipeline's producer handle.
    #[must_use]
    pub fn new(ingest: IngestHandle) -> Self {
        Self { ingest }
    }
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/content", post(handlers::bulk_write_handler))
        .route("/content/{uuid}", put(handlers::write_handler))
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until the shutdown future resolves.
///
/// Consumes the state: when this returns, the router (and the last
/// `IngestHandle` inside it) has been dropped, which closes the
/// ingestion queue and lets the writer pipeline drain.
pub async fn run_server(
    addr: &str,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServiceError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("contentgraph HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped, closing ingestion queue");
    Ok(())
}
