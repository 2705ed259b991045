//! # API Endpoint Handlers
//!
//! Single and bulk writes share one internal path: parse, validate,
//! map, enqueue. Only the HTTP shape differs.

use super::{
    AppState,
    types::{BulkWriteResponse, HealthResponse, WriteResponse},
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use contentgraph_core::{ContentDocument, map_document};
use crate::pipeline::MappedDocument;
use tracing::info;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// SINGLE WRITE HANDLER
// =============================================================================

/// Accept one document at its identifier-addressed path.
///
/// The write is acknowledged with 202 Accepted once mapped and
/// enqueued; persistence happens asynchronously in the writer
/// pipeline. Identifier mismatch and malformed bodies are rejected
/// synchronously and never reach the queue.
pub async fn write_handler(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(doc): Json<ContentDocument>,
) -> impl IntoResponse {
    if doc.uuid != uuid {
        return (
            StatusCode::BAD_REQUEST,
            Json(WriteResponse::error(format!(
                "id does not match: '{}' '{}'",
                doc.uuid, uuid
            ))),
        );
    }

    enqueue_document(&state, doc).await
}

// =============================================================================
// BULK WRITE HANDLER
// =============================================================================

/// Accept a stream of concatenated JSON document bodies.
///
/// Documents are parsed and enqueued in turn. The first body that
/// fails to parse or validate aborts the remainder with a client
/// error; a clean end-of-stream is success.
pub async fn bulk_write_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    let mut documents = 0usize;
    let mut skipped = 0usize;

    let stream = serde_json::Deserializer::from_slice(&body).into_iter::<ContentDocument>();
    for parsed in stream {
        let doc = match parsed {
            Ok(doc) => doc,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(BulkWriteResponse::error(format!(
                        "invalid document in stream: {}",
                        e
                    ))),
                );
            }
        };

        let statements = match map_document(&doc) {
            Ok(statements) => statements,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(BulkWriteResponse::error(format!(
                        "invalid document in stream: {}",
                        e
                    ))),
                );
            }
        };

        if statements.is_empty() {
            info!("skipping non-article content {}", doc.uuid);
            skipped += 1;
            continue;
        }

        let item = MappedDocument {
            uuid: doc.uuid,
            statements,
        };
        if state.ingest.enqueue(item).await.is_err() {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(BulkWriteResponse::error("writer pipeline is stopped")),
            );
        }
        documents += 1;
    }

    (
        StatusCode::ACCEPTED,
        Json(BulkWriteResponse::accepted(documents, skipped)),
    )
}

// =============================================================================
// SHARED ENQUEUE PATH
// =============================================================================

/// Map and enqueue a validated document; the common tail of both write
/// endpoints.
async fn enqueue_document(
    state: &AppState,
    doc: ContentDocument,
) -> (StatusCode, Json<WriteResponse>) {
    let statements = match map_document(&doc) {
        Ok(statements) => statements,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(WriteResponse::error(e.to_string())),
            );
        }
    };

    if statements.is_empty() {
        // Not an article; intentionally skipped, not an error.
        info!("skipping non-article content {}", doc.uuid);
        return (
            StatusCode::ACCEPTED,
            Json(WriteResponse::accepted(doc.uuid, 0)),
        );
    }

    let count = statements.len();
    let item = MappedDocument {
        uuid: doc.uuid.clone(),
        statements,
    };

    match state.ingest.enqueue(item).await {
        Ok(()) => (
            StatusCode::ACCEPTED,
            Json(WriteResponse::accepted(doc.uuid, count)),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(WriteResponse::error("writer pipeline is stopped")),
        ),
    }
}
