//! # API Request/Response Types
//!
//! JSON response shapes for the HTTP write API. The inbound document
//! shape itself lives in contentgraph-core.

use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// WRITE RESPONSE
// =============================================================================

/// Response to a single-document write.
///
/// `accepted` means durably queued in this process — persistence is
/// not confirmed synchronously.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse {
    pub accepted: bool,
    pub uuid: Option<String>,
    /// Number of statements the document mapped to (0 for skipped
    /// non-article content).
    pub statements: usize,
    pub error: Option<String>,
}

impl WriteResponse {
    pub fn accepted(uuid: impl Into<String>, statements: usize) -> Self {
        Self {
            accepted: true,
            uuid: Some(uuid.into()),
            statements,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            accepted: false,
            uuid: None,
            statements: 0,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// BULK WRITE RESPONSE
// =============================================================================

/// Response to a bulk write of concatenated document bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkWriteResponse {
    pub accepted: bool,
    /// Documents enqueued for writing.
    pub documents: usize,
    /// Non-article documents skipped (not an error).
    pub skipped: usize,
    pub error: Option<String>,
}

impl BulkWriteResponse {
    pub fn accepted(documents: usize, skipped: usize) -> Self {
        Self {
            accepted: true,
            documents,
            skipped,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            accepted: false,
            documents: 0,
            skipped: 0,
            error: Some(msg.into()),
        }
    }
}
