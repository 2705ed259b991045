//! # Graph Store Boundary
//!
//! The seam between the writer pipeline and the graph database.
//!
//! The pipeline only ever sees the `GraphStore` trait: one idempotent
//! startup bootstrap call and one batch submission call. Production
//! uses the Bolt-backed [`Neo4jStore`]; tests substitute a recording
//! mock at the same seam.

mod neo4j;

pub use neo4j::Neo4jStore;

use async_trait::async_trait;
use contentgraph_core::Statement;
use thiserror::Error;

// =============================================================================
// INDEX BOOTSTRAP
// =============================================================================

/// Label/property pairs that must have lookup indexes before the
/// pipeline accepts writes. Every node category is keyed by `uuid`.
pub const INDEXED_LABELS: [(&str, &str); 4] = [
    ("Content", "uuid"),
    ("Article", "uuid"),
    ("Image", "uuid"),
    ("Brand", "uuid"),
];

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors from the graph store boundary.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The underlying Bolt client reported a failure.
    #[error("graph store request failed: {0}")]
    Store(#[from] neo4rs::Error),

    /// The store could not be reached or refused the batch.
    #[error("graph store unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// GRAPH STORE TRAIT
// =============================================================================

/// A graph database that executes batches of mutation statements.
///
/// Contract: `submit_batch` applies all statements of a batch in one
/// call with per-statement atomicity and idempotent MERGE semantics;
/// `ensure_indexes` is idempotent and called once at startup, never on
/// the steady-state write path.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Ensure lookup indexes exist for every node category.
    async fn ensure_indexes(&self) -> Result<(), GraphError>;

    /// Apply one batch of statements, in order, as a single call.
    async fn submit_batch(&self, statements: &[Statement]) -> Result<(), GraphError>;
}
