//! # Writer Pipeline
//!
//! The buffered, batching write path between the HTTP handlers and the
//! graph store.
//!
//! Producers (one per inbound request) hand pre-mapped statement lists
//! to a bounded queue and suspend when it is full — that bound is the
//! system's only backpressure mechanism. A single consumer task drains
//! the queue into a batch accumulator and flushes on whichever fires
//! first: the size threshold or the flush interval. Dropping the last
//! [`IngestHandle`] closes the queue; the consumer then drains what is
//! left, performs one final flush, and stops.

mod writer;

use crate::graph::{GraphError, GraphStore};
use contentgraph_core::Statement;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Tunables for the queue, the flush trigger, and the retry policy.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Bounded queue capacity (backpressure threshold), in documents.
    pub queue_capacity: usize,
    /// Statement count at which a flush fires immediately.
    pub batch_size: usize,
    /// Maximum age of a non-empty batch before a flush fires.
    pub flush_interval: Duration,
    /// Total flush attempts before the pipeline gives up.
    pub flush_retries: u32,
    /// Backoff before the first retry; doubles per attempt, capped.
    pub retry_backoff: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            batch_size: 1024,
            flush_interval: Duration::from_secs(1),
            flush_retries: 5,
            retry_backoff: Duration::from_millis(250),
        }
    }
}

// =============================================================================
// QUEUE ITEM
// =============================================================================

/// One document's full statement list, enqueued as a single item.
///
/// Keeping the list whole is what guarantees a size-triggered flush can
/// never split one document's statements across two batches.
#[derive(Debug)]
pub struct MappedDocument {
    /// Document identifier, carried for logging.
    pub uuid: String,
    /// Statements in mapper order.
    pub statements: Vec<Statement>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors from the pipeline boundary.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Enqueue attempted after the queue closed. Shutdown closes the
    /// queue exactly once, so hitting this in steady state is a
    /// programming error, not a condition to recover from.
    #[error("ingestion queue is closed")]
    QueueClosed,

    /// A flush failed and the bounded retry budget is spent. The
    /// pipeline halts rather than silently dropping acknowledged
    /// writes.
    #[error("batch flush failed after {attempts} attempts: {source}")]
    FlushFailed {
        /// Number of submit attempts made.
        attempts: u32,
        /// The final store error.
        source: GraphError,
    },
}

// =============================================================================
// INGEST HANDLE (producer side)
// =============================================================================

/// Cloneable producer side of the ingestion queue.
///
/// Dropping the last clone closes the queue and starts the drain.
#[derive(Clone)]
pub struct IngestHandle {
    tx: mpsc::Sender<MappedDocument>,
}

impl IngestHandle {
    /// Enqueue one document's statements, suspending while the queue
    /// is full.
    pub async fn enqueue(&self, doc: MappedDocument) -> Result<(), PipelineError> {
        self.tx
            .send(doc)
            .await
            .map_err(|_| PipelineError::QueueClosed)
    }
}

// =============================================================================
// SPAWN
// =============================================================================

/// Start the writer pipeline.
///
/// Returns the producer handle and the consumer task's join handle;
/// await the latter after dropping every producer clone to observe the
/// drain completing (or the retry-exhaustion error that stopped it).
pub fn spawn(
    store: Arc<dyn GraphStore>,
    config: PipelineConfig,
) -> (IngestHandle, JoinHandle<Result<(), PipelineError>>) {
    let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
    let task = tokio::spawn(writer::run(rx, store, config));
    (IngestHandle { tx }, task)
}
