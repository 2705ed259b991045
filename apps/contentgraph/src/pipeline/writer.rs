//! # Writer Loop
//!
//! The single consumer task: Running → Draining → Stopped.
//!
//! While the batch is empty the loop waits on the queue alone; the
//! flush deadline is armed the moment the batch goes non-empty, so a
//! time-triggered flush never fires earlier than one full interval
//! after the first statement entered the batch. While the batch is
//! non-empty the loop races the queue against the deadline. A closed,
//! empty queue ends the loop with one final flush of the remainder.

use super::{MappedDocument, PipelineConfig, PipelineError};
use crate::graph::GraphStore;
use contentgraph_core::BatchAccumulator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, error, info, warn};

/// Upper bound on the per-attempt retry backoff.
const MAX_RETRY_BACKOFF: Duration = Duration::from_secs(30);

/// Consumer loop body. Exits when the queue is closed and drained, or
/// when a flush exhausts its retry budget.
pub(super) async fn run(
    mut rx: mpsc::Receiver<MappedDocument>,
    store: Arc<dyn GraphStore>,
    config: PipelineConfig,
) -> Result<(), PipelineError> {
    let mut batch = BatchAccumulator::new(config.batch_size);
    let mut deadline = Instant::now();

    loop {
        if batch.is_empty() {
            // Nothing pending: only the queue can wake us.
            let Some(doc) = rx.recv().await else { break };
            accept(&mut batch, doc);
            if !batch.is_empty() {
                deadline = Instant::now() + config.flush_interval;
            }
            if batch.is_full() {
                flush(store.as_ref(), &mut batch, &config).await?;
            }
        } else {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(doc) => {
                        accept(&mut batch, doc);
                        if batch.is_full() {
                            flush(store.as_ref(), &mut batch, &config).await?;
                        }
                    }
                    None => break,
                },
                () = time::sleep_until(deadline) => {
                    debug!(pending = batch.len(), "flush interval elapsed");
                    flush(store.as_ref(), &mut batch, &config).await?;
                }
            }
        }
    }

    // Draining: the queue is closed and empty; flush the remainder.
    if !batch.is_empty() {
        info!(pending = batch.len(), "queue closed, flushing final batch");
        flush(store.as_ref(), &mut batch, &config).await?;
    }

    info!("writer pipeline drained and stopped");
    Ok(())
}

/// Append one document's statements to the batch.
fn accept(batch: &mut BatchAccumulator, doc: MappedDocument) {
    debug!(
        uuid = %doc.uuid,
        statements = doc.statements.len(),
        "accepted document into batch"
    );
    batch.append(doc.statements);
}

/// Submit the whole batch as one call, retrying with exponential
/// backoff. Only retry exhaustion propagates an error; the batch is
/// reset on success.
async fn flush(
    store: &dyn GraphStore,
    batch: &mut BatchAccumulator,
    config: &PipelineConfig,
) -> Result<(), PipelineError> {
    let statements = batch.take();
    let count = statements.len();
    let mut attempt: u32 = 1;

    loop {
        match store.submit_batch(&statements).await {
            Ok(()) => {
                info!(statements = count, "flushed batch");
                return Ok(());
            }
            Err(source) if attempt < config.flush_retries.max(1) => {
                let backoff = backoff_for(config.retry_backoff, attempt);
                warn!(
                    attempt,
                    statements = count,
                    error = %source,
                    "batch flush failed, retrying in {:?}",
                    backoff
                );
                time::sleep(backoff).await;
                attempt += 1;
            }
            Err(source) => {
                error!(
                    attempts = attempt,
                    statements = count,
                    error = %source,
                    "batch flush failed, retry budget exhausted"
                );
                return Err(PipelineError::FlushFailed {
                    attempts: attempt,
                    source,
                });
            }
        }
    }
}

/// Backoff before retry number `attempt`: doubles per attempt, capped.
fn backoff_for(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(1u32 << (attempt - 1).min(16))
        .min(MAX_RETRY_BACKOFF)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        let base = Duration::from_millis(250);
        assert_eq!(backoff_for(base, 1), Duration::from_millis(250));
        assert_eq!(backoff_for(base, 2), Duration::from_millis(500));
        assert_eq!(backoff_for(base, 3), Duration::from_secs(1));
    }

    #[test]
    fn backoff_is_capped() {
        let base = Duration::from_secs(10);
        assert_eq!(backoff_for(base, 5), MAX_RETRY_BACKOFF);
        // Large attempt numbers must not overflow the shift.
        assert_eq!(backoff_for(base, 40), MAX_RETRY_BACKOFF);
    }
}
