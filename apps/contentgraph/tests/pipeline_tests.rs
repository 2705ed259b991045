//! Integration tests for the writer pipeline.
//!
//! Uses a recording mock store at the `GraphStore` seam and tokio's
//! paused clock, so timer-driven behaviour is tested deterministically
//! instead of by racing real time.

#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use common::MockGraphStore;
use contentgraph::pipeline::{self, MappedDocument, PipelineConfig, PipelineError};
use contentgraph_core::Statement;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// A pre-mapped document with `count` distinguishable statements.
fn doc(uuid: &str, count: usize) -> MappedDocument {
    let statements = (0..count)
        .map(|i| {
            Statement::new("MERGE (c:Content {uuid: $uuid})")
                .param("uuid", uuid)
                .param("seq", i as i64)
        })
        .collect();
    MappedDocument {
        uuid: uuid.to_string(),
        statements,
    }
}

fn config(batch_size: usize, flush_interval: Duration) -> PipelineConfig {
    PipelineConfig {
        queue_capacity: 16,
        batch_size,
        flush_interval,
        flush_retries: 5,
        retry_backoff: Duration::from_millis(10),
    }
}

// =============================================================================
// SIZE TRIGGER
// =============================================================================

#[tokio::test(start_paused = true)]
async fn size_threshold_triggers_exactly_one_flush() {
    let store = Arc::new(MockGraphStore::new());
    let (ingest, writer) = pipeline::spawn(
        store.clone(),
        config(3, Duration::from_secs(3600)),
    );

    ingest.enqueue(doc("u-1", 3)).await.unwrap();
    store.wait_for_batches(1).await;

    drop(ingest);
    writer.await.unwrap().unwrap();

    let batches = store.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 3);
}

#[tokio::test(start_paused = true)]
async fn documents_are_never_split_across_batches() {
    let store = Arc::new(MockGraphStore::new());
    let (ingest, writer) = pipeline::spawn(
        store.clone(),
        config(3, Duration::from_secs(3600)),
    );

    // Two statements leave the batch under the threshold; the second
    // document crosses it. The whole second document must flush with
    // the first, never half of it.
    ingest.enqueue(doc("u-1", 2)).await.unwrap();
    ingest.enqueue(doc("u-2", 2)).await.unwrap();
    store.wait_for_batches(1).await;

    drop(ingest);
    writer.await.unwrap().unwrap();

    let batches = store.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 4);

    // Enqueue order is preserved statement by statement.
    let uuids: Vec<&str> = batches[0]
        .iter()
        .map(|s| s.get("uuid").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(uuids, vec!["u-1", "u-1", "u-2", "u-2"]);
}

// =============================================================================
// TIME TRIGGER
// =============================================================================

#[tokio::test(start_paused = true)]
async fn time_trigger_flushes_undersized_batch() {
    let interval = Duration::from_secs(1);
    let store = Arc::new(MockGraphStore::new());
    let (ingest, writer) = pipeline::spawn(store.clone(), config(1000, interval));

    let before = Instant::now();
    ingest.enqueue(doc("u-1", 2)).await.unwrap();
    store.wait_for_batches(1).await;

    // The flush must not have fired earlier than one full interval
    // after the first statement entered the batch.
    assert!(before.elapsed() >= interval);

    drop(ingest);
    writer.await.unwrap().unwrap();

    let batches = store.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 2);
}

// =============================================================================
// DRAIN ON SHUTDOWN
// =============================================================================

#[tokio::test(start_paused = true)]
async fn closing_the_queue_flushes_the_remainder() {
    let store = Arc::new(MockGraphStore::new());
    let (ingest, writer) = pipeline::spawn(
        store.clone(),
        config(1000, Duration::from_secs(3600)),
    );

    ingest.enqueue(doc("u-1", 2)).await.unwrap();
    ingest.enqueue(doc("u-2", 1)).await.unwrap();
    drop(ingest);

    writer.await.unwrap().unwrap();

    let batches = store.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 3);
}

#[tokio::test(start_paused = true)]
async fn empty_queue_drains_without_flushing() {
    let store = Arc::new(MockGraphStore::new());
    let (ingest, writer) = pipeline::spawn(
        store.clone(),
        config(1000, Duration::from_secs(3600)),
    );

    drop(ingest);
    writer.await.unwrap().unwrap();

    assert!(store.batches().is_empty());
}

#[tokio::test(start_paused = true)]
async fn enqueue_after_close_reports_queue_closed() {
    let store = Arc::new(MockGraphStore::new());
    let (ingest, writer) = pipeline::spawn(
        store.clone(),
        config(1000, Duration::from_secs(3600)),
    );

    writer.abort();
    let _ = writer.await;

    let err = ingest.enqueue(doc("u-1", 1)).await.unwrap_err();
    assert!(matches!(err, PipelineError::QueueClosed));
}

// =============================================================================
// FLUSH RETRY
// =============================================================================

#[tokio::test(start_paused = true)]
async fn transient_flush_failures_are_retried() {
    let store = Arc::new(MockGraphStore::new());
    store.fail_next(2);

    let (ingest, writer) = pipeline::spawn(
        store.clone(),
        config(3, Duration::from_secs(3600)),
    );

    ingest.enqueue(doc("u-1", 3)).await.unwrap();
    store.wait_for_batches(1).await;

    drop(ingest);
    writer.await.unwrap().unwrap();

    // Two injected failures, then the same batch landed once.
    let batches = store.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 3);
}

#[tokio::test(start_paused = true)]
async fn retry_exhaustion_stops_the_pipeline() {
    let store = Arc::new(MockGraphStore::new());
    store.fail_next(10);

    let mut cfg = config(3, Duration::from_secs(3600));
    cfg.flush_retries = 2;
    let (ingest, writer) = pipeline::spawn(store.clone(), cfg);

    ingest.enqueue(doc("u-1", 3)).await.unwrap();

    let result = writer.await.unwrap();
    match result {
        Err(PipelineError::FlushFailed { attempts, .. }) => assert_eq!(attempts, 2),
        other => panic!("expected FlushFailed, got {:?}", other),
    }
    assert!(store.batches().is_empty());
}
