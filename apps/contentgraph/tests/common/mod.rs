//! Shared test support: a recording in-memory graph store.

#![allow(clippy::unwrap_used, clippy::panic, dead_code)]

use async_trait::async_trait;
use contentgraph::graph::{GraphError, GraphStore};
use contentgraph_core::Statement;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// A `GraphStore` that records every submitted batch and can be told to
/// fail the next N submissions.
#[derive(Default)]
pub struct MockGraphStore {
    batches: Mutex<Vec<Vec<Statement>>>,
    fail_next: AtomicUsize,
    notify: Notify,
}

impl MockGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` calls to `submit_batch` fail with a transient
    /// error before succeeding again.
    pub fn fail_next(&self, n: usize) {
        self.fail_next.store(n, Ordering::SeqCst);
    }

    /// Batches received so far, in submission order.
    pub fn batches(&self) -> Vec<Vec<Statement>> {
        self.batches.lock().unwrap().clone()
    }

    /// Suspend until at least `n` batches have been recorded.
    pub async fn wait_for_batches(&self, n: usize) {
        loop {
            if self.batches.lock().unwrap().len() >= n {
                return;
            }
            self.notify.notified().await;
        }
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn ensure_indexes(&self) -> Result<(), GraphError> {
        Ok(())
    }

    async fn submit_batch(&self, statements: &[Statement]) -> Result<(), GraphError> {
        let remaining = self.fail_next.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_next.store(remaining - 1, Ordering::SeqCst);
            return Err(GraphError::Unavailable("injected failure".to_string()));
        }

        self.batches.lock().unwrap().push(statements.to_vec());
        self.notify.notify_waiters();
        Ok(())
    }
}
