//! # Batch Accumulator
//!
//! Holds the statements collected since the last flush and answers the
//! size half of the dual flush trigger. The time half lives with the
//! writer pipeline, which owns the clock.
//!
//! Ownership: exclusively the writer pipeline's. Created empty, grown
//! by append, drained whole by `take`, never shared.

use crate::statement::Statement;

/// Statements accumulated between flushes, plus the size threshold.
#[derive(Debug)]
pub struct BatchAccumulator {
    statements: Vec<Statement>,
    size_threshold: usize,
}

impl BatchAccumulator {
    /// Create an empty accumulator with the given size threshold.
    ///
    /// A threshold of zero is nonsensical and treated as one so the
    /// size trigger still fires.
    #[must_use]
    pub fn new(size_threshold: usize) -> Self {
        Self {
            statements: Vec::new(),
            size_threshold: size_threshold.max(1),
        }
    }

    /// Append one document's statements, preserving their order.
    ///
    /// A whole statement list goes in at once so one document is never
    /// split across two batches by a size-triggered flush.
    pub fn append(&mut self, statements: Vec<Statement>) {
        self.statements.extend(statements);
    }

    /// Whether the size trigger has fired.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.statements.len() >= self.size_threshold
    }

    /// Drain the accumulated statements, resetting to empty.
    #[must_use]
    pub fn take(&mut self) -> Vec<Statement> {
        std::mem::take(&mut self.statements)
    }

    /// Number of accumulated statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
