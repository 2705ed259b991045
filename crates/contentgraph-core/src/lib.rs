//! # contentgraph-core
//!
//! The pure content-to-graph mapping layer for contentgraph - THE LOGIC.
//!
//! This crate turns inbound content documents into ordered lists of
//! idempotent Cypher MERGE statements, and holds the batch accumulator
//! the writer pipeline drains between flushes. Everything here is
//! deterministic: the same document always maps to the same statements,
//! and re-applying any statement leaves the graph unchanged.
//!
//! ## Architectural Constraints
//!
//! - NO async, NO network dependencies (pure Rust)
//! - Statements are upserts only; nothing in this crate deletes
//! - Parameter sets use `BTreeMap` for deterministic ordering

// =============================================================================
// MODULES
// =============================================================================

pub mod batch;
pub mod document;
pub mod mapper;
pub mod statement;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use batch::BatchAccumulator;
pub use document::{BrandRef, ContentDocument, ContentError};
pub use mapper::{brand_uri_to_uuid, map_document, THINGS_URI_PREFIX};
pub use statement::{ParamValue, Statement};
