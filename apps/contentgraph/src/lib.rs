//! # contentgraph - THE BINARY (library surface)
//!
//! Library entry point for the contentgraph service. The binary in
//! `main.rs` is a thin shell over these modules; integration tests
//! reach the router, pipeline, and store seam through here.

pub mod api;
pub mod cli;
pub mod error;
pub mod graph;
pub mod pipeline;

pub use error::ServiceError;
