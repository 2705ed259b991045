//! # contentgraph CLI Module
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP write API and the writer pipeline
//! - `map` - Map a file of documents to Cypher statements, offline

mod commands;

use crate::error::ServiceError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// contentgraph - batched content-to-graph write service
///
/// Ingests content documents over HTTP, maps them to idempotent Cypher
/// statements, and writes them to Neo4j in size- and time-bounded
/// batches.
#[derive(Parser, Debug)]
#[command(name = "contentgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server and writer pipeline
    Serve {
        /// Neo4j bolt URL
        #[arg(
            long,
            env = "CONTENTGRAPH_NEO_URL",
            default_value = "neo4j://localhost:7687"
        )]
        neo_url: String,

        /// Neo4j username
        #[arg(long, env = "CONTENTGRAPH_NEO_USER", default_value = "neo4j")]
        neo_user: String,

        /// Neo4j password
        #[arg(long, env = "CONTENTGRAPH_NEO_PASS", default_value = "neo4j")]
        neo_pass: String,

        /// Host to bind to
        #[arg(short = 'H', long, env = "CONTENTGRAPH_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, env = "CONTENTGRAPH_PORT", default_value = "8080")]
        port: u16,

        /// Ingestion queue capacity, in documents
        #[arg(long, env = "CONTENTGRAPH_QUEUE_CAPACITY", default_value = "1024")]
        queue_capacity: usize,

        /// Statement count that triggers an immediate flush
        #[arg(long, env = "CONTENTGRAPH_BATCH_SIZE", default_value = "1024")]
        batch_size: usize,

        /// Maximum age of a non-empty batch, in milliseconds
        #[arg(long, env = "CONTENTGRAPH_FLUSH_INTERVAL_MS", default_value = "1000")]
        flush_interval_ms: u64,

        /// Total flush attempts before the pipeline gives up
        #[arg(long, env = "CONTENTGRAPH_FLUSH_RETRIES", default_value = "5")]
        flush_retries: u32,

        /// Backoff before the first flush retry, in milliseconds
        #[arg(long, env = "CONTENTGRAPH_RETRY_BACKOFF_MS", default_value = "250")]
        retry_backoff_ms: u64,
    },

    /// Map documents from a file to Cypher statements (no graph writes)
    Map {
        /// Path to a file of concatenated JSON documents
        #[arg(short, long)]
        file: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ServiceError> {
    match cli.command {
        Commands::Serve {
            neo_url,
            neo_user,
            neo_pass,
            host,
            port,
            queue_capacity,
            batch_size,
            flush_interval_ms,
            flush_retries,
            retry_backoff_ms,
        } => {
            let pipeline = crate::pipeline::PipelineConfig {
                queue_capacity,
                batch_size,
                flush_interval: Duration::from_millis(flush_interval_ms),
                flush_retries,
                retry_backoff: Duration::from_millis(retry_backoff_ms),
            };
            cmd_serve(&neo_url, &neo_user, &neo_pass, &host, port, pipeline).await
        }
        Commands::Map { file } => cmd_map(&file),
    }
}
