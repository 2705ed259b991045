//! # contentgraph - Content-to-Graph Write Service
//!
//! The main binary for the contentgraph batched write service.
//!
//! This application provides:
//! - HTTP write API (axum-based)
//! - A buffered, batching writer pipeline in front of Neo4j
//! - A CLI for serving and offline statement inspection
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                 apps/contentgraph (THE BINARY)                 │
//! │                                                                │
//! │  ┌──────────┐    ┌────────────┐    ┌──────────────────────┐  │
//! │  │   CLI    │    │  HTTP API  │    │  Writer Pipeline     │  │
//! │  │  (clap)  │    │  (axum)    │    │  (bounded queue +    │  │
//! │  │          │    │            │    │   batching flushes)  │  │
//! │  └────┬─────┘    └─────┬──────┘    └──────────┬───────────┘  │
//! │       │                │                      │               │
//! │       └────────────────┼──────────────────────┘               │
//! │                        ▼                                      │
//! │              ┌───────────────────┐                            │
//! │              │ contentgraph-core │                            │
//! │              │   (THE MAPPER)    │                            │
//! │              └───────────────────┘                            │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server against a local Neo4j
//! contentgraph serve --host 0.0.0.0 --port 8080
//!
//! # Inspect the statements a file of documents maps to
//! contentgraph map -f documents.json
//! ```

use clap::Parser;
use contentgraph::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — CONTENTGRAPH_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("CONTENTGRAPH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "contentgraph=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the contentgraph startup banner.
fn print_banner() {
    println!(
        r#"
  contentgraph v{}

  Content → Cypher → Neo4j, in batches
"#,
        env!("CARGO_PKG_VERSION")
    );
}
