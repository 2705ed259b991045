//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState};
use crate::error::ServiceError;
use crate::graph::{GraphStore, Neo4jStore};
use crate::pipeline::{self, PipelineConfig};
use contentgraph_core::{ContentDocument, map_document};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for offline mapping (100 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_MAP_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ServiceError> {
    let metadata = std::fs::metadata(path)?;

    if metadata.len() > max_size {
        return Err(ServiceError::Parse(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input file path: canonicalize (resolving ".." and
/// symlinks) and require a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, ServiceError> {
    let canonical = path.canonicalize().map_err(|e| {
        ServiceError::Parse(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ServiceError::Parse(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server and the writer pipeline.
///
/// Shutdown order matters: Ctrl-C stops the HTTP server first, dropping
/// the last producer handle and closing the queue, then the writer task
/// is awaited so its final drain flush completes before exit.
pub async fn cmd_serve(
    neo_url: &str,
    neo_user: &str,
    neo_pass: &str,
    host: &str,
    port: u16,
    config: PipelineConfig,
) -> Result<(), ServiceError> {
    info!("connecting to Neo4j at {}", neo_url);
    let store = Neo4jStore::connect(neo_url, neo_user, neo_pass).await?;
    let store: Arc<dyn GraphStore> = Arc::new(store);

    store.ensure_indexes().await?;
    info!("graph indexes ensured");

    let (ingest, writer) = pipeline::spawn(Arc::clone(&store), config);
    let state = AppState::new(ingest);

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, state, shutdown_signal()).await?;

    // The server dropped the last IngestHandle; wait for the drain.
    match writer.await {
        Ok(result) => result?,
        Err(e) => {
            warn!("writer task aborted: {}", e);
        }
    }

    info!("contentgraph stopped");
    Ok(())
}

/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to install Ctrl-C handler: {}", e);
        // Fall through: serve without a shutdown trigger rather than exit.
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

// =============================================================================
// MAP COMMAND
// =============================================================================

/// Map a file of concatenated JSON documents to Cypher statements and
/// print them, one JSON statement per line. No graph connection is
/// made.
pub fn cmd_map(file: &Path) -> Result<(), ServiceError> {
    let file = validate_file_path(file)?;
    validate_file_size(&file, MAX_MAP_FILE_SIZE)?;

    let contents = std::fs::read(&file)?;
    let stream = serde_json::Deserializer::from_slice(&contents).into_iter::<ContentDocument>();

    let mut documents = 0usize;
    let mut skipped = 0usize;

    for parsed in stream {
        let doc = parsed.map_err(|e| ServiceError::Parse(format!("invalid document: {}", e)))?;
        let statements =
            map_document(&doc).map_err(|e| ServiceError::Parse(format!("{}: {}", doc.uuid, e)))?;

        if statements.is_empty() {
            skipped += 1;
            continue;
        }

        documents += 1;
        for statement in &statements {
            let line = serde_json::to_string(statement)
                .map_err(|e| ServiceError::Parse(e.to_string()))?;
            println!("{}", line);
        }
    }

    info!(documents, skipped, "mapping complete");
    Ok(())
}
