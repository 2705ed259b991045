//! # Neo4j Store
//!
//! Bolt-backed [`GraphStore`] implementation. One explicit transaction
//! per batch: all statements run in order, then commit, so a rejected
//! batch leaves nothing half-applied.

use super::{GraphError, GraphStore, INDEXED_LABELS};
use async_trait::async_trait;
use contentgraph_core::{ParamValue, Statement};
use neo4rs::Graph;
use tracing::{debug, info};

/// Graph store over a pooled Bolt connection.
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Connect to the graph database endpoint.
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self, GraphError> {
        let graph = Graph::new(uri, user, password).await?;
        info!("connected to graph store at {}", uri);
        Ok(Self { graph })
    }
}

/// Convert a core statement into a Bolt query with bound parameters.
fn to_query(statement: &Statement) -> neo4rs::Query {
    let mut query = neo4rs::query(statement.cypher());
    for (key, value) in statement.params() {
        query = match value {
            ParamValue::Str(s) => query.param(key, s.as_str()),
            ParamValue::Int(i) => query.param(key, *i),
        };
    }
    query
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn ensure_indexes(&self) -> Result<(), GraphError> {
        for (label, property) in INDEXED_LABELS {
            let cypher = format!(
                "CREATE INDEX idx_{}_{} IF NOT EXISTS FOR (n:{}) ON (n.{})",
                label.to_lowercase(),
                property,
                label,
                property
            );
            self.graph.run(neo4rs::query(&cypher)).await?;
            debug!("ensured index on :{}({})", label, property);
        }
        info!("index bootstrap complete ({} labels)", INDEXED_LABELS.len());
        Ok(())
    }

    async fn submit_batch(&self, statements: &[Statement]) -> Result<(), GraphError> {
        let mut txn = self.graph.start_txn().await?;
        let queries: Vec<neo4rs::Query> = statements.iter().map(to_query).collect();
        txn.run_queries(queries).await?;
        txn.commit().await?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
