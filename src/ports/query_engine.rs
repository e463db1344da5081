use async_trait::async_trait;
use thiserror::Error;

use crate::core::query::{QueryParams, QueryResult};

/// Custom error type for query engine operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum QueryEngineError {
    /// The requested game id is not known to the engine
    #[error("Unknown game type: {0}")]
    UnknownGameType(String),

    /// The target hostname could not be resolved to an address
    #[error("Failed to resolve host {host}: {reason}")]
    HostResolution { host: String, reason: String },

    /// The engine failed to reach or understand the target server. The
    /// message is surfaced to the client verbatim.
    #[error("{0}")]
    Query(String),

    /// Anything the engine raised that is not an expected query failure.
    /// Rendered as a fixed generic message so internals never leak.
    #[error("Unknown error occurred")]
    Internal,
}

/// Result type alias for query engine operations
pub type QueryEngineResult<T> = Result<T, QueryEngineError>;

/// QueryEngine defines the port (interface) for querying game servers
///
/// The gateway depends only on this capability. The production adapter
/// delegates to the multi-protocol engine; tests substitute doubles without
/// touching any routing logic.
#[async_trait]
pub trait QueryEngine: Send + Sync + 'static {
    /// Query a game server for its live status
    ///
    /// # Arguments
    /// * `params` - The validated query parameters, including the retry
    ///   budget the engine may spend on network round-trips
    ///
    /// # Returns
    /// A future that resolves to the server's status or a descriptive error
    async fn query(&self, params: &QueryParams) -> QueryEngineResult<QueryResult>;
}
