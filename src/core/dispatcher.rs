//! Core query dispatch service.
//!
//! The `QueryDispatcher` bridges validated requests to the query engine
//! port and folds the terminal outcome into the uniform response envelope.
//! It performs exactly one engine invocation per request: the retry budget
//! travels down to the engine, which loops internally. No caching, no
//! gateway-side retry, no concurrency limiting.
//!
//! This layer deliberately avoids HTTP concerns so it remains easily
//! testable in isolation with engine doubles.
use std::sync::Arc;

use crate::{
    core::query::{QueryParams, QueryResponse},
    ports::query_engine::QueryEngine,
};

/// Dispatches validated queries to the engine and normalizes the outcome.
/// An instance is cheap to clone (Arc inside).
#[derive(Clone)]
pub struct QueryDispatcher {
    engine: Arc<dyn QueryEngine>,
}

impl QueryDispatcher {
    /// Create a new dispatcher over the given engine capability.
    pub fn new(engine: Arc<dyn QueryEngine>) -> Self {
        Self { engine }
    }

    /// Invoke the engine once and wrap the result.
    ///
    /// Every engine failure is treated as client-attributable (bad host,
    /// bad type, unreachable target) and surfaced as a message inside the
    /// envelope; it never becomes a server fault of the gateway itself.
    pub async fn dispatch(&self, params: QueryParams) -> QueryResponse {
        tracing::debug!(
            game_type = %params.game_type,
            host = %params.host,
            port = ?params.port,
            max_retries = params.max_retries,
            "Dispatching query to engine"
        );

        match self.engine.query(&params).await {
            Ok(result) => {
                tracing::info!(
                    game_type = %params.game_type,
                    host = %params.host,
                    ping_ms = result.ping,
                    "Query succeeded"
                );
                QueryResponse::ok(result)
            }
            Err(error) => {
                tracing::info!(
                    game_type = %params.game_type,
                    host = %params.host,
                    error = %error,
                    "Query failed"
                );
                QueryResponse::failure(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        core::query::{DEFAULT_MAX_RETRIES, QueryResult},
        ports::query_engine::{QueryEngineError, QueryEngineResult},
    };

    struct FixedEngine {
        outcome: Result<QueryResult, &'static str>,
    }

    #[async_trait]
    impl QueryEngine for FixedEngine {
        async fn query(&self, _params: &QueryParams) -> QueryEngineResult<QueryResult> {
            match &self.outcome {
                Ok(result) => Ok(result.clone()),
                Err(message) => Err(QueryEngineError::Query(message.to_string())),
            }
        }
    }

    fn params() -> QueryParams {
        QueryParams {
            game_type: "minecraft".to_string(),
            host: "play.example.com".to_string(),
            port: None,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    fn sample_result() -> QueryResult {
        QueryResult {
            name: "Test Server".to_string(),
            map: "world".to_string(),
            password: false,
            maxplayers: 20,
            players: vec![],
            bots: vec![],
            connect: "play.example.com:25565".to_string(),
            ping: 42,
            raw: None,
        }
    }

    #[tokio::test]
    async fn engine_success_is_wrapped_verbatim() {
        let dispatcher = QueryDispatcher::new(Arc::new(FixedEngine {
            outcome: Ok(sample_result()),
        }));

        let response = dispatcher.dispatch(params()).await;
        assert!(response.success);
        assert_eq!(response.data, Some(sample_result()));
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn engine_failure_surfaces_the_message() {
        let dispatcher = QueryDispatcher::new(Arc::new(FixedEngine {
            outcome: Err("Connection timed out"),
        }));

        let response = dispatcher.dispatch(params()).await;
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("Connection timed out"));
    }

    #[tokio::test]
    async fn internal_engine_errors_stay_generic() {
        struct PanickyEngine;

        #[async_trait]
        impl QueryEngine for PanickyEngine {
            async fn query(&self, _params: &QueryParams) -> QueryEngineResult<QueryResult> {
                Err(QueryEngineError::Internal)
            }
        }

        let dispatcher = QueryDispatcher::new(Arc::new(PanickyEngine));
        let response = dispatcher.dispatch(params()).await;
        assert_eq!(response.error.as_deref(), Some("Unknown error occurred"));
    }
}
