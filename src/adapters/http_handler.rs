//! HTTP surface of the gateway: route table, handlers, and the mapping
//! from core outcomes to response statuses.
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer};

use crate::{
    adapters::{
        middleware::{
            HEALTH_PATH, create_basic_auth_middleware, request_id_middleware,
            request_timing_middleware,
        },
        openapi,
    },
    config::models::AccessCredentials,
    core::{
        dispatcher::QueryDispatcher,
        request::{QueryRequestValidator, RequestValidationError},
    },
};

/// Shared per-process state handed to the handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: QueryDispatcher,
}

impl AppState {
    pub fn new(dispatcher: QueryDispatcher) -> Self {
        Self { dispatcher }
    }
}

/// Assemble the gateway router.
///
/// The access control filter is attached only when a credential pair was
/// configured; without one the gateway runs fully open except CORS.
pub fn build_router(state: AppState, credentials: Option<Arc<AccessCredentials>>) -> Router {
    let mut router = Router::new()
        .route(HEALTH_PATH, get(health_check))
        .route("/api/query", post(query_server))
        .route("/openapi.json", get(openapi_document))
        .route("/docs", get(docs))
        .with_state(state);

    if let Some(credentials) = credentials {
        router = router.layer(middleware::from_fn(create_basic_auth_middleware(
            credentials,
        )));
    }

    router
        .layer(middleware::from_fn(request_timing_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
}

/// Liveness probe. Always reachable, even with access control active.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Query a game server and wrap the outcome in the response envelope.
///
/// Validation failures never reach the dispatcher; engine failures map to
/// a client-error status with the message inside the envelope.
async fn query_server(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let value = match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            return validation_response(RequestValidationError::malformed_body(
                rejection.body_text(),
            ));
        }
    };

    match QueryRequestValidator::validate(&value) {
        Ok(params) => {
            let envelope = state.dispatcher.dispatch(params).await;
            let status = if envelope.success {
                StatusCode::OK
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, Json(envelope)).into_response()
        }
        Err(error) => validation_response(error),
    }
}

fn validation_response(error: RequestValidationError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "success": false,
            "error": { "issues": error.issues },
        })),
    )
        .into_response()
}

/// Serve the OpenAPI specification.
async fn openapi_document() -> Json<serde_json::Value> {
    Json(openapi::OPENAPI_DOCUMENT.clone())
}

/// Serve the interactive API documentation.
async fn docs() -> Html<String> {
    Html(openapi::docs_page())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{body::Body, extract::Request, http::header};
    use http_body_util::BodyExt;
    use tower::ServiceExt; // for oneshot

    use super::*;
    use crate::{
        core::query::{QueryParams, QueryResult},
        ports::query_engine::{QueryEngine, QueryEngineError, QueryEngineResult},
    };

    struct RefusingEngine;

    #[async_trait]
    impl QueryEngine for RefusingEngine {
        async fn query(&self, _params: &QueryParams) -> QueryEngineResult<QueryResult> {
            Err(QueryEngineError::Query("Connection refused".to_string()))
        }
    }

    fn app() -> Router {
        let dispatcher = QueryDispatcher::new(Arc::new(RefusingEngine));
        build_router(AppState::new(dispatcher), None)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check_reports_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "status": "ok" })
        );
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        assert_eq!(doc["openapi"], "3.0.0");
    }

    #[tokio::test]
    async fn docs_page_is_served_as_html() {
        let response = app()
            .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }

    #[tokio::test]
    async fn malformed_json_body_is_rejected_with_issue_shape() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/query")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["error"]["issues"][0]["field"], "body");
    }

    #[tokio::test]
    async fn engine_failure_maps_to_bad_request_envelope() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/query")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"type":"minecraft","host":"play.example.com"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "success": false, "error": "Connection refused" })
        );
    }
}
