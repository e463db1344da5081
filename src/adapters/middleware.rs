//! Axum middleware layers used by the gateway.
//!
//! These are lightweight composable layers attached to the `Router`: the
//! optional access control filter, request timing, and request-ID
//! propagation. They stay stateless except for reading the immutable
//! credential pair configured at startup.
use std::{sync::Arc, time::Instant};

use axum::{
    Json,
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::config::models::AccessCredentials;

/// Path exempt from access control so liveness probes never need credentials.
pub const HEALTH_PATH: &str = "/health";

/// Enforce HTTP Basic authentication on every route except the health check.
///
/// Installed only when a credential pair is configured; on mismatch or
/// absence the request is rejected before any downstream component runs.
pub async fn basic_auth_middleware(
    req: Request,
    next: Next,
    credentials: Arc<AccessCredentials>,
) -> Response {
    if req.uri().path() == HEALTH_PATH {
        return next.run(req).await;
    }

    if is_authorized(req.headers().get(header::AUTHORIZATION), &credentials) {
        next.run(req).await
    } else {
        tracing::debug!(path = %req.uri().path(), "Rejecting unauthenticated request");
        unauthorized_response()
    }
}

/// Create a cloneable closure wrapping [`basic_auth_middleware`].
pub fn create_basic_auth_middleware(
    credentials: Arc<AccessCredentials>,
) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
+ Clone {
    move |req, next| {
        let credentials = credentials.clone();
        Box::pin(async move { basic_auth_middleware(req, next, credentials).await })
    }
}

fn is_authorized(header: Option<&HeaderValue>, credentials: &AccessCredentials) -> bool {
    let Some(value) = header else {
        return false;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };
    let Some(encoded) = value.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = BASE64.decode(encoded.trim()) else {
        return false;
    };

    // Byte-for-byte match against the configured pair.
    decoded == format!("{}:{}", credentials.username, credentials.password).into_bytes()
}

fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"scout\"")],
        Json(serde_json::json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

/// Log start/end of a request including latency.
pub async fn request_timing_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    tracing::debug!("Started processing {} {}", method, uri);

    let response = next.run(req).await;
    let duration = start.elapsed();

    tracing::info!(
        "Completed {} {} - {} in {:?}",
        method,
        uri,
        response.status(),
        duration
    );

    response
}

/// Generate a per-request UUID and expose it via tracing plus `X-Request-ID`.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();

    let span = tracing::info_span!("request", request_id = %request_id);
    let _enter = span.enter();

    let mut response = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("X-Request-ID", header_value);
    }

    response
}
