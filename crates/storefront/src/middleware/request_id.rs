//! Request ID middleware for request tracing and correlation.
//!
//! Reuses an upstream `x-request-id` (from a reverse proxy) when it looks
//! sane, otherwise generates a UUID v4. The ID is recorded on the
//! `http_request` span, set as a Sentry tag, and echoed back in the response.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID accepted as-is.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(upstream_id)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// An upstream ID worth keeping: non-empty, bounded, and plain ASCII.
fn upstream_id(value: &HeaderValue) -> Option<String> {
    let id = value.to_str().ok()?.trim();

    let acceptable = !id.is_empty()
        && id.len() <= MAX_UPSTREAM_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':'));

    acceptable.then(|| id.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(request_id_middleware))
    }

    async fn echoed_id(incoming: Option<&str>) -> String {
        let mut request = Request::get("/");
        if let Some(id) = incoming {
            request = request.header(REQUEST_ID_HEADER, id);
        }
        let response = app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_generates_uuid_when_missing() {
        let id = echoed_id(None).await;
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn test_keeps_upstream_id() {
        assert_eq!(echoed_id(Some("cf-ray:7d1a2b3c")).await, "cf-ray:7d1a2b3c");
    }

    #[tokio::test]
    async fn test_replaces_unusable_upstream_id() {
        let oversized = "a".repeat(MAX_UPSTREAM_ID_LEN + 1);
        for bad in ["", "has spaces", "<script>", oversized.as_str()] {
            let id = echoed_id(Some(bad)).await;
            assert!(Uuid::parse_str(&id).is_ok(), "kept {bad:?}");
        }
    }
}
