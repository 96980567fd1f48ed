use crate::state::AppState;
use axum::{
    body::{Body, HttpBody},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

pub static X_TRACE_ID: &str = "x-trace-id";

/// JSON bodies up to this many bytes are logged when body logging is on.
const MAX_LOGGED_BODY: usize = 1024;

/// Wrap every request in an `http_request` span keyed by a trace ID.
///
/// An incoming `x-trace-id` UUID is reused, otherwise one is generated; it
/// is echoed on the request seen by handlers and on the response.
pub async fn trace_middleware(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    let log_bodies = state.config.log_bodies;

    async move {
        info!("→ request started");
        let trace_header = HeaderValue::from_str(&trace_id.to_string()).ok();

        let mut req = if log_bodies {
            let (parts, body) = req.into_parts();
            let body = log_body("request", &parts.headers, body).await;
            Request::from_parts(parts, body)
        } else {
            req
        };
        if let Some(value) = &trace_header {
            req.headers_mut().insert(X_TRACE_ID, value.clone());
        }

        let response = next.run(req).await;

        let mut response = if log_bodies {
            let (parts, body) = response.into_parts();
            let body = log_body("response", &parts.headers, body).await;
            Response::from_parts(parts, body)
        } else {
            response
        };
        if let Some(value) = trace_header {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Log a small JSON body and hand back an equivalent one. Anything else,
/// including form bodies (which carry passwords) and bodies without a known
/// size below [`MAX_LOGGED_BODY`], passes through unread.
async fn log_body(direction: &str, headers: &HeaderMap, body: Body) -> Body {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !content_type.contains("application/json") || !fits_log_limit(&body) {
        if let Some(size) = body.size_hint().upper().filter(|n| *n > 0) {
            debug!(direction, content_type, size, "body not logged");
        }
        return body;
    }

    let bytes = match axum::body::to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, direction, "failed to buffer body");
            return Body::empty();
        }
    };
    if let Ok(text) = std::str::from_utf8(&bytes) {
        info!(direction, body = text, "body");
    }
    Body::from(bytes)
}

/// True when the body declares an upper size bound within [`MAX_LOGGED_BODY`].
fn fits_log_limit(body: &Body) -> bool {
    body.size_hint()
        .upper()
        .is_some_and(|n| n <= MAX_LOGGED_BODY as u64)
}
