//! Liveness probe that also checks the database.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::warn;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// `200 {"status": "ok", "database": "up"}` while the store answers,
/// `503` with `"database": "down"` otherwise.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server and database reachable", body = Value),
        (status = 503, description = "Database unreachable", body = Value),
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let (status, label, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok", "up"),
        Err(e) => {
            warn!(error = %e, "health check: database unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", "down")
        }
    };
    (
        status,
        Json(json!({
            "status": label,
            "database": database,
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::entities::SqliteStore;

    async fn state() -> Arc<AppState> {
        let store = SqliteStore::connect("sqlite::memory:").await.expect("store");
        Arc::new(AppState::new(Config::default(), store))
    }

    #[tokio::test]
    async fn reports_ok_with_live_database() {
        let (status, Json(body)) = get_health(State(state().await)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "up");
        assert!(!body["version"].as_str().unwrap_or("").is_empty());
    }

    #[tokio::test]
    async fn reports_unavailable_after_pool_closed() {
        let state = state().await;
        state.store.close().await;
        let (status, Json(body)) = get_health(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unavailable");
    }
}
