//! Axum router construction.
//!
//! [`build`] assembles the single application router:
//! - middleware layers (trace-ID span, CORS, session resolution)
//! - optional Swagger UI / OpenAPI spec endpoint (`MEDIBOT_ENABLE_SWAGGER`)
//! - health, chat and auth routes; `/recent_chats` and `/logout` need a login
//! - optional static front-end served for every other path (`MEDIBOT_STATIC_DIR`)

mod auth;
mod chat;
pub mod doc;
mod health;


use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{auth as session, cors, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .merge(chat::protected_router())
        .merge(auth::protected_router())
        .route_layer(middleware::from_fn(session::require_login));

    let mut app = Router::new()
        .merge(health::router())
        .merge(chat::router())
        .merge(auth::router())
        .merge(protected);

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    if let Some(dir) = &state.config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::session_middleware,
        ))
        .layer(cors::cors_layer(state.clone()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace::trace_middleware,
        ))
        .with_state(state)
}
