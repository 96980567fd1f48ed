//! Signup, login and logout.
//!
//! These routes answer with a [`Flash`] body instead of an error: an
//! unknown email or a duplicate signup is a normal outcome the front-end
//! shows to the user.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Form, Json, Router};
use chrono::{Duration, Utc};
use tracing::{debug, info, warn};
use utoipa::OpenApi;
use uuid::Uuid;
use validator::Validate;

use crate::entities::{NewUser, SessionStore, UserSession, UserStore};
use crate::error::ServerError;
use crate::handlers::password;
use crate::middleware::auth::{expired_session_cookie, session_cookie, AuthUser};
use crate::schemas::auth::{Flash, FlashCategory, LoginForm, SignupForm};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(signup, login, logout),
    components(schemas(SignupForm, LoginForm, Flash, FlashCategory))
)]
pub struct AuthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Routes that need a logged-in session; the caller adds the login layer.
pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/logout", get(logout))
}

fn flash(status: StatusCode, flash: Flash) -> (StatusCode, Json<Flash>) {
    (status, Json(flash))
}

fn already_registered() -> (StatusCode, Json<Flash>) {
    flash(
        StatusCode::CONFLICT,
        Flash::new(FlashCategory::Warning, "Email already registered. Please login.").redirect("/login"),
    )
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/signup",
    tag = "auth",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Account created", body = Flash),
        (status = 400, description = "A field was empty", body = Flash),
        (status = 409, description = "Email already registered", body = Flash),
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignupForm>,
) -> Result<(StatusCode, Json<Flash>), ServerError> {
    let form = form.normalized();
    if form.validate().is_err() {
        return Ok(flash(
            StatusCode::BAD_REQUEST,
            Flash::new(FlashCategory::Warning, "Please fill all fields.").redirect("/signup"),
        ));
    }

    if state.store.find_user_by_email(&form.email).await?.is_some() {
        info!("signup rejected: email already registered");
        return Ok(already_registered());
    }

    let plain = form.password;
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|e| ServerError::Internal(format!("password hashing task failed: {e}")))??;

    let created = state
        .store
        .create_user(NewUser {
            username: form.username,
            email: form.email,
            password_hash,
            created_at: Utc::now(),
        })
        .await;

    match created {
        Ok(user) => {
            info!(user_id = user.id, "user signed up");
            Ok(flash(
                StatusCode::CREATED,
                Flash::new(FlashCategory::Success, "Signup successful! Please login.").redirect("/login"),
            ))
        }
        // Lost a race with a concurrent signup for the same email.
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Ok(already_registered()),
        Err(e) => Err(e.into()),
    }
}

/// Log in and receive a session cookie.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Logged in; session cookie set", body = Flash),
        (status = 401, description = "Invalid credentials", body = Flash),
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ServerError> {
    let email = form.email.trim();
    let user = state.store.find_user_by_email(email).await?;

    let verified = match &user {
        Some(user) => {
            let plain = form.password.clone();
            let stored = user.password_hash.clone();
            tokio::task::spawn_blocking(move || password::verify_password(&plain, &stored))
                .await
                .map_err(|e| ServerError::Internal(format!("password check task failed: {e}")))?
        }
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        warn!("login failed: invalid credentials");
        return Ok(flash(
            StatusCode::UNAUTHORIZED,
            Flash::new(FlashCategory::Danger, "Invalid credentials.").redirect("/login"),
        )
        .into_response());
    };

    let now = Utc::now();
    let purged = state.store.purge_expired_sessions(now).await?;
    if purged > 0 {
        debug!(purged, "expired sessions removed");
    }

    let ttl = state.config.session_ttl_secs;
    let token = Uuid::new_v4().to_string();
    state
        .store
        .create_session(UserSession {
            token: token.clone(),
            user_id: user.id,
            created_at: now,
            expires_at: now + Duration::seconds(ttl),
        })
        .await?;
    info!(user_id = user.id, ttl_secs = ttl, "user logged in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&token, ttl, state.config.cookie_secure))],
        Json(Flash::new(FlashCategory::Success, "Logged in successfully.").redirect("/")),
    )
        .into_response())
}

/// End the current session.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out; session cookie cleared", body = Flash),
        (status = 401, description = "Login required"),
    )
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, ServerError> {
    state.store.delete_session(&user.session_token).await?;
    info!(user_id = user.id, username = %user.username, "user logged out");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, expired_session_cookie(state.config.cookie_secure))],
        Json(Flash::new(FlashCategory::Info, "Logged out.").redirect("/login")),
    )
        .into_response())
}
