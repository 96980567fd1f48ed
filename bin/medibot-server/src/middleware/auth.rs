//! Cookie-backed login sessions.
//!
//! [`session_middleware`] runs on every request: when the `medibot_session`
//! cookie names a live session it inserts the owner as an [`AuthUser`]
//! request extension. [`require_login`] is a route layer that rejects
//! requests without one.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, Request};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::entities::{SessionStore, User};
use crate::error::ServerError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "medibot_session";

/// The logged-in user of the current request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    /// Token of the session that authenticated this request.
    pub session_token: String,
}

impl AuthUser {
    fn from_user(user: User, session_token: String) -> Self {
        Self {
            id: user.id,
            username: user.username,
            session_token,
        }
    }
}

/// Extracts the [`AuthUser`] when there is one; never rejects.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<AuthUser>().cloned()))
    }
}

pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = session_token(req.headers()) {
        match state.store.find_session_user(&token, Utc::now()).await {
            Ok(Some(user)) => {
                req.extensions_mut().insert(AuthUser::from_user(user, token));
            }
            Ok(None) => debug!("session cookie is unknown or expired"),
            Err(e) => warn!(error = %e, "failed to resolve session; treating request as anonymous"),
        }
    }
    next.run(req).await
}

pub async fn require_login(req: Request<Body>, next: Next) -> Result<Response, ServerError> {
    if req.extensions().get::<AuthUser>().is_none() {
        return Err(ServerError::Unauthorized("login required".into()));
    }
    Ok(next.run(req).await)
}

/// Session token from the `Cookie` header(s). Only well-formed UUIDs are
/// returned, so junk never reaches the store.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
        .map(|token| token.to_string())
}

/// `Set-Cookie` value that installs `token` for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn expired_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(header::COOKIE, HeaderValue::from_str(cookie).expect("header"));
        map
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let token = Uuid::new_v4().to_string();
        let map = headers(&format!("theme=dark; {SESSION_COOKIE}={token}; lang=en"));
        assert_eq!(session_token(&map), Some(token));
    }

    #[test]
    fn non_uuid_token_is_ignored() {
        assert_eq!(session_token(&headers(&format!("{SESSION_COOKIE}=' OR 1=1"))), None);
        assert_eq!(session_token(&headers(&format!("{SESSION_COOKIE}="))), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie("abc", 3600, true);
        assert!(cookie.starts_with("medibot_session=abc;"));
        assert!(cookie.contains("; Max-Age=3600"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.ends_with("; Secure"));
        assert!(expired_session_cookie(false).contains("Max-Age=0"));
        assert!(!expired_session_cookie(false).contains("Secure"));
    }
}
