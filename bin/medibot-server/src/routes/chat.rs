//! Chat routes: reply generation and chat history.
//!
//! `POST /get_response` runs the keyword responder on the message and
//! records the exchange in the chat log. Logging is best-effort: a store
//! failure is logged and the reply is returned unchanged.

use std::any::Any;
use std::panic;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use medibot_responder::Intent;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::entities::ChatStore;
use crate::error::ServerError;
use crate::handlers::chat_log;
use crate::middleware::auth::MaybeUser;
use crate::schemas::chat::{ChatEntryResponse, GetResponseBody, GetResponseRequest};
use crate::state::{AppState, Classifier};

pub const NO_MESSAGE: &str = "No message provided";

/// How many entries `GET /recent_chats` returns.
pub const RECENT_CHATS_LIMIT: i64 = 50;

#[derive(OpenApi)]
#[openapi(
    paths(get_response, recent_chats),
    components(schemas(GetResponseRequest, GetResponseBody, ChatEntryResponse))
)]
pub struct ChatApi;

/// Routes open to anonymous callers.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/get_response", post(get_response))
}

/// Routes that need a logged-in session; the caller adds the login layer.
pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/recent_chats", get(recent_chats))
}

/// Reply to one chat message.
#[utoipa::path(
    post,
    path = "/get_response",
    tag = "chat",
    request_body = GetResponseRequest,
    responses(
        (status = 200, description = "Reply selected", body = GetResponseBody),
        (status = 400, description = "No message provided or malformed JSON"),
        (status = 500, description = "Reply generation failed"),
    )
)]
pub async fn get_response(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    payload: Result<Json<GetResponseRequest>, JsonRejection>,
) -> Result<Json<GetResponseBody>, ServerError> {
    let Json(req) = payload?;
    let message = req.message.as_deref().map(str::trim).unwrap_or_default();
    if message.is_empty() {
        return Err(ServerError::BadRequest(NO_MESSAGE.into()));
    }

    let intent = generate_reply(state.classifier, message)?;
    let user_id = user.map(|u| u.id);
    info!(intent = intent.label(), ?user_id, message_len = message.len(), "reply selected");

    if state.config.chat_log_enabled {
        chat_log::record_exchange(state.store.as_ref(), user_id, message, intent.reply()).await;
    } else {
        debug!("chat log disabled; exchange not persisted");
    }

    Ok(Json(GetResponseBody {
        response: intent.reply().to_owned(),
    }))
}

/// The most recent chat entries, newest first.
#[utoipa::path(
    get,
    path = "/recent_chats",
    tag = "chat",
    responses(
        (status = 200, description = "Up to 50 entries, newest first", body = Vec<ChatEntryResponse>),
        (status = 401, description = "Login required"),
        (status = 500, description = "Server error"),
    )
)]
pub async fn recent_chats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatEntryResponse>>, ServerError> {
    let entries = state.store.recent_entries(RECENT_CHATS_LIMIT).await?;
    Ok(Json(entries.iter().map(|e| e.to_response()).collect()))
}

/// Run the classifier, turning a panic into a reportable error.
fn generate_reply(classifier: Classifier, message: &str) -> Result<Intent, ServerError> {
    let Classifier(classify) = classifier;
    panic::catch_unwind(move || classify(message))
        .map_err(|payload| ServerError::Responder(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "reply generation failed".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_generation_matches_responder() {
        let intent = generate_reply(Classifier::default(), "I have a fever and cough").expect("reply");
        assert_eq!(intent, Intent::Symptom);
    }

    #[test]
    fn classifier_panic_becomes_responder_error() {
        fn broken(_: &str) -> Intent {
            panic!("no rule table loaded")
        }
        match generate_reply(Classifier(broken), "hello") {
            Err(ServerError::Responder(detail)) => assert_eq!(detail, "no rule table loaded"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn panic_payloads_become_messages() {
        let static_str: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(static_str.as_ref()), "boom");

        let owned: Box<dyn Any + Send> = Box::new(String::from("kaboom"));
        assert_eq!(panic_message(owned.as_ref()), "kaboom");

        let other: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(other.as_ref()), "reply generation failed");
    }
}
