use crate::entities::ChatEntry;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /get_response`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GetResponseRequest {
    /// The user's message. Missing, null, empty or whitespace-only is rejected.
    #[serde(default)]
    pub message: Option<String>,
}

/// Successful body for `POST /get_response`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GetResponseBody {
    pub response: String,
}

/// One row of `GET /recent_chats`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatEntryResponse {
    pub id: i64,
    pub user_id: Option<i64>,
    pub message: String,
    pub response: String,
}

impl ChatEntry {
    pub fn to_response(&self) -> ChatEntryResponse {
        ChatEntryResponse {
            id: self.id,
            user_id: self.user_id,
            message: self.message.clone(),
            response: self.response.clone(),
        }
    }
}
