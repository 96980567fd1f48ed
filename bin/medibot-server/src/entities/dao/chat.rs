use chrono::{DateTime, Utc};

/// A row in the `chat_entries` table. `id` grows with creation order.
#[derive(Debug, Clone)]
pub struct ChatEntry {
    pub id: i64,
    /// `None` for anonymous exchanges.
    pub user_id: Option<i64>,
    pub message: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewChatEntry {
    pub user_id: Option<i64>,
    pub message: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}
