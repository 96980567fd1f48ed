use chrono::{DateTime, Utc};

/// A row in the `user_sessions` table: one logged-in browser.
#[derive(Debug, Clone)]
pub struct UserSession {
    /// UUID v4, carried in the session cookie.
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    /// The session no longer resolves at or after this instant.
    pub expires_at: DateTime<Utc>,
}
