use chrono::{DateTime, Utc};

/// A row in the `users` table.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Unique across the table.
    pub email: String,
    /// Argon2 PHC string; never the plain password.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied at signup; the store assigns `id`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
