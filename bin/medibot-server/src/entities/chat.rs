use crate::entities::dao::{ChatEntry, NewChatEntry};
use crate::entities::{parse_timestamp, SqliteStore};
use std::future::Future;

pub trait ChatStore: Send + Sync + 'static {
    /// Insert one exchange and return its id.
    fn append_entry(
        &self,
        entry: NewChatEntry,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;
    /// The `limit` most recently created entries, newest first.
    fn recent_entries(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<ChatEntry>, sqlx::Error>> + Send;
}

impl ChatStore for SqliteStore {
    async fn append_entry(&self, entry: NewChatEntry) -> Result<i64, sqlx::Error> {
        let created_at = entry.created_at.to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO chat_entries (user_id, message, response, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(entry.user_id)
        .bind(&entry.message)
        .bind(&entry.response)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn recent_entries(&self, limit: i64) -> Result<Vec<ChatEntry>, sqlx::Error> {
        let rows: Vec<(i64, Option<i64>, String, String, String)> = sqlx::query_as(
            "SELECT id, user_id, message, response, created_at \
             FROM chat_entries ORDER BY id DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, user_id, message, response, created_at)| ChatEntry {
                id,
                user_id,
                message,
                response,
                created_at: parse_timestamp(&created_at, "chat_entries.created_at"),
            })
            .collect())
    }
}
