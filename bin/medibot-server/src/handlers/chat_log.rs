//! Best-effort chat log writer.
//!
//! Persisting an exchange must never change the reply already produced, so
//! failures are logged here and dropped.

use chrono::Utc;
use tracing::{debug, error};

use crate::entities::{ChatStore, NewChatEntry};

/// Persist one `(user, message, response)` exchange. `user_id` is `None` for
/// anonymous callers.
pub async fn record_exchange<S: ChatStore>(
    store: &S,
    user_id: Option<i64>,
    message: &str,
    response: &str,
) {
    let entry = NewChatEntry {
        user_id,
        message: message.to_owned(),
        response: response.to_owned(),
        created_at: Utc::now(),
    };
    match store.append_entry(entry).await {
        Ok(id) => debug!(chat_entry_id = id, ?user_id, "chat entry persisted"),
        Err(e) => error!(error = %e, ?user_id, "failed to persist chat entry"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ChatEntry, SqliteStore};
    use tracing_test::traced_test;

    struct FailingStore;

    impl ChatStore for FailingStore {
        async fn append_entry(&self, _entry: NewChatEntry) -> Result<i64, sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }

        async fn recent_entries(&self, _limit: i64) -> Result<Vec<ChatEntry>, sqlx::Error> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn store_failure_is_logged_and_swallowed() {
        record_exchange(&FailingStore, Some(3), "hi", "Hello!").await;
        assert!(logs_contain("failed to persist chat entry"));
    }

    #[tokio::test]
    async fn exchange_is_written() {
        let store = SqliteStore::connect("sqlite::memory:").await.expect("store");
        record_exchange(&store, None, "I have a cough", "How long?").await;
        let entries = store.recent_entries(50).await.expect("recent");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, None);
        assert_eq!(entries[0].message, "I have a cough");
        assert_eq!(entries[0].response, "How long?");
    }
}
