use crate::entities::dao::{User, UserSession};
use crate::entities::user::{user_from_row, UserRow};
use crate::entities::SqliteStore;
use chrono::{DateTime, Utc};
use std::future::Future;

pub trait SessionStore: Send + Sync + 'static {
    fn create_session(
        &self,
        session: UserSession,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
    /// The user owning `token`, if the session exists and has not expired at `now`.
    fn find_session_user(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<User>, sqlx::Error>> + Send;
    fn delete_session(&self, token: &str) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
    /// Remove every session expired at `now`; returns how many were removed.
    fn purge_expired_sessions(
        &self,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<u64, sqlx::Error>> + Send;
}

impl SessionStore for SqliteStore {
    async fn create_session(&self, session: UserSession) -> Result<(), sqlx::Error> {
        let created_at = session.created_at.to_rfc3339();
        sqlx::query(
            "INSERT INTO user_sessions (token, user_id, created_at, expires_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(&created_at)
        .bind(session.expires_at.timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_session_user(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, sqlx::Error> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT u.id, u.username, u.email, u.password_hash, u.created_at \
             FROM user_sessions s JOIN users u ON u.id = s.user_id \
             WHERE s.token = ?1 AND s.expires_at > ?2",
        )
        .bind(token)
        .bind(now.timestamp())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(user_from_row))
    }

    async fn delete_session(&self, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM user_sessions WHERE token = ?1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE expires_at <= ?1")
            .bind(now.timestamp())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
