use crate::entities::dao::{NewUser, User};
use crate::entities::{parse_timestamp, SqliteStore};
use std::future::Future;

pub trait UserStore: Send + Sync + 'static {
    /// Insert a user. Fails with a unique violation when the email exists.
    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<User, sqlx::Error>> + Send;
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, sqlx::Error>> + Send;
}

pub(crate) type UserRow = (i64, String, String, String, String);

pub(crate) fn user_from_row((id, username, email, password_hash, created_at): UserRow) -> User {
    User {
        id,
        username,
        email,
        password_hash,
        created_at: parse_timestamp(&created_at, "users.created_at"),
    }
}

impl UserStore for SqliteStore {
    async fn create_user(&self, user: NewUser) -> Result<User, sqlx::Error> {
        let created_at = user.created_at.to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;
        Ok(User {
            id: result.last_insert_rowid(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, email, password_hash, created_at \
             FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(user_from_row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: "asha".into(),
            email: email.into(),
            password_hash: "$argon2id$stub".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_then_find_by_email() {
        let store = SqliteStore::connect("sqlite::memory:").await.expect("store");
        let created = store.create_user(new_user("asha@example.com")).await.expect("create");
        let found = store
            .find_user_by_email("asha@example.com")
            .await
            .expect("query")
            .expect("user exists");
        assert_eq!(found.id, created.id);
        assert_eq!(found.username, "asha");
        assert!(store.find_user_by_email("nobody@example.com").await.expect("query").is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = SqliteStore::connect("sqlite::memory:").await.expect("store");
        store.create_user(new_user("dup@example.com")).await.expect("first insert");
        let err = store
            .create_user(new_user("dup@example.com"))
            .await
            .expect_err("second insert must fail");
        match err {
            sqlx::Error::Database(db) => assert!(db.is_unique_violation()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
