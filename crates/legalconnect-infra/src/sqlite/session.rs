//! SQLite session repository. Only token hashes are stored.

use legalconnect_core::repository::session::SessionRepository;
use legalconnect_types::error::RepositoryError;
use legalconnect_types::id::SessionId;
use legalconnect_types::session::Session;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_column, parse_datetime, query_error};

#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<Session, RepositoryError> {
    let get = |column: &str| -> Result<String, RepositoryError> {
        row.try_get::<String, _>(column).map_err(query_error)
    };
    Ok(Session {
        id: parse_column("session id", &get("id")?)?,
        user_id: parse_column("user id", &get("user_id")?)?,
        token_hash: get("token_hash")?,
        created_at: parse_datetime(&get("created_at")?)?,
        expires_at: parse_datetime(&get("expires_at")?)?,
    })
}

impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, session: &Session) -> Result<Session, RepositoryError> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, token_hash, created_at, expires_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(&session.token_hash)
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.expires_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(session.clone())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, RepositoryError> {
        sqlx::query("SELECT * FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?
            .as_ref()
            .map(map_row)
            .transpose()
    }

    async fn delete(&self, id: &SessionId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::test_util::test_pool;
    use crate::sqlite::user::SqliteUserRepository;
    use legalconnect_core::repository::user::UserRepository;
    use legalconnect_types::user::User;

    #[tokio::test]
    async fn test_create_find_delete() {
        let pool = test_pool().await;
        let user = User::new_customer("c@x.in", "C");
        SqliteUserRepository::new(pool.clone())
            .create(&user)
            .await
            .unwrap();
        let repo = SqliteSessionRepository::new(pool);

        let session = Session::new(user.id, "abc123".into(), 30);
        repo.create(&session).await.unwrap();
        let found = repo.find_by_token_hash("abc123").await.unwrap().unwrap();
        assert_eq!(found, session);
        assert!(repo.find_by_token_hash("other").await.unwrap().is_none());

        repo.delete(&session.id).await.unwrap();
        assert!(repo.find_by_token_hash("abc123").await.unwrap().is_none());
        // Deleting again is fine.
        repo.delete(&session.id).await.unwrap();
    }
}
