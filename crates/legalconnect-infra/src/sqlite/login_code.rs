//! SQLite login code repository. Only code hashes are stored.

use legalconnect_core::repository::login_code::LoginCodeRepository;
use legalconnect_types::error::RepositoryError;
use legalconnect_types::session::LoginCode;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_column, parse_datetime, query_error};

#[derive(Clone)]
pub struct SqliteLoginCodeRepository {
    pool: DatabasePool,
}

impl SqliteLoginCodeRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<LoginCode, RepositoryError> {
    let get = |column: &str| -> Result<String, RepositoryError> {
        row.try_get::<String, _>(column).map_err(query_error)
    };
    let attempts: i64 = row.try_get("attempts").map_err(query_error)?;
    Ok(LoginCode {
        id: parse_column("login code id", &get("id")?)?,
        email: get("email")?,
        full_name: get("full_name")?,
        redirect_to: row.try_get("redirect_to").map_err(query_error)?,
        code_hash: get("code_hash")?,
        attempts: u32::try_from(attempts).unwrap_or(u32::MAX),
        created_at: parse_datetime(&get("created_at")?)?,
        expires_at: parse_datetime(&get("expires_at")?)?,
    })
}

impl LoginCodeRepository for SqliteLoginCodeRepository {
    async fn create(&self, code: &LoginCode) -> Result<LoginCode, RepositoryError> {
        sqlx::query(
            "INSERT INTO login_codes (id, email, full_name, redirect_to, code_hash, attempts, created_at, expires_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(code.id.to_string())
        .bind(&code.email)
        .bind(&code.full_name)
        .bind(&code.redirect_to)
        .bind(&code.code_hash)
        .bind(i64::from(code.attempts))
        .bind(format_datetime(&code.created_at))
        .bind(format_datetime(&code.expires_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(code.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<LoginCode>, RepositoryError> {
        sqlx::query("SELECT * FROM login_codes WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?
            .as_ref()
            .map(map_row)
            .transpose()
    }

    async fn update(&self, code: &LoginCode) -> Result<LoginCode, RepositoryError> {
        let result = sqlx::query("UPDATE login_codes SET attempts = ? WHERE id = ?")
            .bind(i64::from(code.attempts))
            .bind(code.id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(code.clone())
    }

    async fn delete_for_email(&self, email: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM login_codes WHERE email = ?")
            .bind(email)
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
    use legalconnect_types::session::LoginRequest;

    fn pending(email: &str) -> LoginCode {
        let request = LoginRequest {
            email: email.into(),
            full_name: "Asha".into(),
            redirect_to: Some("/request-service".into()),
        };
        LoginCode::new(&request, "hash".into(), 15)
    }

    #[tokio::test]
    async fn test_create_find_update_delete() {
        let repo = SqliteLoginCodeRepository::new(test_pool().await);
        let mut code = pending("asha@x.in");
        repo.create(&code).await.unwrap();

        let found = repo.find_by_email("asha@x.in").await.unwrap().unwrap();
        assert_eq!(found, code);
        assert!(repo.find_by_email("other@x.in").await.unwrap().is_none());

        code.attempts = 3;
        repo.update(&code).await.unwrap();
        let found = repo.find_by_email("asha@x.in").await.unwrap().unwrap();
        assert_eq!(found.attempts, 3);

        repo.delete_for_email("asha@x.in").await.unwrap();
        assert!(repo.find_by_email("asha@x.in").await.unwrap().is_none());
        assert!(matches!(repo.update(&code).await, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_one_pending_code_per_email() {
        let repo = SqliteLoginCodeRepository::new(test_pool().await);
        repo.create(&pending("asha@x.in")).await.unwrap();
        assert!(repo.create(&pending("asha@x.in")).await.is_err());
    }
}
