//! SQLite user repository implementation.

use legalconnect_core::repository::user::UserRepository;
use legalconnect_types::error::RepositoryError;
use legalconnect_types::id::UserId;
use legalconnect_types::user::User;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, is_unique_violation, parse_column, parse_datetime, query_error};

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct UserRow {
    id: String,
    email: String,
    full_name: String,
    phone_number: Option<String>,
    user_type: String,
    role: String,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            phone_number: row.try_get("phone_number")?,
            user_type: row.try_get("user_type")?,
            role: row.try_get("role")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        Ok(User {
            id: parse_column("user id", &self.id)?,
            email: self.email,
            full_name: self.full_name,
            phone_number: self.phone_number,
            user_type: parse_column("user type", &self.user_type)?,
            role: parse_column("role", &self.role)?,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    UserRow::from_row(row).map_err(query_error)?.into_user()
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO users (id, email, full_name, phone_number, user_type, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.phone_number)
        .bind(user.user_type.to_string())
        .bind(user.role.to_string())
        .bind(format_datetime(&user.created_at))
        .bind(format_datetime(&user.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(user.clone()),
            Err(e) if is_unique_violation(&e) => Err(RepositoryError::Conflict(format!(
                "email '{}' already registered",
                user.email
            ))),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?
            .as_ref()
            .map(map_row)
            .transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?
            .as_ref()
            .map(map_row)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;
        rows.iter().map(map_row).collect()
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET email = ?, full_name = ?, phone_number = ?, user_type = ?, role = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.phone_number)
        .bind(user.user_type.to_string())
        .bind(user.role.to_string())
        .bind(format_datetime(&user.updated_at))
        .bind(user.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(user.clone())
    }
}
