//! SQLite audit log repository. Append and read only.

use legalconnect_core::repository::audit::AuditLogRepository;
use legalconnect_types::audit::AuditLogEntry;
use legalconnect_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_column, parse_datetime, query_error};

#[derive(Clone)]
pub struct SqliteAuditLogRepository {
    pool: DatabasePool,
}

impl SqliteAuditLogRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<AuditLogEntry, RepositoryError> {
    let get = |column: &str| -> Result<String, RepositoryError> {
        row.try_get::<String, _>(column).map_err(query_error)
    };
    Ok(AuditLogEntry {
        id: parse_column("audit id", &get("id")?)?,
        admin_email: get("admin_email")?,
        action: parse_column("audit action", &get("action")?)?,
        target_id: get("target_id")?,
        target_name: get("target_name")?,
        details: get("details")?,
        created_at: parse_datetime(&get("created_at")?)?,
    })
}

impl AuditLogRepository for SqliteAuditLogRepository {
    async fn append(&self, entry: &AuditLogEntry) -> Result<AuditLogEntry, RepositoryError> {
        sqlx::query(
            "INSERT INTO audit_logs (id, admin_email, action, target_id, target_name, details, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.id.to_string())
        .bind(&entry.admin_email)
        .bind(entry.action.label())
        .bind(&entry.target_id)
        .bind(&entry.target_name)
        .bind(&entry.details)
        .bind(format_datetime(&entry.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(entry.clone())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<AuditLogEntry>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM audit_logs ORDER BY created_at DESC LIMIT ?")
            .bind(limit.max(0))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;
        rows.iter().map(map_row).collect()
    }
}
