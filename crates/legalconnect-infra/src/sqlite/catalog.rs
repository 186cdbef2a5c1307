//! SQLite catalog service repository.

use legalconnect_core::repository::catalog::CatalogRepository;
use legalconnect_types::catalog::CatalogService;
use legalconnect_types::error::RepositoryError;
use legalconnect_types::id::CatalogServiceId;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_column, parse_datetime, query_error};

#[derive(Clone)]
pub struct SqliteCatalogRepository {
    pool: DatabasePool,
}

impl SqliteCatalogRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<CatalogService, RepositoryError> {
    let get = |column: &str| -> Result<String, RepositoryError> {
        row.try_get::<String, _>(column).map_err(query_error)
    };
    Ok(CatalogService {
        id: parse_column("service id", &get("id")?)?,
        name: get("name")?,
        description: get("description")?,
        created_at: parse_datetime(&get("created_at")?)?,
        updated_at: parse_datetime(&get("updated_at")?)?,
    })
}

impl CatalogRepository for SqliteCatalogRepository {
    async fn create(&self, service: &CatalogService) -> Result<CatalogService, RepositoryError> {
        sqlx::query(
            "INSERT INTO catalog_services (id, name, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(service.id.to_string())
        .bind(&service.name)
        .bind(&service.description)
        .bind(format_datetime(&service.created_at))
        .bind(format_datetime(&service.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(service.clone())
    }

    async fn get_by_id(
        &self,
        id: &CatalogServiceId,
    ) -> Result<Option<CatalogService>, RepositoryError> {
        sqlx::query("SELECT * FROM catalog_services WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?
            .as_ref()
            .map(map_row)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<CatalogService>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM catalog_services ORDER BY created_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;
        rows.iter().map(map_row).collect()
    }

    async fn update(&self, service: &CatalogService) -> Result<CatalogService, RepositoryError> {
        let result = sqlx::query(
            "UPDATE catalog_services SET name = ?, description = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(format_datetime(&service.updated_at))
        .bind(service.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(service.clone())
    }

    async fn delete(&self, id: &CatalogServiceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog_services WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
