//! SQLite review repository implementation.

use legalconnect_core::repository::review::{ReviewFilter, ReviewRepository};
use legalconnect_types::error::RepositoryError;
use legalconnect_types::review::Review;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, is_unique_violation, parse_column, parse_datetime, query_error};

#[derive(Clone)]
pub struct SqliteReviewRepository {
    pool: DatabasePool,
}

impl SqliteReviewRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<Review, RepositoryError> {
    let get_str = |column: &str| -> Result<String, RepositoryError> {
        row.try_get::<String, _>(column).map_err(query_error)
    };
    let get_rating = |column: &str| -> Result<u8, RepositoryError> {
        let value: i64 = row.try_get(column).map_err(query_error)?;
        u8::try_from(value)
            .map_err(|_| RepositoryError::Query(format!("{column} out of range: {value}")))
    };

    Ok(Review {
        id: parse_column("review id", &get_str("id")?)?,
        customer_id: parse_column("customer id", &get_str("customer_id")?)?,
        provider_id: parse_column("provider id", &get_str("provider_id")?)?,
        service_request_id: parse_column("request id", &get_str("service_request_id")?)?,
        rating: get_rating("rating")?,
        comment: get_str("comment")?,
        service_quality: get_rating("service_quality")?,
        communication: get_rating("communication")?,
        timeliness: get_rating("timeliness")?,
        created_at: parse_datetime(&get_str("created_at")?)?,
    })
}

impl ReviewRepository for SqliteReviewRepository {
    async fn create(&self, review: &Review) -> Result<Review, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO reviews (id, customer_id, provider_id, service_request_id, rating, comment, service_quality, communication, timeliness, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(review.id.to_string())
        .bind(review.customer_id.to_string())
        .bind(review.provider_id.to_string())
        .bind(review.service_request_id.to_string())
        .bind(i64::from(review.rating))
        .bind(&review.comment)
        .bind(i64::from(review.service_quality))
        .bind(i64::from(review.communication))
        .bind(i64::from(review.timeliness))
        .bind(format_datetime(&review.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(review.clone()),
            Err(e) if is_unique_violation(&e) => Err(RepositoryError::Conflict(format!(
                "request {} already reviewed",
                review.service_request_id
            ))),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn list(&self, filter: Option<ReviewFilter>) -> Result<Vec<Review>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let mut sql = String::from("SELECT * FROM reviews");
        let mut conditions: Vec<&str> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(customer_id) = filter.customer_id {
            conditions.push("customer_id = ?");
            binds.push(customer_id.to_string());
        }
        if let Some(provider_id) = filter.provider_id {
            conditions.push("provider_id = ?");
            binds.push(provider_id.to_string());
        }
        if let Some(request_id) = filter.service_request_id {
            conditions.push("service_request_id = ?");
            binds.push(request_id.to_string());
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {}", limit.max(0)));
        }

        let mut query = sqlx::query(&sql);
        for value in &binds {
            query = query.bind(value);
        }
        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;
        rows.iter().map(map_row).collect()
    }
}
