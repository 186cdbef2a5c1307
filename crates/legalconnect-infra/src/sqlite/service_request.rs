//! SQLite service request repository implementation.

use legalconnect_core::repository::SortOrder;
use legalconnect_core::repository::service_request::{
    ServiceRequestFilter, ServiceRequestRepository,
};
use legalconnect_types::error::RepositoryError;
use legalconnect_types::id::ServiceRequestId;
use legalconnect_types::request::ServiceRequest;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{
    format_datetime, from_json, parse_column, parse_datetime, parse_optional_datetime,
    query_error, to_json,
};

#[derive(Clone)]
pub struct SqliteServiceRequestRepository {
    pool: DatabasePool,
}

impl SqliteServiceRequestRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct RequestRow {
    id: String,
    customer_id: Option<String>,
    provider_id: Option<String>,
    service_type: String,
    title: String,
    description: String,
    budget_range: String,
    urgency: String,
    preferred_communication: String,
    customer_phone: String,
    customer_email: String,
    documents: String,
    status: String,
    accepted_at: Option<String>,
    completed_at: Option<String>,
    created_at: String,
    updated_at: String,
}

impl RequestRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            provider_id: row.try_get("provider_id")?,
            service_type: row.try_get("service_type")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            budget_range: row.try_get("budget_range")?,
            urgency: row.try_get("urgency")?,
            preferred_communication: row.try_get("preferred_communication")?,
            customer_phone: row.try_get("customer_phone")?,
            customer_email: row.try_get("customer_email")?,
            documents: row.try_get("documents")?,
            status: row.try_get("status")?,
            accepted_at: row.try_get("accepted_at")?,
            completed_at: row.try_get("completed_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_request(self) -> Result<ServiceRequest, RepositoryError> {
        Ok(ServiceRequest {
            id: parse_column("request id", &self.id)?,
            customer_id: self
                .customer_id
                .as_deref()
                .map(|id| parse_column("customer id", id))
                .transpose()?,
            provider_id: self
                .provider_id
                .as_deref()
                .map(|id| parse_column("provider id", id))
                .transpose()?,
            service_type: self.service_type,
            title: self.title,
            description: self.description,
            budget_range: self.budget_range,
            urgency: parse_column("urgency", &self.urgency)?,
            preferred_communication: parse_column(
                "preferred communication",
                &self.preferred_communication,
            )?,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            documents: from_json("documents", &self.documents)?,
            status: parse_column("status", &self.status)?,
            accepted_at: parse_optional_datetime(self.accepted_at.as_deref())?,
            completed_at: parse_optional_datetime(self.completed_at.as_deref())?,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<ServiceRequest, RepositoryError> {
    RequestRow::from_row(row).map_err(query_error)?.into_request()
}

impl ServiceRequestRepository for SqliteServiceRequestRepository {
    async fn create(&self, request: &ServiceRequest) -> Result<ServiceRequest, RepositoryError> {
        sqlx::query(
            "INSERT INTO service_requests (id, customer_id, provider_id, service_type, title, description, budget_range, urgency, preferred_communication, customer_phone, customer_email, documents, status, accepted_at, completed_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(request.id.to_string())
        .bind(request.customer_id.map(|id| id.to_string()))
        .bind(request.provider_id.map(|id| id.to_string()))
        .bind(&request.service_type)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.budget_range)
        .bind(request.urgency.to_string())
        .bind(request.preferred_communication.to_string())
        .bind(&request.customer_phone)
        .bind(&request.customer_email)
        .bind(to_json(&request.documents)?)
        .bind(request.status.to_string())
        .bind(request.accepted_at.as_ref().map(format_datetime))
        .bind(request.completed_at.as_ref().map(format_datetime))
        .bind(format_datetime(&request.created_at))
        .bind(format_datetime(&request.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(request.clone())
    }

    async fn get_by_id(
        &self,
        id: &ServiceRequestId,
    ) -> Result<Option<ServiceRequest>, RepositoryError> {
        sqlx::query("SELECT * FROM service_requests WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?
            .as_ref()
            .map(map_row)
            .transpose()
    }

    async fn list(
        &self,
        filter: Option<ServiceRequestFilter>,
    ) -> Result<Vec<ServiceRequest>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let mut sql = String::from("SELECT * FROM service_requests");
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
        if let Some(status) = filter.status {
            conditions.push("status = ?");
            binds.push(status.to_string());
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        let order = match filter.sort_order.unwrap_or_default() {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        sql.push_str(&format!(" ORDER BY created_at {order}"));
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

    async fn update(&self, request: &ServiceRequest) -> Result<ServiceRequest, RepositoryError> {
        let result = sqlx::query(
            "UPDATE service_requests SET provider_id = ?, service_type = ?, title = ?, description = ?, budget_range = ?, urgency = ?, preferred_communication = ?, customer_phone = ?, customer_email = ?, documents = ?, status = ?, accepted_at = ?, completed_at = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(request.provider_id.map(|id| id.to_string()))
        .bind(&request.service_type)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.budget_range)
        .bind(request.urgency.to_string())
        .bind(request.preferred_communication.to_string())
        .bind(&request.customer_phone)
        .bind(&request.customer_email)
        .bind(to_json(&request.documents)?)
        .bind(request.status.to_string())
        .bind(request.accepted_at.as_ref().map(format_datetime))
        .bind(request.completed_at.as_ref().map(format_datetime))
        .bind(format_datetime(&request.updated_at))
        .bind(request.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(request.clone())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sqlite::provider::SqliteProviderRepository;
    use crate::sqlite::provider::tests::make_provider;
    use crate::sqlite::test_util::test_pool;
    use chrono::{Duration, Utc};
    use legalconnect_core::repository::provider::ProviderRepository;
    use legalconnect_types::id::{ProviderId, UserId};
    use legalconnect_types::request::{CommunicationChannel, RequestStatus, Urgency};

    pub(crate) fn make_request(
        customer_id: Option<UserId>,
        provider_id: Option<ProviderId>,
        title: &str,
    ) -> ServiceRequest {
        let now = Utc::now();
        ServiceRequest {
            id: ServiceRequestId::new(),
            customer_id,
            provider_id,
            service_type: "Property Title Verification".into(),
            title: title.to_string(),
            description: "Need a title check before purchase".into(),
            budget_range: "₹5,000 - ₹15,000".into(),
            urgency: Urgency::Medium,
            preferred_communication: CommunicationChannel::Email,
            customer_phone: "9000000000".into(),
            customer_email: "buyer@x.in".into(),
            documents: vec!["http://files/khata.pdf".into()],
            status: RequestStatus::Pending,
            accepted_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_anonymous_request_round_trip() {
        let repo = SqliteServiceRequestRepository::new(test_pool().await);
        let request = make_request(None, None, "Open request");
        repo.create(&request).await.unwrap();

        let found = repo.get_by_id(&request.id).await.unwrap().unwrap();
        assert_eq!(found, request);
    }

    #[tokio::test]
    async fn test_list_by_provider_newest_first() {
        let pool = test_pool().await;
        let provider = make_provider(&pool, "rao@x.in", "Rao Legal").await;
        SqliteProviderRepository::new(pool.clone())
            .create(&provider)
            .await
            .unwrap();
        let repo = SqliteServiceRequestRepository::new(pool);

        let mut older = make_request(None, Some(provider.id), "Older");
        older.created_at = Utc::now() - Duration::hours(2);
        let newer = make_request(None, Some(provider.id), "Newer");
        let unrelated = make_request(None, None, "Unrelated");
        for r in [&older, &newer, &unrelated] {
            repo.create(r).await.unwrap();
        }

        let listed = repo
            .list(Some(ServiceRequestFilter {
                provider_id: Some(provider.id),
                ..Default::default()
            }))
            .await
            .unwrap();
        let titles: Vec<_> = listed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Newer", "Older"]);

        let pending = repo
            .list(Some(ServiceRequestFilter {
                status: Some(RequestStatus::Pending),
                sort_order: Some(SortOrder::Asc),
                limit: Some(2),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].title, "Older");
    }

    #[tokio::test]
    async fn test_update_status_and_timestamps() {
        let repo = SqliteServiceRequestRepository::new(test_pool().await);
        let mut request = make_request(None, None, "Lifecycle");
        repo.create(&request).await.unwrap();

        request.transition(RequestStatus::Cancelled).unwrap();
        repo.update(&request).await.unwrap();
        let found = repo.get_by_id(&request.id).await.unwrap().unwrap();
        assert_eq!(found.status, RequestStatus::Cancelled);

        let ghost = make_request(None, None, "Ghost");
        assert!(matches!(
            repo.update(&ghost).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
