//! SQLite provider repository implementation.
//!
//! List fields (qualifications, specializations, offerings, documents) are
//! stored as JSON arrays.

use legalconnect_core::repository::SortOrder;
use legalconnect_core::repository::provider::{ProviderFilter, ProviderRepository, ProviderSort};
use legalconnect_types::error::RepositoryError;
use legalconnect_types::id::{ProviderId, UserId};
use legalconnect_types::provider::Provider;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{
    format_datetime, from_json, is_unique_violation, parse_column, parse_datetime, query_error,
    to_json,
};

#[derive(Clone)]
pub struct SqliteProviderRepository {
    pool: DatabasePool,
}

impl SqliteProviderRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ProviderRow {
    id: String,
    user_id: String,
    provider_type: String,
    business_name: String,
    license_number: String,
    bio: String,
    phone_number: String,
    whatsapp_number: String,
    office_address: String,
    city: String,
    state: String,
    experience_years: i64,
    qualifications: String,
    specializations: String,
    services_offered: String,
    profile_photo: Option<String>,
    verification_documents: String,
    verification_status: String,
    verification_reason: Option<String>,
    is_available: bool,
    rating: f64,
    total_reviews: i64,
    completed_cases: i64,
    created_at: String,
    updated_at: String,
}

impl ProviderRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            provider_type: row.try_get("provider_type")?,
            business_name: row.try_get("business_name")?,
            license_number: row.try_get("license_number")?,
            bio: row.try_get("bio")?,
            phone_number: row.try_get("phone_number")?,
            whatsapp_number: row.try_get("whatsapp_number")?,
            office_address: row.try_get("office_address")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            experience_years: row.try_get("experience_years")?,
            qualifications: row.try_get("qualifications")?,
            specializations: row.try_get("specializations")?,
            services_offered: row.try_get("services_offered")?,
            profile_photo: row.try_get("profile_photo")?,
            verification_documents: row.try_get("verification_documents")?,
            verification_status: row.try_get("verification_status")?,
            verification_reason: row.try_get("verification_reason")?,
            is_available: row.try_get("is_available")?,
            rating: row.try_get("rating")?,
            total_reviews: row.try_get("total_reviews")?,
            completed_cases: row.try_get("completed_cases")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_provider(self) -> Result<Provider, RepositoryError> {
        Ok(Provider {
            id: parse_column("provider id", &self.id)?,
            user_id: parse_column("user id", &self.user_id)?,
            provider_type: parse_column("provider type", &self.provider_type)?,
            business_name: self.business_name,
            license_number: self.license_number,
            bio: self.bio,
            phone_number: self.phone_number,
            whatsapp_number: self.whatsapp_number,
            office_address: self.office_address,
            city: self.city,
            state: self.state,
            experience_years: to_u32("experience_years", self.experience_years)?,
            qualifications: from_json("qualifications", &self.qualifications)?,
            specializations: from_json("specializations", &self.specializations)?,
            services_offered: from_json("services_offered", &self.services_offered)?,
            profile_photo: self.profile_photo,
            verification_documents: from_json(
                "verification_documents",
                &self.verification_documents,
            )?,
            verification_status: parse_column("verification status", &self.verification_status)?,
            verification_reason: self.verification_reason,
            is_available: self.is_available,
            rating: self.rating,
            total_reviews: to_u32("total_reviews", self.total_reviews)?,
            completed_cases: to_u32("completed_cases", self.completed_cases)?,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn to_u32(column: &str, value: i64) -> Result<u32, RepositoryError> {
    u32::try_from(value).map_err(|_| RepositoryError::Query(format!("{column} out of range: {value}")))
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<Provider, RepositoryError> {
    ProviderRow::from_row(row).map_err(query_error)?.into_provider()
}

/// JSON-encoded list columns, in insert order.
struct ListColumns {
    qualifications: String,
    specializations: String,
    services_offered: String,
    verification_documents: String,
}

impl ListColumns {
    fn encode(provider: &Provider) -> Result<Self, RepositoryError> {
        Ok(Self {
            qualifications: to_json(&provider.qualifications)?,
            specializations: to_json(&provider.specializations)?,
            services_offered: to_json(&provider.services_offered)?,
            verification_documents: to_json(&provider.verification_documents)?,
        })
    }
}

impl ProviderRepository for SqliteProviderRepository {
    async fn create(&self, provider: &Provider) -> Result<Provider, RepositoryError> {
        let lists = ListColumns::encode(provider)?;
        let result = sqlx::query(
            "INSERT INTO providers (id, user_id, provider_type, business_name, license_number, bio, phone_number, whatsapp_number, office_address, city, state, experience_years, qualifications, specializations, services_offered, profile_photo, verification_documents, verification_status, verification_reason, is_available, rating, total_reviews, completed_cases, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(provider.id.to_string())
        .bind(provider.user_id.to_string())
        .bind(provider.provider_type.to_string())
        .bind(&provider.business_name)
        .bind(&provider.license_number)
        .bind(&provider.bio)
        .bind(&provider.phone_number)
        .bind(&provider.whatsapp_number)
        .bind(&provider.office_address)
        .bind(&provider.city)
        .bind(&provider.state)
        .bind(i64::from(provider.experience_years))
        .bind(&lists.qualifications)
        .bind(&lists.specializations)
        .bind(&lists.services_offered)
        .bind(&provider.profile_photo)
        .bind(&lists.verification_documents)
        .bind(provider.verification_status.to_string())
        .bind(&provider.verification_reason)
        .bind(provider.is_available)
        .bind(provider.rating)
        .bind(i64::from(provider.total_reviews))
        .bind(i64::from(provider.completed_cases))
        .bind(format_datetime(&provider.created_at))
        .bind(format_datetime(&provider.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(provider.clone()),
            Err(e) if is_unique_violation(&e) => Err(RepositoryError::Conflict(format!(
                "user {} already has a provider profile",
                provider.user_id
            ))),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn get_by_id(&self, id: &ProviderId) -> Result<Option<Provider>, RepositoryError> {
        sqlx::query("SELECT * FROM providers WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?
            .as_ref()
            .map(map_row)
            .transpose()
    }

    async fn get_by_user(&self, user_id: &UserId) -> Result<Option<Provider>, RepositoryError> {
        sqlx::query("SELECT * FROM providers WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?
            .as_ref()
            .map(map_row)
            .transpose()
    }

    async fn list(&self, filter: Option<ProviderFilter>) -> Result<Vec<Provider>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let mut sql = String::from("SELECT * FROM providers");
        let mut conditions: Vec<&str> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(status) = filter.verification_status {
            conditions.push("verification_status = ?");
            binds.push(status.to_string());
        }
        if let Some(user_id) = filter.user_id {
            conditions.push("user_id = ?");
            binds.push(user_id.to_string());
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        let column = match filter.sort_by.unwrap_or(ProviderSort::CreatedAt) {
            ProviderSort::Rating => "rating",
            ProviderSort::CreatedAt => "created_at",
            ProviderSort::BusinessName => "business_name",
        };
        let order = match filter.sort_order.unwrap_or_default() {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        // created_at breaks rating ties so listings are stable.
        sql.push_str(&format!(" ORDER BY {column} {order}, created_at {order}"));
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

    async fn update(&self, provider: &Provider) -> Result<Provider, RepositoryError> {
        let lists = ListColumns::encode(provider)?;
        let result = sqlx::query(
            "UPDATE providers SET provider_type = ?, business_name = ?, license_number = ?, bio = ?, phone_number = ?, whatsapp_number = ?, office_address = ?, city = ?, state = ?, experience_years = ?, qualifications = ?, specializations = ?, services_offered = ?, profile_photo = ?, verification_documents = ?, verification_status = ?, verification_reason = ?, is_available = ?, rating = ?, total_reviews = ?, completed_cases = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(provider.provider_type.to_string())
        .bind(&provider.business_name)
        .bind(&provider.license_number)
        .bind(&provider.bio)
        .bind(&provider.phone_number)
        .bind(&provider.whatsapp_number)
        .bind(&provider.office_address)
        .bind(&provider.city)
        .bind(&provider.state)
        .bind(i64::from(provider.experience_years))
        .bind(&lists.qualifications)
        .bind(&lists.specializations)
        .bind(&lists.services_offered)
        .bind(&provider.profile_photo)
        .bind(&lists.verification_documents)
        .bind(provider.verification_status.to_string())
        .bind(&provider.verification_reason)
        .bind(provider.is_available)
        .bind(provider.rating)
        .bind(i64::from(provider.total_reviews))
        .bind(i64::from(provider.completed_cases))
        .bind(format_datetime(&provider.updated_at))
        .bind(provider.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(provider.clone())
    }

    async fn delete(&self, id: &ProviderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM providers WHERE id = ?")
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

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use crate::sqlite::test_util::test_pool;
    use crate::sqlite::user::SqliteUserRepository;
    use chrono::Utc;
    use legalconnect_core::repository::user::UserRepository;
    use legalconnect_types::provider::{ProviderType, ServiceOffering, VerificationStatus};
    use legalconnect_types::user::User;

    /// Insert an owning user and return an unsaved provider for them.
    pub(crate) async fn make_provider(pool: &DatabasePool, email: &str, name: &str) -> Provider {
        let user = User::new_customer(email, name);
        SqliteUserRepository::new(pool.clone())
            .create(&user)
            .await
            .unwrap();
        let now = Utc::now();
        Provider {
            id: ProviderId::new(),
            user_id: user.id,
            provider_type: ProviderType::Advocate,
            business_name: name.to_string(),
            license_number: "KAR/42/2010".into(),
            bio: "Land records".into(),
            phone_number: "9876543210".into(),
            whatsapp_number: String::new(),
            office_address: "MG Road".into(),
            city: "Bengaluru".into(),
            state: "Karnataka".into(),
            experience_years: 12,
            qualifications: vec!["LLB".into(), "LLM".into()],
            specializations: vec!["Property Law".into()],
            services_offered: vec![ServiceOffering {
                service_name: "Title search".into(),
                description: "30 year search".into(),
                price_range: "₹5,000 - ₹8,000".into(),
            }],
            profile_photo: None,
            verification_documents: vec!["http://files/bar.pdf".into()],
            verification_status: VerificationStatus::Pending,
            verification_reason: None,
            is_available: true,
            rating: 0.0,
            total_reviews: 0,
            completed_cases: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_round_trips_lists() {
        let pool = test_pool().await;
        let repo = SqliteProviderRepository::new(pool.clone());
        let provider = make_provider(&pool, "rao@x.in", "Rao Legal").await;
        repo.create(&provider).await.unwrap();

        let found = repo.get_by_id(&provider.id).await.unwrap().unwrap();
        assert_eq!(found, provider);
        let by_user = repo.get_by_user(&provider.user_id).await.unwrap().unwrap();
        assert_eq!(by_user.id, provider.id);
    }

    #[tokio::test]
    async fn test_one_provider_per_user() {
        let pool = test_pool().await;
        let repo = SqliteProviderRepository::new(pool.clone());
        let provider = make_provider(&pool, "rao@x.in", "Rao Legal").await;
        repo.create(&provider).await.unwrap();

        let second = Provider {
            id: ProviderId::new(),
            ..provider
        };
        let err = repo.create(&second).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_verified_by_rating() {
        let pool = test_pool().await;
        let repo = SqliteProviderRepository::new(pool.clone());

        let mut low = make_provider(&pool, "a@x.in", "Low").await;
        low.verification_status = VerificationStatus::Verified;
        low.rating = 3.2;
        let mut high = make_provider(&pool, "b@x.in", "High").await;
        high.verification_status = VerificationStatus::Verified;
        high.rating = 4.9;
        let mut hidden = make_provider(&pool, "c@x.in", "Hidden").await;
        hidden.rating = 5.0;
        for p in [&low, &high, &hidden] {
            repo.create(p).await.unwrap();
        }

        let listed = repo
            .list(Some(ProviderFilter::verified_by_rating()))
            .await
            .unwrap();
        let names: Vec<_> = listed.iter().map(|p| p.business_name.as_str()).collect();
        assert_eq!(names, vec!["High", "Low"]);

        let top = repo
            .list(Some(ProviderFilter {
                limit: Some(1),
                ..ProviderFilter::verified_by_rating()
            }))
            .await
            .unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(repo.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = test_pool().await;
        let repo = SqliteProviderRepository::new(pool.clone());
        let mut provider = make_provider(&pool, "rao@x.in", "Rao Legal").await;
        repo.create(&provider).await.unwrap();

        provider.verification_status = VerificationStatus::Rejected;
        provider.verification_reason = Some("Blurry license".into());
        provider.specializations.push("Civil Law".into());
        repo.update(&provider).await.unwrap();
        let found = repo.get_by_id(&provider.id).await.unwrap().unwrap();
        assert_eq!(found.verification_reason.as_deref(), Some("Blurry license"));
        assert_eq!(found.specializations.len(), 2);

        repo.delete(&provider.id).await.unwrap();
        assert!(matches!(
            repo.delete(&provider.id).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
