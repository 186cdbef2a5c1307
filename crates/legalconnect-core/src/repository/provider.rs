//! Provider repository trait definition.

use legalconnect_types::error::RepositoryError;
use legalconnect_types::id::{ProviderId, UserId};
use legalconnect_types::provider::{Provider, VerificationStatus};

use super::SortOrder;

/// Sortable provider columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSort {
    Rating,
    CreatedAt,
    BusinessName,
}

/// Filter criteria for listing providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderFilter {
    pub verification_status: Option<VerificationStatus>,
    pub user_id: Option<UserId>,
    /// Defaults to `CreatedAt`.
    pub sort_by: Option<ProviderSort>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<i64>,
}

impl ProviderFilter {
    /// Verified providers, best rated first.
    pub fn verified_by_rating() -> Self {
        Self {
            verification_status: Some(VerificationStatus::Verified),
            sort_by: Some(ProviderSort::Rating),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        }
    }
}

/// Repository trait for provider profiles.
pub trait ProviderRepository: Send + Sync {
    /// Create a provider. Fails with `Conflict` if the user already has one.
    fn create(
        &self,
        provider: &Provider,
    ) -> impl std::future::Future<Output = Result<Provider, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &ProviderId,
    ) -> impl std::future::Future<Output = Result<Option<Provider>, RepositoryError>> + Send;

    /// The profile owned by `user_id`, if any.
    fn get_by_user(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<Provider>, RepositoryError>> + Send;

    fn list(
        &self,
        filter: Option<ProviderFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Provider>, RepositoryError>> + Send;

    /// Overwrite an existing provider. Last write wins.
    fn update(
        &self,
        provider: &Provider,
    ) -> impl std::future::Future<Output = Result<Provider, RepositoryError>> + Send;

    fn delete(
        &self,
        id: &ProviderId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
