//! Service request repository trait definition.

use legalconnect_types::error::RepositoryError;
use legalconnect_types::id::{ProviderId, ServiceRequestId, UserId};
use legalconnect_types::request::{RequestStatus, ServiceRequest};

use super::SortOrder;

/// Filter criteria for listing requests. Results are ordered by `created_at`.
#[derive(Debug, Clone, Default)]
pub struct ServiceRequestFilter {
    pub customer_id: Option<UserId>,
    pub provider_id: Option<ProviderId>,
    pub status: Option<RequestStatus>,
    /// Defaults to newest first.
    pub sort_order: Option<SortOrder>,
    pub limit: Option<i64>,
}

pub trait ServiceRequestRepository: Send + Sync {
    fn create(
        &self,
        request: &ServiceRequest,
    ) -> impl std::future::Future<Output = Result<ServiceRequest, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &ServiceRequestId,
    ) -> impl std::future::Future<Output = Result<Option<ServiceRequest>, RepositoryError>> + Send;

    fn list(
        &self,
        filter: Option<ServiceRequestFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<ServiceRequest>, RepositoryError>> + Send;

    fn update(
        &self,
        request: &ServiceRequest,
    ) -> impl std::future::Future<Output = Result<ServiceRequest, RepositoryError>> + Send;
}
