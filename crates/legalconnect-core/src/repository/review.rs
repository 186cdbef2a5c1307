//! Review repository trait definition.

use legalconnect_types::error::RepositoryError;
use legalconnect_types::id::{ProviderId, ServiceRequestId, UserId};
use legalconnect_types::review::Review;

/// Filter criteria for listing reviews. Results are newest first.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub customer_id: Option<UserId>,
    pub provider_id: Option<ProviderId>,
    pub service_request_id: Option<ServiceRequestId>,
    pub limit: Option<i64>,
}

pub trait ReviewRepository: Send + Sync {
    /// Insert a review. Fails with `Conflict` when the customer already
    /// reviewed the same request.
    fn create(
        &self,
        review: &Review,
    ) -> impl std::future::Future<Output = Result<Review, RepositoryError>> + Send;

    fn list(
        &self,
        filter: Option<ReviewFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Review>, RepositoryError>> + Send;
}
