//! Catalog service repository trait definition.

use legalconnect_types::catalog::CatalogService;
use legalconnect_types::error::RepositoryError;
use legalconnect_types::id::CatalogServiceId;

pub trait CatalogRepository: Send + Sync {
    fn create(
        &self,
        service: &CatalogService,
    ) -> impl std::future::Future<Output = Result<CatalogService, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &CatalogServiceId,
    ) -> impl std::future::Future<Output = Result<Option<CatalogService>, RepositoryError>> + Send;

    /// Newest first.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<CatalogService>, RepositoryError>> + Send;

    fn update(
        &self,
        service: &CatalogService,
    ) -> impl std::future::Future<Output = Result<CatalogService, RepositoryError>> + Send;

    /// `NotFound` if no such service exists.
    fn delete(
        &self,
        id: &CatalogServiceId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
