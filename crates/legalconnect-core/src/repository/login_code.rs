//! Login code repository trait definition.

use legalconnect_types::error::RepositoryError;
use legalconnect_types::session::LoginCode;

/// Pending emailed login codes. At most one is live per email.
pub trait LoginCodeRepository: Send + Sync {
    fn create(
        &self,
        code: &LoginCode,
    ) -> impl std::future::Future<Output = Result<LoginCode, RepositoryError>> + Send;

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<LoginCode>, RepositoryError>> + Send;

    /// Persist a changed attempt counter.
    fn update(
        &self,
        code: &LoginCode,
    ) -> impl std::future::Future<Output = Result<LoginCode, RepositoryError>> + Send;

    fn delete_for_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
