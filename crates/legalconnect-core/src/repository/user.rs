//! User repository trait definition.

use legalconnect_types::error::RepositoryError;
use legalconnect_types::id::UserId;
use legalconnect_types::user::User;

/// Repository trait for user accounts.
///
/// Implementations live in legalconnect-infra (e.g., SqliteUserRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait UserRepository: Send + Sync {
    /// Create a new user. Fails with `Conflict` if the email is taken.
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Lookup by normalized (lowercase) email.
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// All users, newest first.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;

    /// Overwrite an existing user. `NotFound` if it does not exist.
    fn update(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;
}
