//! Session repository trait definition.

use legalconnect_types::error::RepositoryError;
use legalconnect_types::id::SessionId;
use legalconnect_types::session::Session;

/// Storage for login sessions, keyed by the hash of the bearer token.
pub trait SessionRepository: Send + Sync {
    fn create(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<Session, RepositoryError>> + Send;

    fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// Remove a session. Deleting a missing session is not an error.
    fn delete(
        &self,
        id: &SessionId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
