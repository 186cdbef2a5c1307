//! Audit log repository trait definition.

use legalconnect_types::audit::AuditLogEntry;
use legalconnect_types::error::RepositoryError;

/// Append-only store for admin actions. Entries are never updated or deleted.
pub trait AuditLogRepository: Send + Sync {
    fn append(
        &self,
        entry: &AuditLogEntry,
    ) -> impl std::future::Future<Output = Result<AuditLogEntry, RepositoryError>> + Send;

    /// Most recent entries first.
    fn list_recent(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<AuditLogEntry>, RepositoryError>> + Send;
}
