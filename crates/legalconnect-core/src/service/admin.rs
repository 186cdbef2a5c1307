//! Admin moderation: dashboard, provider verification, the service catalog
//! and the audit trail.
//!
//! Every operation takes the acting user and fails with `Forbidden` unless
//! they are an admin. Audit entries are best effort: a failed append is
//! logged and the moderation action still succeeds.

use chrono::{Datelike, Utc};
use serde::Serialize;

use legalconnect_types::audit::{AuditAction, AuditLogEntry, reason_details, resolve_target_name};
use legalconnect_types::catalog::{CatalogService, CatalogServiceForm};
use legalconnect_types::error::MarketplaceError;
use legalconnect_types::id::{CatalogServiceId, ProviderId};
use legalconnect_types::provider::{Provider, VerificationStatus};
use legalconnect_types::request::{RequestStatus, ServiceRequest};
use legalconnect_types::review::Review;
use legalconnect_types::user::User;

use crate::integration::email::EmailSender;
use crate::repository::SortOrder;
use crate::repository::audit::AuditLogRepository;
use crate::repository::catalog::CatalogRepository;
use crate::repository::provider::{ProviderFilter, ProviderRepository, ProviderSort};
use crate::repository::review::ReviewRepository;
use crate::repository::service_request::{ServiceRequestFilter, ServiceRequestRepository};
use crate::repository::user::UserRepository;
use crate::service::notify;

/// Audit entries shown on the dashboard.
pub const AUDIT_LOG_LIMIT: i64 = 50;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total_providers: usize,
    pub verified_providers: usize,
    pub pending_providers: usize,
    pub total_requests: usize,
    pub active_requests: usize,
    pub completed_requests: usize,
    pub total_reviews: usize,
}

impl AdminStats {
    pub fn compute(providers: &[Provider], requests: &[ServiceRequest], reviews: &[Review]) -> Self {
        let with_status = |status| {
            providers
                .iter()
                .filter(|p| p.verification_status == status)
                .count()
        };
        Self {
            total_providers: providers.len(),
            verified_providers: with_status(VerificationStatus::Verified),
            pending_providers: with_status(VerificationStatus::Pending),
            total_requests: requests.len(),
            active_requests: requests.iter().filter(|r| r.status.is_active()).count(),
            completed_requests: requests
                .iter()
                .filter(|r| r.status == RequestStatus::Completed)
                .count(),
            total_reviews: reviews.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub month: &'static str,
    pub providers: u32,
    pub requests: u32,
}

/// Providers and requests created in each month of `year`, January first.
pub fn analytics(providers: &[Provider], requests: &[ServiceRequest], year: i32) -> Vec<MonthlyCount> {
    let mut buckets: Vec<MonthlyCount> = MONTH_NAMES
        .into_iter()
        .map(|month| MonthlyCount {
            month,
            providers: 0,
            requests: 0,
        })
        .collect();
    for created in providers.iter().map(|p| p.created_at) {
        if created.year() == year {
            buckets[created.month0() as usize].providers += 1;
        }
    }
    for created in requests.iter().map(|r| r.created_at) {
        if created.year() == year {
            buckets[created.month0() as usize].requests += 1;
        }
    }
    buckets
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub analytics: Vec<MonthlyCount>,
    pub providers: Vec<Provider>,
    pub requests: Vec<ServiceRequest>,
    pub reviews: Vec<Review>,
    pub audit_log: Vec<AuditLogEntry>,
    pub catalog: Vec<CatalogService>,
}

fn require_admin(user: &User) -> Result<(), MarketplaceError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(MarketplaceError::Forbidden("admin access required".into()))
    }
}

pub struct AdminService<U, P, S, R, A, C, E>
where
    U: UserRepository,
    P: ProviderRepository,
    S: ServiceRequestRepository,
    R: ReviewRepository,
    A: AuditLogRepository,
    C: CatalogRepository,
    E: EmailSender,
{
    users: U,
    providers: P,
    requests: S,
    reviews: R,
    audit: A,
    catalog: C,
    mailer: E,
}

impl<U, P, S, R, A, C, E> AdminService<U, P, S, R, A, C, E>
where
    U: UserRepository,
    P: ProviderRepository,
    S: ServiceRequestRepository,
    R: ReviewRepository,
    A: AuditLogRepository,
    C: CatalogRepository,
    E: EmailSender,
{
    pub fn new(users: U, providers: P, requests: S, reviews: R, audit: A, catalog: C, mailer: E) -> Self {
        Self {
            users,
            providers,
            requests,
            reviews,
            audit,
            catalog,
            mailer,
        }
    }

    /// Everything the admin dashboard shows, newest first.
    pub async fn dashboard(&self, admin: &User, year: Option<i32>) -> Result<AdminDashboard, MarketplaceError> {
        require_admin(admin)?;
        let providers = self
            .providers
            .list(Some(ProviderFilter {
                sort_by: Some(ProviderSort::CreatedAt),
                sort_order: Some(SortOrder::Desc),
                ..Default::default()
            }))
            .await?;
        let requests = self
            .requests
            .list(Some(ServiceRequestFilter {
                sort_order: Some(SortOrder::Desc),
                ..Default::default()
            }))
            .await?;
        let reviews = self.reviews.list(None).await?;
        let audit_log = self.audit.list_recent(AUDIT_LOG_LIMIT).await?;
        let catalog = self.catalog.list().await?;

        let year = year.unwrap_or_else(|| Utc::now().year());
        Ok(AdminDashboard {
            stats: AdminStats::compute(&providers, &requests, &reviews),
            analytics: analytics(&providers, &requests, year),
            providers,
            requests,
            reviews,
            audit_log,
            catalog,
        })
    }

    pub async fn verify_provider(
        &self,
        admin: &User,
        id: &ProviderId,
        reason: Option<String>,
    ) -> Result<Provider, MarketplaceError> {
        self.moderate(admin, id, VerificationStatus::Verified, reason).await
    }

    /// Rejection requires a non-blank reason.
    pub async fn reject_provider(
        &self,
        admin: &User,
        id: &ProviderId,
        reason: String,
    ) -> Result<Provider, MarketplaceError> {
        if reason.trim().is_empty() {
            return Err(MarketplaceError::invalid("reason", "Rejection reason is required"));
        }
        self.moderate(admin, id, VerificationStatus::Rejected, Some(reason))
            .await
    }

    async fn moderate(
        &self,
        admin: &User,
        id: &ProviderId,
        status: VerificationStatus,
        reason: Option<String>,
    ) -> Result<Provider, MarketplaceError> {
        require_admin(admin)?;
        let mut provider = self.find_provider(id).await?;
        if !provider.verification_status.can_transition_to(status) {
            return Err(MarketplaceError::InvalidTransition {
                from: provider.verification_status.to_string(),
                to: status.to_string(),
            });
        }

        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        provider.verification_status = status;
        provider.verification_reason = reason.clone();
        provider.updated_at = Utc::now();
        let provider = self.providers.update(&provider).await?;
        tracing::info!(provider_id = %provider.id, status = %status, admin = %admin.email, "provider verification changed");

        let action = if status == VerificationStatus::Verified {
            AuditAction::ProviderVerified
        } else {
            AuditAction::ProviderRejected
        };
        self.record(
            admin,
            action,
            provider.id,
            resolve_target_name(None, Some(&provider.business_name), None),
            reason_details(reason.as_deref()),
        )
        .await;
        self.notify_verification(&provider, status, reason.as_deref())
            .await;
        Ok(provider)
    }

    async fn notify_verification(&self, provider: &Provider, status: VerificationStatus, reason: Option<&str>) {
        let recipient = match self.users.get_by_id(&provider.user_id).await {
            Ok(Some(user)) if !user.email.is_empty() => user.email,
            Ok(_) => return,
            Err(e) => {
                tracing::warn!(provider_id = %provider.id, error = %e, "could not look up provider account");
                return;
            }
        };
        let email = notify::verification_outcome(&recipient, &provider.business_name, status, reason);
        if let Err(e) = self.mailer.send(&email).await {
            tracing::warn!(provider_id = %provider.id, error = %e, "failed to send verification email");
        }
    }

    /// Activate or suspend a provider's listing.
    pub async fn set_availability(
        &self,
        admin: &User,
        id: &ProviderId,
        is_available: bool,
    ) -> Result<Provider, MarketplaceError> {
        require_admin(admin)?;
        let mut provider = self.find_provider(id).await?;
        provider.is_available = is_available;
        provider.updated_at = Utc::now();
        let provider = self.providers.update(&provider).await?;
        tracing::info!(provider_id = %provider.id, is_available, admin = %admin.email, "provider availability changed");

        let action = if is_available {
            AuditAction::ProviderActivated
        } else {
            AuditAction::ProviderSuspended
        };
        self.record(
            admin,
            action,
            provider.id,
            resolve_target_name(None, Some(&provider.business_name), None),
            String::new(),
        )
        .await;
        Ok(provider)
    }

    pub async fn list_services(&self, admin: &User) -> Result<Vec<CatalogService>, MarketplaceError> {
        require_admin(admin)?;
        Ok(self.catalog.list().await?)
    }

    pub async fn create_service(
        &self,
        admin: &User,
        form: CatalogServiceForm,
    ) -> Result<CatalogService, MarketplaceError> {
        require_admin(admin)?;
        let form = form.normalized()?;
        let now = Utc::now();
        let service = self
            .catalog
            .create(&CatalogService {
                id: CatalogServiceId::new(),
                name: form.name,
                description: form.description,
                created_at: now,
                updated_at: now,
            })
            .await?;
        self.record(
            admin,
            AuditAction::ServiceCreated,
            service.id,
            resolve_target_name(Some(&service.name), None, None),
            format!("New service '{}' added", service.name),
        )
        .await;
        Ok(service)
    }

    pub async fn update_service(
        &self,
        admin: &User,
        id: &CatalogServiceId,
        form: CatalogServiceForm,
    ) -> Result<CatalogService, MarketplaceError> {
        require_admin(admin)?;
        let form = form.normalized()?;
        let mut service = self
            .catalog
            .get_by_id(id)
            .await?
            .ok_or(MarketplaceError::NotFound("service"))?;
        let old_name = std::mem::replace(&mut service.name, form.name);
        service.description = form.description;
        service.updated_at = Utc::now();
        let service = self.catalog.update(&service).await?;
        self.record(
            admin,
            AuditAction::ServiceUpdated,
            service.id,
            resolve_target_name(Some(&service.name), None, None),
            format!("Updated service '{old_name}' to '{}'", service.name),
        )
        .await;
        Ok(service)
    }

    pub async fn delete_service(&self, admin: &User, id: &CatalogServiceId) -> Result<(), MarketplaceError> {
        require_admin(admin)?;
        let service = self
            .catalog
            .get_by_id(id)
            .await?
            .ok_or(MarketplaceError::NotFound("service"))?;
        self.catalog.delete(id).await?;
        self.record(
            admin,
            AuditAction::ServiceDeleted,
            service.id,
            resolve_target_name(Some(&service.name), None, None),
            format!("Service '{}' removed", service.name),
        )
        .await;
        Ok(())
    }

    /// Most recent audit entries, newest first.
    pub async fn audit_log(&self, admin: &User, limit: Option<i64>) -> Result<Vec<AuditLogEntry>, MarketplaceError> {
        require_admin(admin)?;
        let limit = limit.unwrap_or(AUDIT_LOG_LIMIT).clamp(1, 500);
        Ok(self.audit.list_recent(limit).await?)
    }

    async fn find_provider(&self, id: &ProviderId) -> Result<Provider, MarketplaceError> {
        self.providers
            .get_by_id(id)
            .await?
            .ok_or(MarketplaceError::NotFound("provider"))
    }

    async fn record(
        &self,
        admin: &User,
        action: AuditAction,
        target_id: impl std::fmt::Display,
        target_name: String,
        details: String,
    ) {
        let entry = AuditLogEntry::new(&admin.email, action, target_id, target_name, details);
        if let Err(e) = self.audit.append(&entry).await {
            tracing::error!(action = %action, error = %e, "failed to create audit log entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use chrono::TimeZone;

    type Service = AdminService<
        MemoryStore,
        MemoryStore,
        MemoryStore,
        MemoryStore,
        MemoryStore,
        MemoryStore,
        RecordingMailer,
    >;

    fn service(store: &MemoryStore, mailer: &RecordingMailer) -> Service {
        AdminService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            mailer.clone(),
        )
    }

    fn pending_provider(store: &MemoryStore) -> Provider {
        let owner = store.insert_user(provider_user("rao@legal.in"));
        let mut provider = provider_for(&owner, "Rao Legal", "Mysuru");
        provider.verification_status = VerificationStatus::Pending;
        store.insert_provider(provider)
    }

    #[tokio::test]
    async fn test_non_admin_forbidden() {
        let store = MemoryStore::new();
        let user = store.insert_user(customer("c@x.in"));
        let svc = service(&store, &RecordingMailer::default());
        assert!(matches!(
            svc.dashboard(&user, None).await,
            Err(MarketplaceError::Forbidden(_))
        ));
        assert!(matches!(
            svc.create_service(
                &user,
                CatalogServiceForm {
                    name: "Mutation".into(),
                    description: String::new()
                }
            )
            .await,
            Err(MarketplaceError::Forbidden(_))
        ));
        assert!(store.with(|s| s.catalog.is_empty()));
    }

    #[tokio::test]
    async fn test_verify_provider_audits_and_emails() {
        let store = MemoryStore::new();
        let admin = store.insert_user(admin("root@legalconnect.in"));
        let provider = pending_provider(&store);
        let mailer = RecordingMailer::default();

        let verified = service(&store, &mailer)
            .verify_provider(&admin, &provider.id, None)
            .await
            .unwrap();
        assert_eq!(verified.verification_status, VerificationStatus::Verified);

        let audit = store.audit_entries();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].action, AuditAction::ProviderVerified);
        assert_eq!(audit[0].target_name, "Rao Legal");
        assert_eq!(audit[0].details, "Reason: N/A");
        assert_eq!(audit[0].admin_email, "root@legalconnect.in");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "rao@legal.in");
        assert_eq!(sent[0].subject, "Your LandLaw Connect Profile has been verified");
    }

    #[tokio::test]
    async fn test_reject_requires_reason_and_stores_it() {
        let store = MemoryStore::new();
        let admin = store.insert_user(admin("root@legalconnect.in"));
        let provider = pending_provider(&store);
        let svc = service(&store, &RecordingMailer::default());

        let err = svc
            .reject_provider(&admin, &provider.id, "  ".into())
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));

        let rejected = svc
            .reject_provider(&admin, &provider.id, "License expired".into())
            .await
            .unwrap();
        assert_eq!(rejected.verification_status, VerificationStatus::Rejected);
        assert_eq!(rejected.verification_reason.as_deref(), Some("License expired"));
        assert_eq!(store.audit_entries()[0].details, "Reason: License expired");
    }

    #[tokio::test]
    async fn test_verification_is_one_way() {
        let store = MemoryStore::new();
        let admin = store.insert_user(admin("root@legalconnect.in"));
        let provider = pending_provider(&store);
        let svc = service(&store, &RecordingMailer::default());

        svc.verify_provider(&admin, &provider.id, None).await.unwrap();
        let err = svc
            .reject_provider(&admin, &provider.id, "Too late".into())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot move from 'verified' to 'rejected'");
        assert_eq!(store.audit_entries().len(), 1);
    }

    #[tokio::test]
    async fn test_email_failure_is_not_fatal() {
        let store = MemoryStore::new();
        let admin = store.insert_user(admin("root@legalconnect.in"));
        let provider = pending_provider(&store);

        let result = service(&store, &RecordingMailer::failing())
            .verify_provider(&admin, &provider.id, None)
            .await;
        assert!(result.is_ok());
        assert_eq!(
            store.provider(provider.id).verification_status,
            VerificationStatus::Verified
        );
    }

    #[tokio::test]
    async fn test_set_availability_audit_actions() {
        let store = MemoryStore::new();
        let admin = store.insert_user(admin("root@legalconnect.in"));
        let provider = pending_provider(&store);
        let svc = service(&store, &RecordingMailer::default());

        let p = svc.set_availability(&admin, &provider.id, false).await.unwrap();
        assert!(!p.is_available);
        svc.set_availability(&admin, &provider.id, true).await.unwrap();

        let actions: Vec<AuditAction> = store.audit_entries().iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![AuditAction::ProviderSuspended, AuditAction::ProviderActivated]
        );
    }

    #[tokio::test]
    async fn test_catalog_crud_audit_details() {
        let store = MemoryStore::new();
        let admin = store.insert_user(admin("root@legalconnect.in"));
        let svc = service(&store, &RecordingMailer::default());

        let created = svc
            .create_service(
                &admin,
                CatalogServiceForm {
                    name: " Mutation ".into(),
                    description: "Record updates".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(created.name, "Mutation");

        svc.update_service(
            &admin,
            &created.id,
            CatalogServiceForm {
                name: "Mutation of Records".into(),
                description: String::new(),
            },
        )
        .await
        .unwrap();
        svc.delete_service(&admin, &created.id).await.unwrap();
        assert!(svc.list_services(&admin).await.unwrap().is_empty());

        let details: Vec<String> = store.audit_entries().into_iter().map(|e| e.details).collect();
        assert_eq!(
            details,
            vec![
                "New service 'Mutation' added",
                "Updated service 'Mutation' to 'Mutation of Records'",
                "Service 'Mutation of Records' removed",
            ]
        );

        let err = svc
            .create_service(&admin, CatalogServiceForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
        assert!(matches!(
            svc.delete_service(&admin, &created.id).await,
            Err(MarketplaceError::NotFound("service"))
        ));
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let store = MemoryStore::new();
        let admin = store.insert_user(admin("root@legalconnect.in"));
        let pending = pending_provider(&store);
        let owner = store.insert_user(provider_user("b@x.in"));
        let verified = store.insert_provider(provider_for(&owner, "Mehta", "Pune"));
        store.insert_request(request_for(None, Some(&verified), RequestStatus::Pending));
        store.insert_request(request_for(None, Some(&verified), RequestStatus::Completed));
        store.insert_request(request_for(None, None, RequestStatus::Cancelled));

        let svc = service(&store, &RecordingMailer::default());
        svc.set_availability(&admin, &pending.id, false).await.unwrap();
        let dashboard = svc.dashboard(&admin, None).await.unwrap();

        assert_eq!(
            dashboard.stats,
            AdminStats {
                total_providers: 2,
                verified_providers: 1,
                pending_providers: 1,
                total_requests: 3,
                active_requests: 1,
                completed_requests: 1,
                total_reviews: 0,
            }
        );
        assert_eq!(dashboard.analytics.len(), 12);
        assert_eq!(dashboard.audit_log.len(), 1);
    }

    #[test]
    fn test_analytics_buckets_by_month() {
        let owner = provider_user("a@x.in");
        let mut march = provider_for(&owner, "A", "X");
        march.created_at = Utc.with_ymd_and_hms(2025, 3, 14, 10, 0, 0).unwrap();
        let mut last_year = provider_for(&owner, "B", "X");
        last_year.created_at = Utc.with_ymd_and_hms(2024, 3, 14, 10, 0, 0).unwrap();
        let mut december = request_for(None, None, RequestStatus::Pending);
        december.created_at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 0, 0).unwrap();

        let buckets = analytics(&[march, last_year], &[december], 2025);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].month, "Jan");
        assert_eq!(buckets[2].providers, 1);
        assert_eq!(buckets[11].requests, 1);
        let total: u32 = buckets.iter().map(|b| b.providers + b.requests).sum();
        assert_eq!(total, 2);
    }
}
