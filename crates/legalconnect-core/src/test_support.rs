//! In-memory implementations of every port, shared by the service tests.
//!
//! `MemoryStore` is cheaply cloneable; clones share state, so one store can
//! be handed to several services and inspected afterwards.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use legalconnect_types::audit::AuditLogEntry;
use legalconnect_types::catalog::CatalogService;
use legalconnect_types::error::{IntegrationError, RepositoryError};
use legalconnect_types::id::*;
use legalconnect_types::integration::{EmailMessage, FileUpload, UploadedFile};
use legalconnect_types::llm::{InvokeLlm, LlmError};
use legalconnect_types::provider::{
    Provider, ProviderType, ServiceOffering, VerificationStatus,
};
use legalconnect_types::request::{
    CommunicationChannel, RequestStatus, ServiceRequest, Urgency,
};
use legalconnect_types::review::Review;
use legalconnect_types::session::{LoginCode, Session};
use legalconnect_types::user::{Role, User, UserType};

use crate::integration::email::EmailSender;
use crate::integration::hash::TokenHasher;
use crate::integration::llm::LlmProvider;
use crate::integration::storage::FileStore;
use crate::repository::SortOrder;
use crate::repository::audit::AuditLogRepository;
use crate::repository::catalog::CatalogRepository;
use crate::repository::login_code::LoginCodeRepository;
use crate::repository::provider::{ProviderFilter, ProviderRepository, ProviderSort};
use crate::repository::review::{ReviewFilter, ReviewRepository};
use crate::repository::service_request::{ServiceRequestFilter, ServiceRequestRepository};
use crate::repository::session::SessionRepository;
use crate::repository::user::UserRepository;

#[derive(Default)]
pub struct State {
    pub users: Vec<User>,
    pub providers: Vec<Provider>,
    pub requests: Vec<ServiceRequest>,
    pub reviews: Vec<Review>,
    pub audit: Vec<AuditLogEntry>,
    pub catalog: Vec<CatalogService>,
    pub sessions: Vec<Session>,
    pub login_codes: Vec<LoginCode>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    pub state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn insert_user(&self, user: User) -> User {
        self.with(|s| s.users.push(user.clone()));
        user
    }

    pub fn insert_provider(&self, provider: Provider) -> Provider {
        self.with(|s| s.providers.push(provider.clone()));
        provider
    }

    pub fn insert_request(&self, request: ServiceRequest) -> ServiceRequest {
        self.with(|s| s.requests.push(request.clone()));
        request
    }

    pub fn provider(&self, id: ProviderId) -> Provider {
        self.with(|s| s.providers.iter().find(|p| p.id == id).cloned().unwrap())
    }

    pub fn request(&self, id: ServiceRequestId) -> ServiceRequest {
        self.with(|s| s.requests.iter().find(|r| r.id == id).cloned().unwrap())
    }

    pub fn audit_entries(&self) -> Vec<AuditLogEntry> {
        self.with(|s| s.audit.clone())
    }
}

fn apply_limit<T>(mut items: Vec<T>, limit: Option<i64>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit.max(0) as usize);
    }
    items
}

impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        self.with(|s| {
            if s.users.iter().any(|u| u.email == user.email) {
                return Err(RepositoryError::Conflict(format!("email '{}'", user.email)));
            }
            s.users.push(user.clone());
            Ok(user.clone())
        })
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.with(|s| s.users.iter().find(|u| u.id == *id).cloned()))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.with(|s| s.users.iter().find(|u| u.email == email).cloned()))
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.with(|s| s.users.iter().rev().cloned().collect()))
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        self.with(|s| {
            let slot = s
                .users
                .iter_mut()
                .find(|u| u.id == user.id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = user.clone();
            Ok(user.clone())
        })
    }
}

impl ProviderRepository for MemoryStore {
    async fn create(&self, provider: &Provider) -> Result<Provider, RepositoryError> {
        self.with(|s| {
            if s.providers.iter().any(|p| p.user_id == provider.user_id) {
                return Err(RepositoryError::Conflict("provider for user".into()));
            }
            s.providers.push(provider.clone());
            Ok(provider.clone())
        })
    }

    async fn get_by_id(&self, id: &ProviderId) -> Result<Option<Provider>, RepositoryError> {
        Ok(self.with(|s| s.providers.iter().find(|p| p.id == *id).cloned()))
    }

    async fn get_by_user(&self, user_id: &UserId) -> Result<Option<Provider>, RepositoryError> {
        Ok(self.with(|s| s.providers.iter().find(|p| p.user_id == *user_id).cloned()))
    }

    async fn list(&self, filter: Option<ProviderFilter>) -> Result<Vec<Provider>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let mut items: Vec<Provider> = self.with(|s| {
            s.providers
                .iter()
                .filter(|p| filter.verification_status.is_none_or(|v| p.verification_status == v))
                .filter(|p| filter.user_id.is_none_or(|u| p.user_id == u))
                .cloned()
                .collect()
        });
        match filter.sort_by.unwrap_or(ProviderSort::CreatedAt) {
            ProviderSort::Rating => items.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
            ProviderSort::CreatedAt => items.sort_by_key(|p| p.created_at),
            ProviderSort::BusinessName => {
                items.sort_by(|a, b| a.business_name.cmp(&b.business_name))
            }
        }
        if filter.sort_order.unwrap_or_default() == SortOrder::Desc {
            items.reverse();
        }
        Ok(apply_limit(items, filter.limit))
    }

    async fn update(&self, provider: &Provider) -> Result<Provider, RepositoryError> {
        self.with(|s| {
            let slot = s
                .providers
                .iter_mut()
                .find(|p| p.id == provider.id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = provider.clone();
            Ok(provider.clone())
        })
    }

    async fn delete(&self, id: &ProviderId) -> Result<(), RepositoryError> {
        self.with(|s| {
            let before = s.providers.len();
            s.providers.retain(|p| p.id != *id);
            if s.providers.len() == before {
                Err(RepositoryError::NotFound)
            } else {
                Ok(())
            }
        })
    }
}

impl ServiceRequestRepository for MemoryStore {
    async fn create(&self, request: &ServiceRequest) -> Result<ServiceRequest, RepositoryError> {
        self.with(|s| s.requests.push(request.clone()));
        Ok(request.clone())
    }

    async fn get_by_id(
        &self,
        id: &ServiceRequestId,
    ) -> Result<Option<ServiceRequest>, RepositoryError> {
        Ok(self.with(|s| s.requests.iter().find(|r| r.id == *id).cloned()))
    }

    async fn list(
        &self,
        filter: Option<ServiceRequestFilter>,
    ) -> Result<Vec<ServiceRequest>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let mut items: Vec<ServiceRequest> = self.with(|s| {
            s.requests
                .iter()
                .filter(|r| filter.customer_id.is_none_or(|c| r.customer_id == Some(c)))
                .filter(|r| filter.provider_id.is_none_or(|p| r.provider_id == Some(p)))
                .filter(|r| filter.status.is_none_or(|st| r.status == st))
                .cloned()
                .collect()
        });
        items.sort_by_key(|r| r.created_at);
        if filter.sort_order.unwrap_or_default() == SortOrder::Desc {
            items.reverse();
        }
        Ok(apply_limit(items, filter.limit))
    }

    async fn update(&self, request: &ServiceRequest) -> Result<ServiceRequest, RepositoryError> {
        self.with(|s| {
            let slot = s
                .requests
                .iter_mut()
                .find(|r| r.id == request.id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = request.clone();
            Ok(request.clone())
        })
    }
}

impl ReviewRepository for MemoryStore {
    async fn create(&self, review: &Review) -> Result<Review, RepositoryError> {
        self.with(|s| {
            if s.reviews.iter().any(|r| {
                r.customer_id == review.customer_id
                    && r.service_request_id == review.service_request_id
            }) {
                return Err(RepositoryError::Conflict("review already exists".into()));
            }
            s.reviews.push(review.clone());
            Ok(review.clone())
        })
    }

    async fn list(&self, filter: Option<ReviewFilter>) -> Result<Vec<Review>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let mut items: Vec<Review> = self.with(|s| {
            s.reviews
                .iter()
                .filter(|r| filter.customer_id.is_none_or(|c| r.customer_id == c))
                .filter(|r| filter.provider_id.is_none_or(|p| r.provider_id == p))
                .filter(|r| {
                    filter
                        .service_request_id
                        .is_none_or(|id| r.service_request_id == id)
                })
                .cloned()
                .collect()
        });
        items.sort_by_key(|r| std::cmp::Reverse(r.created_at));
        Ok(apply_limit(items, filter.limit))
    }
}

impl AuditLogRepository for MemoryStore {
    async fn append(&self, entry: &AuditLogEntry) -> Result<AuditLogEntry, RepositoryError> {
        self.with(|s| s.audit.push(entry.clone()));
        Ok(entry.clone())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<AuditLogEntry>, RepositoryError> {
        let items = self.with(|s| s.audit.iter().rev().cloned().collect());
        Ok(apply_limit(items, Some(limit)))
    }
}

impl CatalogRepository for MemoryStore {
    async fn create(&self, service: &CatalogService) -> Result<CatalogService, RepositoryError> {
        self.with(|s| s.catalog.push(service.clone()));
        Ok(service.clone())
    }

    async fn get_by_id(
        &self,
        id: &CatalogServiceId,
    ) -> Result<Option<CatalogService>, RepositoryError> {
        Ok(self.with(|s| s.catalog.iter().find(|c| c.id == *id).cloned()))
    }

    async fn list(&self) -> Result<Vec<CatalogService>, RepositoryError> {
        Ok(self.with(|s| s.catalog.iter().rev().cloned().collect()))
    }

    async fn update(&self, service: &CatalogService) -> Result<CatalogService, RepositoryError> {
        self.with(|s| {
            let slot = s
                .catalog
                .iter_mut()
                .find(|c| c.id == service.id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = service.clone();
            Ok(service.clone())
        })
    }

    async fn delete(&self, id: &CatalogServiceId) -> Result<(), RepositoryError> {
        self.with(|s| {
            let before = s.catalog.len();
            s.catalog.retain(|c| c.id != *id);
            if s.catalog.len() == before {
                Err(RepositoryError::NotFound)
            } else {
                Ok(())
            }
        })
    }
}

impl SessionRepository for MemoryStore {
    async fn create(&self, session: &Session) -> Result<Session, RepositoryError> {
        self.with(|s| s.sessions.push(session.clone()));
        Ok(session.clone())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, RepositoryError> {
        Ok(self.with(|s| s.sessions.iter().find(|x| x.token_hash == token_hash).cloned()))
    }

    async fn delete(&self, id: &SessionId) -> Result<(), RepositoryError> {
        self.with(|s| s.sessions.retain(|x| x.id != *id));
        Ok(())
    }
}

impl LoginCodeRepository for MemoryStore {
    async fn create(&self, code: &LoginCode) -> Result<LoginCode, RepositoryError> {
        self.with(|s| s.login_codes.push(code.clone()));
        Ok(code.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<LoginCode>, RepositoryError> {
        Ok(self.with(|s| s.login_codes.iter().find(|x| x.email == email).cloned()))
    }

    async fn update(&self, code: &LoginCode) -> Result<LoginCode, RepositoryError> {
        self.with(|s| match s.login_codes.iter_mut().find(|x| x.id == code.id) {
            Some(slot) => {
                *slot = code.clone();
                Ok(code.clone())
            }
            None => Err(RepositoryError::NotFound),
        })
    }

    async fn delete_for_email(&self, email: &str) -> Result<(), RepositoryError> {
        self.with(|s| s.login_codes.retain(|x| x.email != email));
        Ok(())
    }
}

/// Records every email; optionally fails every send.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<EmailMessage>>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl EmailSender for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), IntegrationError> {
        if self.fail {
            return Err(IntegrationError::Request {
                service: "email",
                message: "connection refused".into(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Answers with a fixed reply (or error) and remembers the last prompt.
#[derive(Clone, Default)]
pub struct ScriptedLlm {
    pub reply: Option<String>,
    pub last_request: Arc<Mutex<Option<InvokeLlm>>>,
}

impl ScriptedLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn last_request(&self) -> Option<InvokeLlm> {
        self.last_request.lock().unwrap().clone()
    }
}

impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &InvokeLlm) -> Result<String, LlmError> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.reply.clone().ok_or(LlmError::Overloaded("busy".into()))
    }
}

/// Stores nothing; returns `memory://{filename}`.
#[derive(Clone, Default)]
pub struct MemoryFiles {
    pub stored: Arc<Mutex<Vec<String>>>,
}

impl FileStore for MemoryFiles {
    async fn upload(&self, file: &FileUpload) -> Result<UploadedFile, IntegrationError> {
        self.stored.lock().unwrap().push(file.filename.clone());
        Ok(UploadedFile {
            file_url: format!("memory://{}", file.filename),
        })
    }
}

/// Reversible "hash" so tests can reason about stored values.
#[derive(Clone, Copy, Default)]
pub struct PlainHasher;

impl TokenHasher for PlainHasher {
    fn hash(&self, token: &str) -> String {
        format!("hashed:{token}")
    }
}

pub fn customer(email: &str) -> User {
    User::new_customer(email, "Test Customer")
}

pub fn admin(email: &str) -> User {
    let mut user = User::new_customer(email, "Test Admin");
    user.role = Role::Admin;
    user.user_type = UserType::Admin;
    user
}

pub fn provider_user(email: &str) -> User {
    let mut user = User::new_customer(email, "Test Provider");
    user.user_type = UserType::Provider;
    user
}

pub fn provider_for(user: &User, business_name: &str, city: &str) -> Provider {
    let now = Utc::now();
    Provider {
        id: ProviderId::new(),
        user_id: user.id,
        provider_type: ProviderType::Advocate,
        business_name: business_name.to_string(),
        license_number: "KAR/123/2015".into(),
        bio: "Property litigation".into(),
        phone_number: "9876543210".into(),
        whatsapp_number: String::new(),
        office_address: "MG Road".into(),
        city: city.to_string(),
        state: "Karnataka".into(),
        experience_years: 8,
        qualifications: vec!["LLB".into()],
        specializations: vec!["Property Law".into()],
        services_offered: vec![ServiceOffering {
            service_name: "Title check".into(),
            description: String::new(),
            price_range: "₹5,000".into(),
        }],
        profile_photo: None,
        verification_documents: vec!["memory://bar.pdf".into()],
        verification_status: VerificationStatus::Verified,
        verification_reason: None,
        is_available: true,
        rating: 0.0,
        total_reviews: 0,
        completed_cases: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn request_for(
    customer: Option<&User>,
    provider: Option<&Provider>,
    status: RequestStatus,
) -> ServiceRequest {
    let now = Utc::now();
    ServiceRequest {
        id: ServiceRequestId::new(),
        customer_id: customer.map(|c| c.id),
        provider_id: provider.map(|p| p.id),
        service_type: "Boundary Dispute Resolution".into(),
        title: "Fence encroachment".into(),
        description: "Neighbour built over the boundary".into(),
        budget_range: "Open to discussion".into(),
        urgency: Urgency::Medium,
        preferred_communication: CommunicationChannel::Whatsapp,
        customer_phone: "9000000000".into(),
        customer_email: customer.map(|c| c.email.clone()).unwrap_or_default(),
        documents: vec![],
        status,
        accepted_at: None,
        completed_at: None,
        created_at: now,
        updated_at: now,
    }
}
