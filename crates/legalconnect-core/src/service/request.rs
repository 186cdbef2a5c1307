//! Service requests: submission, the customer dashboard and provider actions.

use std::collections::HashSet;

use chrono::Utc;
use serde::Serialize;

use legalconnect_types::error::MarketplaceError;
use legalconnect_types::id::{ProviderId, ServiceRequestId, UserId};
use legalconnect_types::provider::{Provider, VerificationStatus};
use legalconnect_types::request::{
    CustomerRequestView, RequestAction, RequestStatus, ServiceRequest, ServiceRequestForm,
};
use legalconnect_types::user::User;
use legalconnect_types::validation::FieldErrors;

use crate::integration::email::EmailSender;
use crate::repository::SortOrder;
use crate::repository::provider::ProviderRepository;
use crate::repository::review::{ReviewFilter, ReviewRepository};
use crate::repository::service_request::{ServiceRequestFilter, ServiceRequestRepository};
use crate::repository::user::UserRepository;
use crate::service::notify;

/// Every required field of the request form, checked at once.
pub fn validate_request(form: &ServiceRequestForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require("service_type", &form.service_type, "Service type is required");
    errors.require("title", &form.title, "Title is required");
    errors.require("description", &form.description, "Description is required");
    errors.require("budget_range", &form.budget_range, "Budget range is required");
    if form.urgency.is_none() {
        errors.add("urgency", "Urgency level is required");
    }
    errors.require("customer_email", &form.customer_email, "Email is required");
    errors.require("customer_phone", &form.customer_phone, "Phone number is required");
    errors.into_result()
}

/// Request counts per status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub accepted: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn tally<'a>(requests: impl IntoIterator<Item = &'a ServiceRequest>) -> Self {
        let mut counts = Self::default();
        for request in requests {
            counts.total += 1;
            if request.status.is_active() {
                counts.active += 1;
            }
            match request.status {
                RequestStatus::Pending => counts.pending += 1,
                RequestStatus::Accepted => counts.accepted += 1,
                RequestStatus::InProgress => counts.in_progress += 1,
                RequestStatus::Completed => counts.completed += 1,
                RequestStatus::Cancelled => counts.cancelled += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerDashboard {
    pub requests: Vec<CustomerRequestView>,
    pub counts: StatusCounts,
}

pub struct RequestService<U, P, S, R, E>
where
    U: UserRepository,
    P: ProviderRepository,
    S: ServiceRequestRepository,
    R: ReviewRepository,
    E: EmailSender,
{
    users: U,
    providers: P,
    requests: S,
    reviews: R,
    mailer: E,
}

impl<U, P, S, R, E> RequestService<U, P, S, R, E>
where
    U: UserRepository,
    P: ProviderRepository,
    S: ServiceRequestRepository,
    R: ReviewRepository,
    E: EmailSender,
{
    pub fn new(users: U, providers: P, requests: S, reviews: R, mailer: E) -> Self {
        Self {
            users,
            providers,
            requests,
            reviews,
            mailer,
        }
    }

    /// Create a pending request.
    ///
    /// Contact details default to the logged-in user's profile. A request
    /// addressed to a provider notifies them by email; a failed email is
    /// logged and does not fail the submission.
    pub async fn submit(
        &self,
        current_user: Option<&User>,
        mut form: ServiceRequestForm,
    ) -> Result<ServiceRequest, MarketplaceError> {
        if let Some(user) = current_user {
            if user.is_provider() {
                return Err(MarketplaceError::Forbidden(
                    "providers cannot submit service requests".into(),
                ));
            }
            if form.customer_email.trim().is_empty() {
                form.customer_email = user.email.clone();
            }
            if form.customer_phone.trim().is_empty() {
                form.customer_phone = user.phone_number.clone().unwrap_or_default();
            }
        }
        validate_request(&form)?;
        let urgency = form
            .urgency
            .ok_or_else(|| MarketplaceError::invalid("urgency", "Urgency level is required"))?;

        let provider = match form.provider_id {
            Some(id) => Some(self.direct_recipient(&id).await?),
            None => None,
        };

        let now = Utc::now();
        let request = ServiceRequest {
            id: ServiceRequestId::new(),
            customer_id: current_user.map(|u| u.id),
            provider_id: provider.as_ref().map(|p| p.id),
            service_type: form.service_type.trim().to_string(),
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            budget_range: form.budget_range.trim().to_string(),
            urgency,
            preferred_communication: form.preferred_communication,
            customer_phone: form.customer_phone.trim().to_string(),
            customer_email: form.customer_email.trim().to_string(),
            documents: form.documents,
            status: RequestStatus::Pending,
            accepted_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        let request = self.requests.create(&request).await?;
        tracing::info!(request_id = %request.id, direct = provider.is_some(), "service request submitted");

        if let Some(provider) = provider {
            self.notify_provider(&provider.user_id, &provider.business_name, &request)
                .await;
        }
        Ok(request)
    }

    /// A provider that may receive a direct request: verified and available.
    /// Unverified profiles are hidden, so they read as missing.
    async fn direct_recipient(&self, id: &ProviderId) -> Result<Provider, MarketplaceError> {
        let provider = self
            .providers
            .get_by_id(id)
            .await?
            .filter(|p| p.verification_status == VerificationStatus::Verified)
            .ok_or(MarketplaceError::NotFound("provider"))?;
        if !provider.is_available {
            return Err(MarketplaceError::Forbidden(
                "this provider is not accepting requests".into(),
            ));
        }
        Ok(provider)
    }

    async fn notify_provider(&self, user_id: &UserId, business_name: &str, request: &ServiceRequest) {
        let recipient = match self.users.get_by_id(user_id).await {
            Ok(Some(user)) if !user.email.is_empty() => user.email,
            Ok(_) => return,
            Err(e) => {
                tracing::warn!(error = %e, "could not look up provider account for notification");
                return;
            }
        };
        let email = notify::direct_request(&recipient, business_name, &request.title);
        if let Err(e) = self.mailer.send(&email).await {
            tracing::warn!(request_id = %request.id, error = %e, "failed to email provider about direct request");
        }
    }

    /// The customer's requests, newest first, marked with whether each was reviewed.
    pub async fn customer_dashboard(&self, user: &User) -> Result<CustomerDashboard, MarketplaceError> {
        let requests = self
            .requests
            .list(Some(ServiceRequestFilter {
                customer_id: Some(user.id),
                sort_order: Some(SortOrder::Desc),
                ..Default::default()
            }))
            .await?;
        let reviewed: HashSet<ServiceRequestId> = self
            .reviews
            .list(Some(ReviewFilter {
                customer_id: Some(user.id),
                ..Default::default()
            }))
            .await?
            .into_iter()
            .map(|r| r.service_request_id)
            .collect();

        let counts = StatusCounts::tally(&requests);
        let requests = requests
            .into_iter()
            .map(|request| CustomerRequestView {
                is_reviewed: reviewed.contains(&request.id),
                request,
            })
            .collect();
        Ok(CustomerDashboard { requests, counts })
    }

    /// Move a request through its lifecycle on behalf of the bound provider.
    pub async fn apply_action(
        &self,
        user: &User,
        request_id: &ServiceRequestId,
        action: RequestAction,
    ) -> Result<ServiceRequest, MarketplaceError> {
        let mut request = self
            .requests
            .get_by_id(request_id)
            .await?
            .ok_or(MarketplaceError::NotFound("service request"))?;
        let mut provider = self
            .providers
            .get_by_user(&user.id)
            .await?
            .ok_or_else(|| MarketplaceError::Forbidden("only providers can act on requests".into()))?;
        if request.provider_id != Some(provider.id) {
            return Err(MarketplaceError::Forbidden(
                "this request is not addressed to you".into(),
            ));
        }

        let target = action.target_status();
        let previous = request
            .transition(target)
            .map_err(|from| MarketplaceError::InvalidTransition {
                from: from.to_string(),
                to: target.to_string(),
            })?;
        let request = self.requests.update(&request).await?;
        tracing::info!(
            request_id = %request.id,
            from = %previous,
            to = %request.status,
            "service request status changed"
        );

        if request.status == RequestStatus::Completed {
            provider.completed_cases += 1;
            provider.updated_at = Utc::now();
            self.providers.update(&provider).await?;
        }
        Ok(request)
    }
}
