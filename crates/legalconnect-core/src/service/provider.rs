//! Provider self-service: profile edits, offerings and the dashboard.

use chrono::Utc;
use serde::Serialize;

use legalconnect_types::error::MarketplaceError;
use legalconnect_types::provider::{
    Provider, ProviderType, ServiceOffering, UpdateProviderProfile,
};
use legalconnect_types::request::{RequestStatus, ServiceRequest};
use legalconnect_types::review::{Review, average_rating};
use legalconnect_types::user::User;
use legalconnect_types::validation::FieldErrors;

use crate::repository::SortOrder;
use crate::repository::provider::ProviderRepository;
use crate::repository::review::{ReviewFilter, ReviewRepository};
use crate::repository::service_request::{ServiceRequestFilter, ServiceRequestRepository};
use crate::service::directory::customer_contact_url;
use crate::service::onboarding::normalize_offering;

/// A request as the provider sees it, with a link to reach the customer.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderRequestView {
    #[serde(flatten)]
    pub request: ServiceRequest,
    pub whatsapp_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderDashboard {
    pub provider: Provider,
    pub requests: Vec<ProviderRequestView>,
    pub reviews: Vec<Review>,
    pub total_requests: usize,
    pub completed_requests: usize,
    pub average_rating: f64,
}

pub struct ProviderService<P, S, R>
where
    P: ProviderRepository,
    S: ServiceRequestRepository,
    R: ReviewRepository,
{
    providers: P,
    requests: S,
    reviews: R,
}

impl<P, S, R> ProviderService<P, S, R>
where
    P: ProviderRepository,
    S: ServiceRequestRepository,
    R: ReviewRepository,
{
    pub fn new(providers: P, requests: S, reviews: R) -> Self {
        Self {
            providers,
            requests,
            reviews,
        }
    }

    /// The caller's own provider profile.
    pub async fn my_profile(&self, user: &User) -> Result<Provider, MarketplaceError> {
        self.providers
            .get_by_user(&user.id)
            .await?
            .ok_or(MarketplaceError::NotFound("provider profile"))
    }

    pub async fn update_profile(
        &self,
        user: &User,
        update: UpdateProviderProfile,
    ) -> Result<Provider, MarketplaceError> {
        let mut provider = self.my_profile(user).await?;

        fn set_text(target: &mut String, value: Option<String>) {
            if let Some(value) = value {
                *target = value.trim().to_string();
            }
        }
        set_text(&mut provider.business_name, update.business_name);
        set_text(&mut provider.license_number, update.license_number);
        set_text(&mut provider.bio, update.bio);
        set_text(&mut provider.phone_number, update.phone_number);
        set_text(&mut provider.whatsapp_number, update.whatsapp_number);
        set_text(&mut provider.office_address, update.office_address);
        set_text(&mut provider.city, update.city);
        set_text(&mut provider.state, update.state);
        if let Some(years) = update.experience_years {
            provider.experience_years = years;
        }
        if let Some(qualifications) = update.qualifications {
            provider.qualifications = qualifications
                .into_iter()
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty())
                .collect();
        }
        if let Some(specializations) = update.specializations {
            provider.specializations.clear();
            for spec in specializations {
                if !provider.specializations.contains(&spec) {
                    provider.specializations.push(spec);
                }
            }
        }
        if let Some(photo) = update.profile_photo {
            provider.profile_photo = (!photo.trim().is_empty()).then_some(photo);
        }
        if let Some(available) = update.is_available {
            provider.is_available = available;
        }

        validate_profile(&provider)?;
        provider.updated_at = Utc::now();
        Ok(self.providers.update(&provider).await?)
    }

    pub async fn add_offering(
        &self,
        user: &User,
        offering: ServiceOffering,
    ) -> Result<Provider, MarketplaceError> {
        let offering = validate_offering(&offering)?;
        let mut provider = self.my_profile(user).await?;
        provider.services_offered.push(offering);
        self.save(provider).await
    }

    pub async fn edit_offering(
        &self,
        user: &User,
        index: usize,
        offering: ServiceOffering,
    ) -> Result<Provider, MarketplaceError> {
        let offering = validate_offering(&offering)?;
        let mut provider = self.my_profile(user).await?;
        let slot = provider
            .services_offered
            .get_mut(index)
            .ok_or(MarketplaceError::NotFound("service offering"))?;
        *slot = offering;
        self.save(provider).await
    }

    pub async fn remove_offering(
        &self,
        user: &User,
        index: usize,
    ) -> Result<Provider, MarketplaceError> {
        let mut provider = self.my_profile(user).await?;
        if index >= provider.services_offered.len() {
            return Err(MarketplaceError::NotFound("service offering"));
        }
        provider.services_offered.remove(index);
        self.save(provider).await
    }

    /// Profile, requests addressed to it and its reviews, newest first.
    pub async fn dashboard(&self, user: &User) -> Result<ProviderDashboard, MarketplaceError> {
        let provider = self.my_profile(user).await?;
        let requests = self
            .requests
            .list(Some(ServiceRequestFilter {
                provider_id: Some(provider.id),
                sort_order: Some(SortOrder::Desc),
                ..Default::default()
            }))
            .await?;
        let reviews = self
            .reviews
            .list(Some(ReviewFilter {
                provider_id: Some(provider.id),
                ..Default::default()
            }))
            .await?;

        let completed_requests = requests
            .iter()
            .filter(|r| r.status == RequestStatus::Completed)
            .count();
        let ratings: Vec<u8> = reviews.iter().map(|r| r.rating).collect();

        Ok(ProviderDashboard {
            total_requests: requests.len(),
            completed_requests,
            average_rating: average_rating(&ratings),
            requests: requests
                .into_iter()
                .map(|request| ProviderRequestView {
                    whatsapp_url: customer_contact_url(&request),
                    request,
                })
                .collect(),
            reviews,
            provider,
        })
    }

    async fn save(&self, mut provider: Provider) -> Result<Provider, MarketplaceError> {
        provider.updated_at = Utc::now();
        Ok(self.providers.update(&provider).await?)
    }
}

fn validate_offering(offering: &ServiceOffering) -> Result<ServiceOffering, MarketplaceError> {
    if let Some(offering) = normalize_offering(offering) {
        return Ok(offering);
    }
    let mut errors = FieldErrors::new();
    errors.require("service_name", &offering.service_name, "Service name is required");
    errors.require("price_range", &offering.price_range, "Price range is required");
    Err(errors.into())
}

fn validate_profile(provider: &Provider) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require("business_name", &provider.business_name, "Business name is required");
    errors.require("phone_number", &provider.phone_number, "Phone number is required");
    errors.require("city", &provider.city, "City is required");
    errors.require("state", &provider.state, "State is required");
    if provider.provider_type == ProviderType::Advocate {
        errors.require(
            "license_number",
            &provider.license_number,
            "License number is required for advocates",
        );
    }
    errors.into_result()
}
