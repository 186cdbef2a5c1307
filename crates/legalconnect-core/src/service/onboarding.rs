//! Provider signup: a four-step wizard and the final profile submission.
//!
//! Steps are 1 Basic Info, 2 Professional Details, 3 Services and
//! 4 Verification. Each step validates only its own fields; moving forward
//! requires the current step to be valid. Submission re-checks every step.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use legalconnect_types::error::MarketplaceError;
use legalconnect_types::id::ProviderId;
use legalconnect_types::provider::{Provider, ProviderType, ServiceOffering, VerificationStatus};
use legalconnect_types::user::{User, UserType};
use legalconnect_types::validation::{FieldErrors, blank_as_none};

use crate::repository::provider::ProviderRepository;
use crate::repository::user::UserRepository;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 4;

pub fn step_title(step: u8) -> &'static str {
    match step {
        1 => "Basic Info",
        2 => "Professional Details",
        3 => "Services",
        4 => "Verification",
        _ => "Unknown",
    }
}

/// Everything the wizard collects before the profile is created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSignupForm {
    #[serde(deserialize_with = "blank_as_none")]
    pub provider_type: Option<ProviderType>,
    pub business_name: String,
    pub license_number: String,
    pub bio: String,
    pub phone_number: String,
    pub whatsapp_number: String,
    pub office_address: String,
    pub city: String,
    pub state: String,
    pub experience_years: Option<i64>,
    pub qualifications: Vec<String>,
    pub specializations: Vec<String>,
    pub services_offered: Vec<ServiceOffering>,
    pub profile_photo: Option<String>,
    pub verification_documents: Vec<String>,
}

impl ProviderSignupForm {
    /// Validate the fields belonging to `step`. Unknown steps are always valid.
    pub fn validate_step(&self, step: u8) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        match step {
            1 => {
                if self.provider_type.is_none() {
                    errors.add("provider_type", "Provider type is required");
                }
                if self.provider_type == Some(ProviderType::Advocate) {
                    errors.require(
                        "license_number",
                        &self.license_number,
                        "License number is required for advocates",
                    );
                }
                errors.require("business_name", &self.business_name, "Business name is required");
                errors.require("phone_number", &self.phone_number, "Phone number is required");
                errors.require("city", &self.city, "City is required");
                errors.require("state", &self.state, "State is required");
            }
            2 => {
                errors.require("bio", &self.bio, "Professional bio is required");
                if !self.experience_years.is_some_and(|y| y >= 0) {
                    errors.add("experience_years", "Valid experience years required");
                }
                if self.qualifications.is_empty() {
                    errors.add("qualifications", "At least one qualification is required");
                }
                if self.specializations.is_empty() {
                    errors.add("specializations", "At least one specialization is required");
                }
            }
            3 => {
                if self.services_offered.is_empty() {
                    errors.add("services_offered", "At least one service is required");
                }
            }
            4 => {
                if self.verification_documents.is_empty() {
                    errors.add(
                        "verification_documents",
                        "At least one verification document is required (e.g., ID, Bar Council Certificate).",
                    );
                }
            }
            _ => {}
        }
        errors.into_result()
    }

    /// Validate steps 1 through `step`, collecting every failure.
    pub fn validate_through(&self, step: u8) -> Result<(), FieldErrors> {
        let mut all = FieldErrors::new();
        for s in FIRST_STEP..=step.min(LAST_STEP) {
            if let Err(errors) = self.validate_step(s) {
                all.extend(errors);
            }
        }
        all.into_result()
    }
}

/// Trim a service offering; `None` when name or price range is blank.
pub fn normalize_offering(offering: &ServiceOffering) -> Option<ServiceOffering> {
    let service_name = offering.service_name.trim();
    let price_range = offering.price_range.trim();
    if service_name.is_empty() || price_range.is_empty() {
        return None;
    }
    Some(ServiceOffering {
        service_name: service_name.to_string(),
        description: offering.description.trim().to_string(),
        price_range: price_range.to_string(),
    })
}

/// Step navigation plus the list editing helpers of the signup form.
///
/// Deserializing rejects steps outside `FIRST_STEP..=LAST_STEP`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "WizardState")]
pub struct SignupWizard {
    step: u8,
    pub form: ProviderSignupForm,
}

/// Wire shape of [`SignupWizard`] before the step is checked.
#[derive(Deserialize)]
struct WizardState {
    step: u8,
    #[serde(default)]
    form: ProviderSignupForm,
}

impl TryFrom<WizardState> for SignupWizard {
    type Error = String;

    fn try_from(state: WizardState) -> Result<Self, Self::Error> {
        if !(FIRST_STEP..=LAST_STEP).contains(&state.step) {
            return Err(format!(
                "step must be between {FIRST_STEP} and {LAST_STEP}, got {}",
                state.step
            ));
        }
        Ok(Self {
            step: state.step,
            form: state.form,
        })
    }
}

impl Default for SignupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupWizard {
    pub fn new() -> Self {
        Self {
            step: FIRST_STEP,
            form: ProviderSignupForm::default(),
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn progress_percent(&self) -> u8 {
        (u16::from(self.step) * 100 / u16::from(LAST_STEP)) as u8
    }

    pub fn validate_current(&self) -> Result<(), FieldErrors> {
        self.form.validate_step(self.step)
    }

    /// Advance when the current step is valid. Stays on the last step.
    pub fn next(&mut self) -> Result<u8, FieldErrors> {
        self.validate_current()?;
        self.step = self.step.saturating_add(1).min(LAST_STEP);
        Ok(self.step)
    }

    pub fn prev(&mut self) -> u8 {
        self.step = self.step.saturating_sub(1).max(FIRST_STEP);
        self.step
    }

    pub fn add_qualification(&mut self, qualification: &str) -> bool {
        let trimmed = qualification.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.form.qualifications.push(trimmed.to_string());
        true
    }

    pub fn remove_qualification(&mut self, index: usize) {
        if index < self.form.qualifications.len() {
            self.form.qualifications.remove(index);
        }
    }

    /// Add the specialization if absent, remove it otherwise.
    pub fn toggle_specialization(&mut self, specialization: &str) {
        let specs = &mut self.form.specializations;
        if let Some(pos) = specs.iter().position(|s| s == specialization) {
            specs.remove(pos);
        } else {
            specs.push(specialization.to_string());
        }
    }

    pub fn add_service(&mut self, offering: &ServiceOffering) -> bool {
        match normalize_offering(offering) {
            Some(offering) => {
                self.form.services_offered.push(offering);
                true
            }
            None => false,
        }
    }

    pub fn remove_service(&mut self, index: usize) {
        if index < self.form.services_offered.len() {
            self.form.services_offered.remove(index);
        }
    }

    pub fn add_documents(&mut self, urls: impl IntoIterator<Item = String>) {
        self.form.verification_documents.extend(urls);
    }
}

pub struct OnboardingService<U: UserRepository, P: ProviderRepository> {
    users: U,
    providers: P,
}

impl<U: UserRepository, P: ProviderRepository> OnboardingService<U, P> {
    pub fn new(users: U, providers: P) -> Self {
        Self { users, providers }
    }

    /// Create a pending provider profile for `user` and mark them a provider.
    pub async fn submit(
        &self,
        user: &User,
        form: ProviderSignupForm,
    ) -> Result<Provider, MarketplaceError> {
        form.validate_through(LAST_STEP)?;

        if self.providers.get_by_user(&user.id).await?.is_some() {
            return Err(MarketplaceError::Conflict(
                "a provider profile already exists for this account".into(),
            ));
        }

        let provider = build_provider(user, form)?;
        let provider = self.providers.create(&provider).await?;

        let mut user = user.clone();
        user.user_type = UserType::Provider;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;

        tracing::info!(
            provider_id = %provider.id,
            user_id = %user.id,
            "provider profile submitted for verification"
        );
        Ok(provider)
    }
}

fn build_provider(user: &User, form: ProviderSignupForm) -> Result<Provider, MarketplaceError> {
    let provider_type = form
        .provider_type
        .ok_or_else(|| MarketplaceError::invalid("provider_type", "Provider type is required"))?;
    let experience_years = form
        .experience_years
        .and_then(|y| u32::try_from(y).ok())
        .ok_or_else(|| {
            MarketplaceError::invalid("experience_years", "Valid experience years required")
        })?;

    let mut specializations: Vec<String> = Vec::new();
    for spec in form.specializations {
        if !specializations.contains(&spec) {
            specializations.push(spec);
        }
    }

    let now = Utc::now();
    Ok(Provider {
        id: ProviderId::new(),
        user_id: user.id,
        provider_type,
        business_name: form.business_name.trim().to_string(),
        license_number: form.license_number.trim().to_string(),
        bio: form.bio.trim().to_string(),
        phone_number: form.phone_number.trim().to_string(),
        whatsapp_number: form.whatsapp_number.trim().to_string(),
        office_address: form.office_address.trim().to_string(),
        city: form.city.trim().to_string(),
        state: form.state.trim().to_string(),
        experience_years,
        qualifications: form.qualifications,
        specializations,
        services_offered: form.services_offered,
        profile_photo: form.profile_photo.filter(|p| !p.trim().is_empty()),
        verification_documents: form.verification_documents,
        verification_status: VerificationStatus::Pending,
        verification_reason: None,
        is_available: true,
        rating: 0.0,
        total_reviews: 0,
        completed_cases: 0,
        created_at: now,
        updated_at: now,
    })
}
