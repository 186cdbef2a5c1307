//! Public provider directory and provider signup.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Serialize;

use legalconnect_core::service::directory::{
    FEATURED_LIMIT, Facets, ProviderProfile, facets, filter_providers,
};
use legalconnect_core::service::onboarding::{LAST_STEP, SignupWizard, step_title};
use legalconnect_types::id::ProviderId;
use legalconnect_types::provider::Provider;
use legalconnect_types::validation::FieldErrors;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::extractors::query::ProviderListQuery;
use crate::http::response::{ApiResponse, ApiResult, ok};
use crate::state::AppState;

/// Filtered providers plus the filter values available across the whole
/// verified directory.
#[derive(Debug, Serialize)]
pub struct ProviderListing {
    pub providers: Vec<Provider>,
    pub total: usize,
    pub facets: Facets,
}

/// Outcome of validating one wizard step.
#[derive(Debug, Serialize)]
pub struct StepValidation {
    pub step: u8,
    pub title: &'static str,
    pub valid: bool,
    pub errors: FieldErrors,
    pub next_step: u8,
    pub progress_percent: u8,
}

pub(crate) fn parse_provider_id(raw: &str) -> Result<ProviderId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid provider id: '{raw}'")))
}

/// GET /api/v1/providers - Verified providers with search and filters.
pub async fn list_providers(
    State(state): State<AppState>,
    Query(query): Query<ProviderListQuery>,
) -> ApiResult<ProviderListing> {
    let start = Instant::now();
    let query = query.into_directory_query()?;

    let verified = state.directory_service.list_verified().await?;
    let providers = filter_providers(&verified, &query);
    let listing = ProviderListing {
        total: providers.len(),
        facets: facets(&verified),
        providers,
    };
    Ok(Json(
        ApiResponse::success(listing, start.elapsed().as_millis() as u64)
            .with_link("self", "/api/v1/providers")
            .with_link("featured", "/api/v1/providers/featured"),
    ))
}

/// GET /api/v1/providers/featured
pub async fn featured_providers(State(state): State<AppState>) -> ApiResult<Vec<Provider>> {
    let start = Instant::now();
    let providers = state.directory_service.featured(FEATURED_LIMIT).await?;
    Ok(ok(providers, start))
}

/// GET /api/v1/providers/{id}
pub async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProviderProfile> {
    let start = Instant::now();
    let id = parse_provider_id(&id)?;
    let profile = state.directory_service.profile(&id).await?;
    Ok(Json(
        ApiResponse::success(profile, start.elapsed().as_millis() as u64)
            .with_link("self", &format!("/api/v1/providers/{id}"))
            .with_link("request", "/api/v1/requests"),
    ))
}

/// POST /api/v1/providers/onboarding/validate
///
/// Validation failures are data here, not errors: the wizard shows them next
/// to the fields and stays on the step.
pub async fn validate_step(Json(mut wizard): Json<SignupWizard>) -> ApiResult<StepValidation> {
    let start = Instant::now();
    let step = wizard.step();
    let (valid, errors) = match wizard.next() {
        Ok(_) => (true, FieldErrors::new()),
        Err(errors) => (false, errors),
    };
    let result = StepValidation {
        step,
        title: step_title(step),
        valid,
        errors,
        next_step: wizard.step(),
        progress_percent: wizard.progress_percent(),
    };
    Ok(ok(result, start))
}

/// POST /api/v1/providers - Submit the completed signup wizard.
pub async fn submit_provider(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(wizard): Json<SignupWizard>,
) -> ApiResult<Provider> {
    let start = Instant::now();
    if wizard.step() != LAST_STEP {
        tracing::debug!(step = wizard.step(), "signup submitted before the last step");
    }
    let provider = state.onboarding_service.submit(&user, wizard.form).await?;
    Ok(Json(
        ApiResponse::success(provider, start.elapsed().as_millis() as u64)
            .with_link("dashboard", "/api/v1/provider/dashboard"),
    ))
}
