//! Provider self-service: dashboard, profile edits and service offerings.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};

use legalconnect_core::service::provider::ProviderDashboard;
use legalconnect_types::provider::{Provider, ServiceOffering, UpdateProviderProfile};

use crate::http::extractors::auth::CurrentUser;
use crate::http::response::{ApiResult, ok};
use crate::state::AppState;

/// GET /api/v1/provider/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<ProviderDashboard> {
    let start = Instant::now();
    let dashboard = state.provider_service.dashboard(&user).await?;
    Ok(ok(dashboard, start))
}

/// PUT /api/v1/provider/profile
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<UpdateProviderProfile>,
) -> ApiResult<Provider> {
    let start = Instant::now();
    let provider = state.provider_service.update_profile(&user, body).await?;
    Ok(ok(provider, start))
}

/// POST /api/v1/provider/services
pub async fn add_offering(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<ServiceOffering>,
) -> ApiResult<Provider> {
    let start = Instant::now();
    let provider = state.provider_service.add_offering(&user, body).await?;
    Ok(ok(provider, start))
}

/// PUT /api/v1/provider/services/{index}
pub async fn edit_offering(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(index): Path<usize>,
    Json(body): Json<ServiceOffering>,
) -> ApiResult<Provider> {
    let start = Instant::now();
    let provider = state
        .provider_service
        .edit_offering(&user, index, body)
        .await?;
    Ok(ok(provider, start))
}

/// DELETE /api/v1/provider/services/{index}
pub async fn remove_offering(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(index): Path<usize>,
) -> ApiResult<Provider> {
    let start = Instant::now();
    let provider = state.provider_service.remove_offering(&user, index).await?;
    Ok(ok(provider, start))
}
