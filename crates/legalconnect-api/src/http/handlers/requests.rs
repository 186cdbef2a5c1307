//! Service request submission, provider actions and the customer dashboard.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use legalconnect_core::service::request::CustomerDashboard;
use legalconnect_types::id::ServiceRequestId;
use legalconnect_types::request::{RequestAction, ServiceRequest, ServiceRequestForm};

use crate::http::error::AppError;
use crate::http::extractors::auth::{CurrentUser, MaybeUser};
use crate::http::response::{ApiResponse, ApiResult, ok};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ActionBody {
    pub action: RequestAction,
}

/// POST /api/v1/requests - Anonymous visitors may submit too.
pub async fn submit_request(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(form): Json<ServiceRequestForm>,
) -> ApiResult<ServiceRequest> {
    let start = Instant::now();
    let request = state.request_service.submit(user.as_ref(), form).await?;
    Ok(Json(
        ApiResponse::success(request, start.elapsed().as_millis() as u64)
            .with_link("dashboard", "/api/v1/customer/dashboard"),
    ))
}

/// POST /api/v1/requests/{id}/actions
pub async fn apply_action(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<ActionBody>,
) -> ApiResult<ServiceRequest> {
    let start = Instant::now();
    let id: ServiceRequestId = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid request id: '{id}'")))?;
    let request = state
        .request_service
        .apply_action(&user, &id, body.action)
        .await?;
    Ok(ok(request, start))
}

/// GET /api/v1/customer/dashboard
pub async fn customer_dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<CustomerDashboard> {
    let start = Instant::now();
    let dashboard = state.request_service.customer_dashboard(&user).await?;
    Ok(ok(dashboard, start))
}
