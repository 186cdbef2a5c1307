//! Admin moderation, catalog management and the audit log.
//!
//! Every route takes [`AdminUser`], so non-admins are turned away before the
//! service layer runs. The services check again.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use legalconnect_core::service::admin::AdminDashboard;
use legalconnect_types::audit::AuditLogEntry;
use legalconnect_types::catalog::{CatalogService, CatalogServiceForm};
use legalconnect_types::id::CatalogServiceId;
use legalconnect_types::provider::Provider;

use crate::http::error::AppError;
use crate::http::extractors::auth::AdminUser;
use crate::http::extractors::query::{AdminDashboardQuery, AuditLogQuery};
use crate::http::handlers::providers::parse_provider_id;
use crate::http::response::{ApiResult, ok};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReasonBody {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityBody {
    pub is_available: bool,
}

fn parse_service_id(raw: &str) -> Result<CatalogServiceId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid service id: '{raw}'")))
}

/// GET /api/v1/admin/dashboard?year=2025
pub async fn dashboard(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Query(query): Query<AdminDashboardQuery>,
) -> ApiResult<AdminDashboard> {
    let start = Instant::now();
    let dashboard = state.admin_service.dashboard(&admin, query.year).await?;
    Ok(ok(dashboard, start))
}

/// POST /api/v1/admin/providers/{id}/verify
pub async fn verify_provider(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    body: Option<Json<ReasonBody>>,
) -> ApiResult<Provider> {
    let start = Instant::now();
    let id = parse_provider_id(&id)?;
    let reason = body
        .and_then(|Json(b)| b.reason)
        .filter(|r| !r.trim().is_empty());
    let provider = state
        .admin_service
        .verify_provider(&admin, &id, reason)
        .await?;
    Ok(ok(provider, start))
}

/// POST /api/v1/admin/providers/{id}/reject
pub async fn reject_provider(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(body): Json<ReasonBody>,
) -> ApiResult<Provider> {
    let start = Instant::now();
    let id = parse_provider_id(&id)?;
    let provider = state
        .admin_service
        .reject_provider(&admin, &id, body.reason.unwrap_or_default())
        .await?;
    Ok(ok(provider, start))
}

/// POST /api/v1/admin/providers/{id}/availability
pub async fn set_availability(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(body): Json<AvailabilityBody>,
) -> ApiResult<Provider> {
    let start = Instant::now();
    let id = parse_provider_id(&id)?;
    let provider = state
        .admin_service
        .set_availability(&admin, &id, body.is_available)
        .await?;
    Ok(ok(provider, start))
}

/// GET /api/v1/admin/services
pub async fn list_services(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> ApiResult<Vec<CatalogService>> {
    let start = Instant::now();
    let services = state.admin_service.list_services(&admin).await?;
    Ok(ok(services, start))
}

/// POST /api/v1/admin/services
pub async fn create_service(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(form): Json<CatalogServiceForm>,
) -> ApiResult<CatalogService> {
    let start = Instant::now();
    let service = state.admin_service.create_service(&admin, form).await?;
    Ok(ok(service, start))
}

/// PUT /api/v1/admin/services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(form): Json<CatalogServiceForm>,
) -> ApiResult<CatalogService> {
    let start = Instant::now();
    let id = parse_service_id(&id)?;
    let service = state
        .admin_service
        .update_service(&admin, &id, form)
        .await?;
    Ok(ok(service, start))
}

/// DELETE /api/v1/admin/services/{id}
pub async fn delete_service(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let start = Instant::now();
    let id = parse_service_id(&id)?;
    state.admin_service.delete_service(&admin, &id).await?;
    Ok(ok(serde_json::json!({ "deleted": true, "id": id }), start))
}

/// GET /api/v1/admin/audit-log?limit=50
pub async fn audit_log(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Query(query): Query<AuditLogQuery>,
) -> ApiResult<Vec<AuditLogEntry>> {
    let start = Instant::now();
    let entries = state.admin_service.audit_log(&admin, query.limit).await?;
    Ok(ok(entries, start))
}
