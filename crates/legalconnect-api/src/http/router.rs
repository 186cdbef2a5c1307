//! Axum router configuration with middleware.
//!
//! API routes live under `/api/v1/`. Uploaded files are served from
//! `/files/` out of the configured upload directory.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Multipart framing on top of the per-file limit.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Upper bound on one upload request, which may carry several files.
const MAX_FILES_PER_UPLOAD: u64 = 10;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = state
        .upload_service
        .max_bytes()
        .saturating_mul(MAX_FILES_PER_UPLOAD)
        .saturating_add(MULTIPART_OVERHEAD);
    let upload_limit = usize::try_from(upload_limit).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        // Sessions
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/verify", post(handlers::auth::verify))
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/auth/me",
            get(handlers::auth::me).put(handlers::auth::update_me),
        )
        .route("/reference", get(handlers::reference::reference))
        // Directory and signup
        .route(
            "/providers",
            get(handlers::providers::list_providers).post(handlers::providers::submit_provider),
        )
        .route(
            "/providers/featured",
            get(handlers::providers::featured_providers),
        )
        .route(
            "/providers/onboarding/validate",
            post(handlers::providers::validate_step),
        )
        .route("/providers/{id}", get(handlers::providers::get_provider))
        // Provider self-service
        .route("/provider/dashboard", get(handlers::provider::dashboard))
        .route("/provider/profile", put(handlers::provider::update_profile))
        .route("/provider/services", post(handlers::provider::add_offering))
        .route(
            "/provider/services/{index}",
            put(handlers::provider::edit_offering).delete(handlers::provider::remove_offering),
        )
        // Requests and reviews
        .route("/requests", post(handlers::requests::submit_request))
        .route(
            "/requests/{id}/actions",
            post(handlers::requests::apply_action),
        )
        .route(
            "/customer/dashboard",
            get(handlers::requests::customer_dashboard),
        )
        .route("/reviews", post(handlers::reviews::submit_review))
        // Admin
        .route("/admin/dashboard", get(handlers::admin::dashboard))
        .route(
            "/admin/providers/{id}/verify",
            post(handlers::admin::verify_provider),
        )
        .route(
            "/admin/providers/{id}/reject",
            post(handlers::admin::reject_provider),
        )
        .route(
            "/admin/providers/{id}/availability",
            post(handlers::admin::set_availability),
        )
        .route(
            "/admin/services",
            get(handlers::admin::list_services).post(handlers::admin::create_service),
        )
        .route(
            "/admin/services/{id}",
            put(handlers::admin::update_service).delete(handlers::admin::delete_service),
        )
        .route("/admin/audit-log", get(handlers::admin::audit_log))
        // Assistant, uploads, blog
        .route(
            "/chat",
            get(handlers::chat::intro).post(handlers::chat::ask),
        )
        .route(
            "/uploads",
            post(handlers::uploads::upload_files).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/blog", get(handlers::blog::list_articles))
        .route("/blog/{id}", get(handlers::blog::get_article));

    let files = ServeDir::new(&state.upload_dir);

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", api_routes)
        .nest_service("/files", files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
