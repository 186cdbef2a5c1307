//! Session handlers: code login, logout and the current user's record.

use std::time::Instant;

use axum::Json;
use axum::extract::State;

use legalconnect_types::session::{
    LoginChallenge, LoginRequest, LoginResponse, VerifyLoginRequest,
};
use legalconnect_types::user::{UpdateMyUserData, User};

use crate::http::extractors::auth::{BearerToken, CurrentUser};
use crate::http::response::{ApiResponse, ApiResult, ok};
use crate::state::AppState;

/// POST /api/v1/auth/login - Mail a one-time login code. Opens no session.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<LoginChallenge> {
    let start = Instant::now();
    let challenge = state.auth_service.request_code(body).await?;
    Ok(Json(
        ApiResponse::success(challenge, start.elapsed().as_millis() as u64)
            .with_link("verify", "/api/v1/auth/verify"),
    ))
}

/// POST /api/v1/auth/verify - Exchange the mailed code for a session.
pub async fn verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyLoginRequest>,
) -> ApiResult<LoginResponse> {
    let start = Instant::now();
    let response = state.auth_service.verify_code(body).await?;
    let redirect = response.redirect_to.clone();
    Ok(Json(
        ApiResponse::success(response, start.elapsed().as_millis() as u64)
            .with_link("redirect", &redirect)
            .with_link("me", "/api/v1/auth/me"),
    ))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<serde_json::Value> {
    let start = Instant::now();
    state.auth_service.logout(&token).await?;
    Ok(ok(serde_json::json!({ "logged_out": true }), start))
}

/// GET /api/v1/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> ApiResult<User> {
    let start = Instant::now();
    Ok(ok(user, start))
}

/// PUT /api/v1/auth/me
pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<UpdateMyUserData>,
) -> ApiResult<User> {
    let start = Instant::now();
    let user = state.auth_service.update_my_user_data(&user, body).await?;
    Ok(ok(user, start))
}
