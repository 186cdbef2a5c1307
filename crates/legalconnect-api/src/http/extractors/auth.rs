//! Session authentication extractors.
//!
//! Tokens arrive as `Authorization: Bearer <token>` and are resolved through
//! the auth service, which compares SHA-256 digests against stored sessions.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use legalconnect_types::error::MarketplaceError;
use legalconnect_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// The raw bearer token, not yet resolved to a user.
pub struct BearerToken(pub String);

/// A logged-in user. Rejects with 401 otherwise.
pub struct CurrentUser(pub User);

/// The logged-in user when there is one. Invalid or expired tokens are
/// treated as anonymous.
pub struct MaybeUser(pub Option<User>);

/// A logged-in admin. Rejects with 401 or 403.
pub struct AdminUser(pub User);

fn bearer_token(parts: &Parts) -> Result<String, AppError> {
    let header = parts.headers.get("authorization").ok_or_else(|| {
        unauthorized("Missing session token. Provide it via 'Authorization: Bearer <token>'.")
    })?;
    let value = header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header encoding"))?;
    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Authorization header must use the Bearer scheme"))
}

fn unauthorized(message: &str) -> AppError {
    AppError::Marketplace(MarketplaceError::Unauthorized(message.to_string()))
}

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        bearer_token(parts).map(BearerToken)
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = state.auth_service.me(&token).await?;
        Ok(CurrentUser(user))
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Ok(token) = bearer_token(parts) else {
            return Ok(MaybeUser(None));
        };
        match state.auth_service.me(&token).await {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring invalid session on public route");
                Ok(MaybeUser(None))
            }
        }
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Marketplace(MarketplaceError::Forbidden(
                "admin access required".to_string(),
            )));
        }
        Ok(AdminUser(user))
    }
}
