//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use legalconnect_types::error::MarketplaceError;

use crate::http::response::ApiResponse;

#[derive(Debug)]
pub enum AppError {
    Marketplace(MarketplaceError),
    /// Malformed path or query input.
    BadRequest(String),
}

impl From<MarketplaceError> for AppError {
    fn from(e: MarketplaceError) -> Self {
        AppError::Marketplace(e)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Marketplace(e) => write!(f, "{e}"),
            AppError::BadRequest(msg) => write!(f, "{msg}"),
        }
    }
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Marketplace(e) => match e {
                MarketplaceError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                MarketplaceError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                MarketplaceError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
                MarketplaceError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                MarketplaceError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
                MarketplaceError::InvalidTransition { .. } => {
                    (StatusCode::CONFLICT, "INVALID_TRANSITION")
                }
                MarketplaceError::Integration(_) => (StatusCode::BAD_GATEWAY, "INTEGRATION_ERROR"),
                MarketplaceError::Storage(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
                }
            },
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(code, error = ?self, "request failed");
        }

        let (message, details) = match self {
            AppError::Marketplace(MarketplaceError::Validation(errors)) => (
                "Please correct the highlighted fields".to_string(),
                serde_json::to_value(&errors).ok(),
            ),
            AppError::Marketplace(e) => (e.to_string(), None),
            AppError::BadRequest(msg) => (msg, None),
        };

        (status, axum::Json(ApiResponse::error(code, &message, details))).into_response()
    }
}
