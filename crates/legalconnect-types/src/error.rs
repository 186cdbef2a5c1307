use thiserror::Error;

use crate::validation::FieldErrors;

/// Errors from repository operations (used by trait definitions in legalconnect-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the email and file upload integrations.
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("{service} request failed: {message}")]
    Request { service: &'static str, message: String },

    #[error("{service} rejected the request with HTTP {status}: {body}")]
    Rejected {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("integration not configured: {0}")]
    NotConfigured(String),

    #[error("io error: {0}")]
    Io(String),
}

/// Errors surfaced by marketplace use cases.
#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("cannot move from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("integration error: {0}")]
    Integration(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl MarketplaceError {
    /// Single-field validation failure.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        MarketplaceError::Validation(errors)
    }
}

impl From<FieldErrors> for MarketplaceError {
    fn from(errors: FieldErrors) -> Self {
        MarketplaceError::Validation(errors)
    }
}

impl From<RepositoryError> for MarketplaceError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => MarketplaceError::NotFound("record"),
            RepositoryError::Conflict(msg) => MarketplaceError::Conflict(msg),
            other => MarketplaceError::Storage(other.to_string()),
        }
    }
}

impl From<IntegrationError> for MarketplaceError {
    fn from(e: IntegrationError) -> Self {
        MarketplaceError::Integration(e.to_string())
    }
}
