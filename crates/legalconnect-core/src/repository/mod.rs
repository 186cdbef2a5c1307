//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (legalconnect-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod audit;
pub mod catalog;
pub mod login_code;
pub mod provider;
pub mod review;
pub mod service_request;
pub mod session;
pub mod user;

/// Sort order for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}
