//! Business logic services (use cases).
//!
//! Services orchestrate repository and integration calls and enforce the
//! marketplace rules. They depend on traits (ports) -- never on concrete
//! infrastructure implementations.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod directory;
pub mod notify;
pub mod onboarding;
pub mod provider;
pub mod request;
pub mod review;
pub mod upload;
