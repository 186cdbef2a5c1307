//! Shared domain types for LegalConnect.
//!
//! This crate contains the marketplace's domain model: users, legal service
//! providers, service requests, reviews, the admin audit log, the service
//! catalog, and the request/response shapes of the external integrations
//! (LLM, email, file upload).
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod audit;
pub mod blog;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod id;
pub mod integration;
pub mod llm;
pub mod provider;
pub mod request;
pub mod review;
pub mod session;
pub mod user;
pub mod validation;
