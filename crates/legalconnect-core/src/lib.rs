//! Marketplace use cases and the trait definitions they depend on.
//!
//! This crate defines the "ports" (repository and integration traits) that the
//! infrastructure layer implements. It depends only on `legalconnect-types` --
//! never on `legalconnect-infra` or any database/IO crate.

pub mod integration;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;
