//! Infrastructure layer for LegalConnect.
//!
//! Implements the ports defined in `legalconnect-core`: SQLite repositories,
//! the Anthropic language model client, the email gateway, local file
//! storage and session token hashing, plus the configuration loader.

pub mod config;
pub mod email;
pub mod hash;
pub mod llm;
pub mod sqlite;
pub mod storage;
