//! Integration trait definitions (ports) for the external services the
//! marketplace calls: language model, email and file storage, plus token
//! hashing for sessions.

pub mod email;
pub mod hash;
pub mod llm;
pub mod storage;
