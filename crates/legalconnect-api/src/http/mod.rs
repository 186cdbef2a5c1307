//! REST API under `/api/v1` with bearer session authentication and the
//! envelope response format.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
