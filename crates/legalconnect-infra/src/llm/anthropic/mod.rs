//! Anthropic Claude provider for the legal assistant.

pub mod client;
pub mod types;

pub use client::AnthropicProvider;
