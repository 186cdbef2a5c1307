//! Provider used when no language model is configured.

use legalconnect_core::integration::llm::LlmProvider;
use legalconnect_types::llm::{InvokeLlm, LlmError};

/// Fails every call with [`LlmError::Disabled`], so chat falls back to the
/// canned reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLlm;

impl LlmProvider for DisabledLlm {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn complete(&self, _request: &InvokeLlm) -> Result<String, LlmError> {
        Err(LlmError::Disabled)
    }
}
