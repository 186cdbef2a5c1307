//! LlmProvider trait and its type-erased wrapper.
//!
//! The marketplace sends a single prompt and expects free text back. There is
//! no streaming and no tool orchestration beyond letting the provider ground
//! its answer with a web search.

use std::future::Future;
use std::pin::Pin;

use legalconnect_types::llm::{InvokeLlm, LlmError};

/// Trait for LLM provider backends.
///
/// Implementations live in legalconnect-infra (e.g., `AnthropicProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Send the prompt and return the response text.
    fn complete(
        &self,
        request: &InvokeLlm,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}

/// Object-safe version of [`LlmProvider`] with boxed futures.
///
/// A blanket implementation is provided for all types implementing `LlmProvider`.
pub trait LlmProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a InvokeLlm,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;
}

impl<T: LlmProvider> LlmProviderDyn for T {
    fn name(&self) -> &str {
        LlmProvider::name(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a InvokeLlm,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(self.complete(request))
    }
}

/// Type-erased LLM provider for runtime provider selection.
///
/// Since `LlmProvider` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxLlmProvider` delegates to the inner `LlmProviderDyn` and
/// itself implements `LlmProvider`, so services stay generic.
pub struct BoxLlmProvider {
    inner: Box<dyn LlmProviderDyn + Send + Sync>,
}

impl BoxLlmProvider {
    /// Wrap a concrete `LlmProvider` in a type-erased box.
    pub fn new<T: LlmProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }
}

impl LlmProvider for BoxLlmProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(&self, request: &InvokeLlm) -> Result<String, LlmError> {
        self.inner.complete_boxed(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl LlmProvider for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: &InvokeLlm) -> Result<String, LlmError> {
            Ok(request.prompt.to_uppercase())
        }
    }

    #[tokio::test]
    async fn test_box_provider_delegates() {
        let boxed = BoxLlmProvider::new(Echo);
        assert_eq!(LlmProvider::name(&boxed), "echo");
        let reply = boxed
            .complete(&InvokeLlm {
                prompt: "namaste".into(),
                add_context_from_internet: false,
            })
            .await
            .unwrap();
        assert_eq!(reply, "NAMASTE");
    }
}
