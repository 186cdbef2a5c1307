//! Language model providers.
//!
//! [`create_provider`] picks the backend named in [`LlmConfig`] and resolves
//! its API key from the environment.

pub mod anthropic;
pub mod disabled;

use secrecy::SecretString;

use legalconnect_core::integration::llm::BoxLlmProvider;
use legalconnect_types::config::{LlmBackend, LlmConfig};
use legalconnect_types::llm::LlmError;

use self::anthropic::AnthropicProvider;
use self::disabled::DisabledLlm;

/// Build the configured provider. `api_key` is the value of the variable
/// named by `config.api_key_env`, if set.
pub fn create_provider(
    config: &LlmConfig,
    api_key: Option<&str>,
) -> Result<BoxLlmProvider, LlmError> {
    match config.provider {
        LlmBackend::Anthropic => {
            let key = api_key
                .filter(|k| !k.trim().is_empty())
                .ok_or(LlmError::AuthenticationFailed)?;
            let provider = AnthropicProvider::new(
                SecretString::from(key.to_string()),
                config.model.clone(),
                config.base_url.clone(),
                config.max_tokens,
            )?;
            Ok(BoxLlmProvider::new(provider))
        }
        LlmBackend::Disabled => Ok(BoxLlmProvider::new(DisabledLlm)),
    }
}

/// Like [`create_provider`], reading the key from the environment and
/// degrading to [`DisabledLlm`] with a warning when it cannot be built.
pub fn provider_from_env(config: &LlmConfig) -> BoxLlmProvider {
    let api_key = std::env::var(&config.api_key_env).ok();
    match create_provider(config, api_key.as_deref()) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::warn!(
                error = %e,
                key_env = %config.api_key_env,
                "language model unavailable, chat will use the fallback reply"
            );
            BoxLlmProvider::new(DisabledLlm)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legalconnect_core::integration::llm::LlmProvider;
    use legalconnect_types::llm::InvokeLlm;

    #[test]
    fn test_anthropic_requires_key() {
        let config = LlmConfig::default();
        assert!(matches!(
            create_provider(&config, None),
            Err(LlmError::AuthenticationFailed)
        ));
        assert!(matches!(
            create_provider(&config, Some("  ")),
            Err(LlmError::AuthenticationFailed)
        ));
        let provider = create_provider(&config, Some("sk-test")).unwrap();
        assert_eq!(provider.name(), "anthropic");
    }

    #[tokio::test]
    async fn test_disabled_backend() {
        let config = LlmConfig {
            provider: LlmBackend::Disabled,
            ..Default::default()
        };
        let provider = create_provider(&config, None).unwrap();
        assert_eq!(provider.name(), "disabled");
        let result = provider
            .complete(&InvokeLlm {
                prompt: "hello".into(),
                add_context_from_internet: true,
            })
            .await;
        assert!(matches!(result, Err(LlmError::Disabled)));
    }

    #[test]
    fn test_missing_env_key_degrades() {
        let config = LlmConfig {
            api_key_env: "LEGALCONNECT_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        assert_eq!(provider_from_env(&config).name(), "disabled");
    }
}
