//! AnthropicProvider: [`LlmProvider`] over the Anthropic Messages API.
//!
//! The API key is held as a [`SecretString`] and only exposed when the
//! request headers are built.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use legalconnect_core::integration::llm::LlmProvider;
use legalconnect_types::llm::{InvokeLlm, LlmError};

use super::types::{AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicTool};

/// Search rounds allowed when internet context is requested.
const WEB_SEARCH_MAX_USES: u32 = 5;

pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    const API_VERSION: &'static str = "2023-06-01";

    pub fn new(
        api_key: SecretString,
        model: String,
        base_url: String,
        max_tokens: u32,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn to_anthropic_request(&self, request: &InvokeLlm) -> AnthropicRequest {
        let tools = if request.add_context_from_internet {
            vec![AnthropicTool::web_search(WEB_SEARCH_MAX_USES)]
        } else {
            Vec::new()
        };

        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            tools,
        }
    }
}

impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, request: &InvokeLlm) -> Result<String, LlmError> {
        let body = self.to_anthropic_request(request);

        let response = self
            .client
            .post(self.url("/v1/messages"))
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_ms = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1000);
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                400 => LlmError::InvalidRequest(error_body),
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited { retry_after_ms },
                529 => LlmError::Overloaded(error_body),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        tracing::debug!(
            id = %parsed.id,
            model = %parsed.model,
            stop_reason = ?parsed.stop_reason,
            "anthropic completion received"
        );

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(LlmError::Deserialization(
                "response contained no text".to_string(),
            ));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;

    fn make_provider(base_url: &str) -> AnthropicProvider {
        AnthropicProvider::new(
            SecretString::from("test-key-not-real"),
            "claude-sonnet-4-20250514".to_string(),
            base_url.to_string(),
            1024,
        )
        .unwrap()
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_request_includes_web_search_only_when_asked() {
        let provider = make_provider("https://api.anthropic.com/");
        assert_eq!(provider.url("/v1/messages"), "https://api.anthropic.com/v1/messages");

        let plain = provider.to_anthropic_request(&InvokeLlm {
            prompt: "What is a khata?".into(),
            add_context_from_internet: false,
        });
        assert!(plain.tools.is_empty());
        assert_eq!(plain.max_tokens, 1024);

        let grounded = provider.to_anthropic_request(&InvokeLlm {
            prompt: "Latest RERA rules".into(),
            add_context_from_internet: true,
        });
        assert_eq!(grounded.tools.len(), 1);
        assert_eq!(grounded.messages[0].content, "Latest RERA rules");
    }

    #[tokio::test]
    async fn test_complete_joins_text_blocks() {
        let router = Router::new().route(
            "/v1/messages",
            post(|headers: HeaderMap| async move {
                assert_eq!(headers["x-api-key"], "test-key-not-real");
                assert_eq!(headers["anthropic-version"], "2023-06-01");
                axum::Json(serde_json::json!({
                    "id": "msg_1",
                    "model": "claude-sonnet-4-20250514",
                    "stop_reason": "end_turn",
                    "content": [
                        {"type": "text", "text": "Adverse possession "},
                        {"type": "text", "text": "requires 12 years."}
                    ]
                }))
            }),
        );
        let provider = make_provider(&serve(router).await);
        let reply = provider
            .complete(&InvokeLlm {
                prompt: "adverse possession?".into(),
                add_context_from_internet: false,
            })
            .await
            .unwrap();
        assert_eq!(reply, "Adverse possession requires 12 years.");
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let router = Router::new()
            .route("/auth/v1/messages", post(|| async { StatusCode::UNAUTHORIZED }))
            .route(
                "/busy/v1/messages",
                post(|| async { (StatusCode::from_u16(529).unwrap(), "overloaded") }),
            )
            .route(
                "/limited/v1/messages",
                post(|| async { (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "2")], "") }),
            );
        let base = serve(router).await;
        let req = InvokeLlm {
            prompt: "q".into(),
            add_context_from_internet: false,
        };

        let auth = make_provider(&format!("{base}/auth")).complete(&req).await;
        assert!(matches!(auth, Err(LlmError::AuthenticationFailed)));

        let busy = make_provider(&format!("{base}/busy")).complete(&req).await;
        assert!(matches!(busy, Err(LlmError::Overloaded(body)) if body == "overloaded"));

        let limited = make_provider(&format!("{base}/limited")).complete(&req).await;
        assert!(matches!(
            limited,
            Err(LlmError::RateLimited {
                retry_after_ms: Some(2000)
            })
        ));
    }
}
