//! Email senders: a JSON HTTP gateway and a logging fallback.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use legalconnect_core::integration::email::{BoxEmailSender, EmailSender};
use legalconnect_types::config::EmailConfig;
use legalconnect_types::error::IntegrationError;
use legalconnect_types::integration::EmailMessage;

const SERVICE: &str = "email";

#[derive(Serialize)]
struct GatewayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Posts `{from, to, subject, html}` to a transactional email API with a
/// bearer key.
pub struct HttpEmailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: SecretString,
    from: String,
}

impl HttpEmailSender {
    pub fn new(api_url: String, api_key: SecretString, from: String) -> Result<Self, IntegrationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| IntegrationError::Request {
                service: SERVICE,
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            api_url,
            api_key,
            from,
        })
    }
}

impl EmailSender for HttpEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), IntegrationError> {
        let payload = GatewayPayload {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.body,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| IntegrationError::Request {
                service: SERVICE,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Rejected {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to = %message.to, subject = %message.subject, "email sent");
        Ok(())
    }
}

/// Writes outgoing mail to the log instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), IntegrationError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "email gateway not configured, message logged only"
        );
        // Local development reads login codes from here.
        tracing::debug!(to = %message.to, body = %message.body, "logged message body");
        Ok(())
    }
}

/// HTTP sender when both the URL and the key are present, otherwise the
/// logging sender.
pub fn create_email_sender(config: &EmailConfig, api_key: Option<&str>) -> BoxEmailSender {
    let api_url = config.api_url.as_deref().map(str::trim).filter(|u| !u.is_empty());
    let api_key = api_key.map(str::trim).filter(|k| !k.is_empty());

    match (api_url, api_key) {
        (Some(url), Some(key)) => match HttpEmailSender::new(
            url.to_string(),
            SecretString::from(key.to_string()),
            config.from.clone(),
        ) {
            Ok(sender) => BoxEmailSender::new(sender),
            Err(e) => {
                tracing::warn!(error = %e, "email gateway unavailable, logging emails instead");
                BoxEmailSender::new(LogEmailSender)
            }
        },
        (Some(_), None) => {
            tracing::warn!(
                key_env = %config.api_key_env,
                "email api_url set but no API key found, logging emails instead"
            );
            BoxEmailSender::new(LogEmailSender)
        }
        _ => BoxEmailSender::new(LogEmailSender),
    }
}

/// [`create_email_sender`] with the key read from `config.api_key_env`.
pub fn email_sender_from_env(config: &EmailConfig) -> BoxEmailSender {
    let api_key = std::env::var(&config.api_key_env).ok();
    create_email_sender(config, api_key.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;

    fn message() -> EmailMessage {
        EmailMessage {
            to: "rao@x.in".into(),
            subject: "Hello".into(),
            body: "<p>Hi</p>".into(),
        }
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_gateway_payload_and_auth() {
        let router = Router::new().route(
            "/send",
            post(
                |headers: HeaderMap, axum::Json(body): axum::Json<serde_json::Value>| async move {
                    let authorized = headers
                        .get("authorization")
                        .is_some_and(|v| v == "Bearer mail-key");
                    let shaped = body["from"] == "LegalConnect <no-reply@legalconnect.in>"
                        && body["to"] == "rao@x.in"
                        && body["html"] == "<p>Hi</p>";
                    if authorized && shaped {
                        StatusCode::OK
                    } else {
                        StatusCode::BAD_REQUEST
                    }
                },
            ),
        );
        let base = serve(router).await;
        let config = EmailConfig {
            api_url: Some(format!("{base}/send")),
            ..Default::default()
        };
        let sender = create_email_sender(&config, Some("mail-key"));
        sender.send(&message()).await.unwrap();
    }

    #[tokio::test]
    async fn test_gateway_rejection() {
        let router = Router::new().route(
            "/send",
            post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "bad recipient") }),
        );
        let base = serve(router).await;
        let sender = HttpEmailSender::new(
            format!("{base}/send"),
            SecretString::from("k".to_string()),
            "from@x.in".into(),
        )
        .unwrap();
        let err = sender.send(&message()).await.unwrap_err();
        assert!(matches!(
            err,
            IntegrationError::Rejected { status: 422, ref body, .. } if body == "bad recipient"
        ));
    }

    #[tokio::test]
    async fn test_without_key_falls_back_to_logging() {
        let config = EmailConfig {
            api_url: Some("http://127.0.0.1:9/unreachable".into()),
            ..Default::default()
        };
        // Would fail if it tried the unreachable URL.
        create_email_sender(&config, None)
            .send(&message())
            .await
            .unwrap();
        create_email_sender(&EmailConfig::default(), Some("key"))
            .send(&message())
            .await
            .unwrap();
    }
}
