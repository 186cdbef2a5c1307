//! EmailSender trait and its type-erased wrapper.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use legalconnect_types::error::IntegrationError;
use legalconnect_types::integration::EmailMessage;

/// Outbound transactional email.
pub trait EmailSender: Send + Sync {
    fn send(
        &self,
        message: &EmailMessage,
    ) -> impl std::future::Future<Output = Result<(), IntegrationError>> + Send;
}

/// Object-safe version of [`EmailSender`].
pub trait EmailSenderDyn: Send + Sync {
    fn send_boxed<'a>(
        &'a self,
        message: &'a EmailMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), IntegrationError>> + Send + 'a>>;
}

impl<T: EmailSender> EmailSenderDyn for T {
    fn send_boxed<'a>(
        &'a self,
        message: &'a EmailMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), IntegrationError>> + Send + 'a>> {
        Box::pin(self.send(message))
    }
}

/// Sender chosen at startup (HTTP gateway or log-only). Clones share the sender.
#[derive(Clone)]
pub struct BoxEmailSender {
    inner: Arc<dyn EmailSenderDyn + Send + Sync>,
}

impl BoxEmailSender {
    pub fn new<T: EmailSender + 'static>(sender: T) -> Self {
        Self {
            inner: Arc::new(sender),
        }
    }
}

impl EmailSender for BoxEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), IntegrationError> {
        self.inner.send_boxed(message).await
    }
}
