use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use trust_store_core::contract::NotificationEnvelope;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to serialize notification envelope: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to deliver notification: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("callback endpoint rejected notification with status {0}")]
    Rejected(u16),
}

#[async_trait]
pub trait CallbackNotifier: Send + Sync {
    async fn notify(
        &self,
        callback_url: &str,
        envelope: &NotificationEnvelope,
    ) -> Result<u16, NotifyError>;
}

#[derive(Debug, Clone)]
pub struct HttpCallbackNotifier {
    http_client: reqwest::Client,
}

impl HttpCallbackNotifier {
    pub fn new(request_timeout: Duration) -> Result<Self, NotifyError> {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl CallbackNotifier for HttpCallbackNotifier {
    async fn notify(
        &self,
        callback_url: &str,
        envelope: &NotificationEnvelope,
    ) -> Result<u16, NotifyError> {
        let body = serde_json::to_vec(envelope)?;

        // Pre-signed callback URLs are signed without a content type.
        let status = self
            .http_client
            .put(callback_url)
            .header(CONTENT_TYPE, "")
            .body(body)
            .send()
            .await?
            .status();

        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(NotifyError::Rejected(status.as_u16()))
        }
    }
}
