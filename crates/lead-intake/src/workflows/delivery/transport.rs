use std::future::Future;
use std::time::Duration;

use super::payload::WebhookPayload;
use crate::config::WebhookConfig;

/// Failure modes of a single webhook POST.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("webhook request timed out")]
    Timeout,
    #[error("webhook rejected the lead with status {status}")]
    Rejected { status: u16 },
    #[error("webhook transport failed: {0}")]
    Transport(String),
    #[error("no async runtime available to schedule delivery")]
    NoRuntime,
}

/// Outbound hop to the CRM. One call is one POST attempt; implementations never retry.
pub trait WebhookTransport: Send + Sync + 'static {
    fn post(
        &self,
        payload: &WebhookPayload,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// Posts JSON to the configured webhook URL with `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestWebhookTransport {
    client: reqwest::Client,
    url: String,
}

impl ReqwestWebhookTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &WebhookConfig) -> Result<Self, DeliveryError> {
        Self::new(config.url.clone(), config.timeout())
    }
}

impl WebhookTransport for ReqwestWebhookTransport {
    async fn post(&self, payload: &WebhookPayload) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
