use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tracing::{info, warn};

use super::payload::{LeadSubmission, WebhookPayload};
use super::transport::{DeliveryError, WebhookTransport};

/// Acknowledgement returned to whoever submitted a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionAck {
    pub success: bool,
}

impl SubmissionAck {
    pub fn accepted() -> Self {
        Self { success: true }
    }
}

/// Entry point the intake forms hand finished leads to.
///
/// `submit` never blocks on network I/O and always acknowledges; delivery results are
/// only visible through a [`DeliverySink`].
pub trait LeadIntake: Send + Sync {
    fn submit(&self, submission: LeadSubmission) -> SubmissionAck;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed(DeliveryError),
}

/// Result of one delivery attempt, as reported to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub source: String,
    pub page_url: String,
    pub received_at: String,
    pub finished_at: DateTime<Utc>,
    pub status: DeliveryStatus,
}

impl DeliveryOutcome {
    fn new(payload: &WebhookPayload, status: DeliveryStatus) -> Self {
        Self {
            source: payload.lead.source.clone(),
            page_url: payload.lead.page_url.clone(),
            received_at: payload.received_at.clone(),
            finished_at: Utc::now(),
            status,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self.status, DeliveryStatus::Delivered)
    }
}

/// Observability hook for delivery results.
pub trait DeliverySink: Send + Sync + 'static {
    fn record(&self, outcome: &DeliveryOutcome);
}

/// Default sink: delivered leads at info, lost leads at warn.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DeliverySink for TracingSink {
    fn record(&self, outcome: &DeliveryOutcome) {
        match &outcome.status {
            DeliveryStatus::Delivered => info!(
                source = %outcome.source,
                received_at = %outcome.received_at,
                "lead forwarded to crm webhook"
            ),
            DeliveryStatus::Failed(error) => warn!(
                source = %outcome.source,
                page_url = %outcome.page_url,
                received_at = %outcome.received_at,
                %error,
                "crm webhook delivery failed; lead dropped"
            ),
        }
    }
}

/// Best-effort forwarder from the intake forms to the CRM webhook.
pub struct LeadDeliveryGateway<T, S = TracingSink> {
    transport: Arc<T>,
    sink: Arc<S>,
}

impl<T, S> Clone for LeadDeliveryGateway<T, S> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<T> LeadDeliveryGateway<T, TracingSink>
where
    T: WebhookTransport,
{
    pub fn with_tracing(transport: Arc<T>) -> Self {
        Self::new(transport, Arc::new(TracingSink))
    }
}

impl<T, S> LeadDeliveryGateway<T, S>
where
    T: WebhookTransport,
    S: DeliverySink,
{
    pub fn new(transport: Arc<T>, sink: Arc<S>) -> Self {
        Self { transport, sink }
    }

    /// Perform one POST and report the outcome to the sink.
    pub async fn deliver(&self, payload: WebhookPayload) -> Result<(), DeliveryError> {
        deliver_payload(self.transport.as_ref(), self.sink.as_ref(), payload).await
    }
}

impl<T, S> LeadIntake for LeadDeliveryGateway<T, S>
where
    T: WebhookTransport,
    S: DeliverySink,
{
    fn submit(&self, submission: LeadSubmission) -> SubmissionAck {
        let payload = submission.normalize(Utc::now());

        match Handle::try_current() {
            Ok(handle) => {
                let transport = Arc::clone(&self.transport);
                let sink = Arc::clone(&self.sink);
                handle.spawn(async move {
                    let _ = deliver_payload(transport.as_ref(), sink.as_ref(), payload).await;
                });
            }
            Err(_) => {
                let outcome =
                    DeliveryOutcome::new(&payload, DeliveryStatus::Failed(DeliveryError::NoRuntime));
                self.sink.record(&outcome);
            }
        }

        SubmissionAck::accepted()
    }
}

async fn deliver_payload<T, S>(
    transport: &T,
    sink: &S,
    payload: WebhookPayload,
) -> Result<(), DeliveryError>
where
    T: WebhookTransport,
    S: DeliverySink,
{
    let result = transport.post(&payload).await;
    let status = match &result {
        Ok(()) => DeliveryStatus::Delivered,
        Err(error) => DeliveryStatus::Failed(error.clone()),
    };
    sink.record(&DeliveryOutcome::new(&payload, status));
    result
}
