use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::gateway::{LeadIntake, SubmissionAck};
use super::payload::LeadSubmission;
use super::transport::DeliveryError;

/// Browser-side view of the intake: posts the lead body to a running
/// `/api/leads` endpoint and shows success whatever happens on the wire.
#[derive(Debug, Clone)]
pub struct LeadsEndpointClient {
    client: reqwest::Client,
    endpoint: String,
    in_flight: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl LeadsEndpointClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;
        let endpoint = format!("{}/api/leads", base_url.trim_end_matches('/'));
        Ok(Self {
            client,
            endpoint,
            in_flight: Arc::default(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One POST to the endpoint, returning the acknowledgement it replied with.
    pub async fn send(&self, submission: &LeadSubmission) -> Result<SubmissionAck, DeliveryError> {
        post_lead(&self.client, &self.endpoint, submission).await
    }

    /// Wait for every post started by [`LeadIntake::submit`] so far.
    pub async fn flush(&self) {
        let pending = std::mem::take(
            &mut *self
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for handle in pending {
            let _ = handle.await;
        }
    }
}

impl LeadIntake for LeadsEndpointClient {
    fn submit(&self, submission: LeadSubmission) -> SubmissionAck {
        let Ok(handle) = Handle::try_current() else {
            warn!(endpoint = %self.endpoint, "no runtime available; lead not posted");
            return SubmissionAck::accepted();
        };

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let task = handle.spawn(async move {
            match post_lead(&client, &endpoint, &submission).await {
                Ok(ack) => debug!(success = ack.success, %endpoint, "lead posted"),
                Err(error) => warn!(%error, %endpoint, "lead post failed"),
            }
        });
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(task);

        SubmissionAck::accepted()
    }
}

async fn post_lead(
    client: &reqwest::Client,
    endpoint: &str,
    submission: &LeadSubmission,
) -> Result<SubmissionAck, DeliveryError> {
    let response = client
        .post(endpoint)
        .json(submission)
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
    if !status.is_success() {
        return Err(DeliveryError::Rejected {
            status: status.as_u16(),
        });
    }
    response
        .json::<SubmissionAck>()
        .await
        .map_err(|err| DeliveryError::Transport(err.to_string()))
}
