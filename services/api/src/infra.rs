use lead_intake::workflows::delivery::{
    DeliveryError, DeliveryOutcome, DeliverySink, TracingSink, WebhookPayload, WebhookTransport,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Accepts every payload without touching the network and keeps a copy for display.
#[derive(Default)]
pub(crate) struct DryRunTransport {
    posted: Mutex<Vec<WebhookPayload>>,
}

impl DryRunTransport {
    pub(crate) fn posted(&self) -> Vec<WebhookPayload> {
        self.posted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl WebhookTransport for DryRunTransport {
    async fn post(&self, payload: &WebhookPayload) -> Result<(), DeliveryError> {
        info!(source = %payload.lead.source, "dry run: webhook post skipped");
        self.posted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload.clone());
        Ok(())
    }
}

/// Logs like the default sink and remembers outcomes so the CLI can report them.
#[derive(Default)]
pub(crate) struct RecordingSink {
    outcomes: Mutex<Vec<DeliveryOutcome>>,
}

impl RecordingSink {
    pub(crate) fn outcomes(&self) -> Vec<DeliveryOutcome> {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Poll until `expected` outcomes arrived or `timeout` passed; returns what was seen.
    pub(crate) async fn wait_for(&self, expected: usize, timeout: Duration) -> Vec<DeliveryOutcome> {
        let deadline = Instant::now() + timeout;
        loop {
            let outcomes = self.outcomes();
            if outcomes.len() >= expected || Instant::now() >= deadline {
                return outcomes;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
    }
}

impl DeliverySink for RecordingSink {
    fn record(&self, outcome: &DeliveryOutcome) {
        TracingSink.record(outcome);
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(outcome.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_intake::workflows::delivery::{LeadDeliveryGateway, LeadIntake, LeadSubmission};

    #[tokio::test]
    async fn dry_run_gateway_reports_delivered_outcomes() {
        let transport = Arc::new(DryRunTransport::default());
        let sink = Arc::new(RecordingSink::default());
        let gateway = LeadDeliveryGateway::new(transport.clone(), sink.clone());

        let ack = gateway.submit(LeadSubmission {
            name: "Jane Doe".to_string(),
            ..LeadSubmission::default()
        });
        assert!(ack.success);

        let outcomes = sink.wait_for(1, Duration::from_secs(2)).await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_delivered());
        assert_eq!(outcomes[0].source, "multi-step-form");
        assert_eq!(transport.posted()[0].lead.name, "Jane Doe");
    }

    #[tokio::test]
    async fn wait_for_gives_up_after_timeout() {
        let sink = RecordingSink::default();
        let outcomes = sink.wait_for(1, Duration::from_millis(50)).await;
        assert!(outcomes.is_empty());
    }
}
