use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tower::ServiceExt;

use super::gateway::{DeliveryOutcome, DeliverySink, DeliveryStatus, LeadDeliveryGateway, LeadIntake};
use super::payload::{LeadSubmission, WebhookPayload, DEFAULT_SOURCE, RECOGNIZED_FIELDS};
use super::router::lead_router;
use super::transport::{DeliveryError, WebhookTransport};

struct ChannelTransport {
    posted: UnboundedSender<WebhookPayload>,
    result: Result<(), DeliveryError>,
}

impl WebhookTransport for ChannelTransport {
    async fn post(&self, payload: &WebhookPayload) -> Result<(), DeliveryError> {
        let _ = self.posted.send(payload.clone());
        self.result.clone()
    }
}

/// Never completes, standing in for a webhook that hangs.
struct StalledTransport;

impl WebhookTransport for StalledTransport {
    async fn post(&self, _payload: &WebhookPayload) -> Result<(), DeliveryError> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

struct ChannelSink {
    outcomes: UnboundedSender<DeliveryOutcome>,
}

impl DeliverySink for ChannelSink {
    fn record(&self, outcome: &DeliveryOutcome) {
        let _ = self.outcomes.send(outcome.clone());
    }
}

struct Harness {
    gateway: LeadDeliveryGateway<ChannelTransport, ChannelSink>,
    posted: UnboundedReceiver<WebhookPayload>,
    outcomes: UnboundedReceiver<DeliveryOutcome>,
}

fn harness(result: Result<(), DeliveryError>) -> Harness {
    let (posted_tx, posted) = unbounded_channel();
    let (outcome_tx, outcomes) = unbounded_channel();
    let gateway = LeadDeliveryGateway::new(
        Arc::new(ChannelTransport {
            posted: posted_tx,
            result,
        }),
        Arc::new(ChannelSink {
            outcomes: outcome_tx,
        }),
    );
    Harness {
        gateway,
        posted,
        outcomes,
    }
}

async fn next<T>(receiver: &mut UnboundedReceiver<T>) -> T {
    tokio::time::timeout(Duration::from_secs(2), receiver.recv())
        .await
        .expect("background delivery finished in time")
        .expect("channel open")
}

fn scenario_submission() -> LeadSubmission {
    LeadSubmission {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "+1 (813) 555-1234".to_string(),
        address: "123 Main St".to_string(),
        condition: "poor".to_string(),
        timeline: "asap".to_string(),
        ..LeadSubmission::default()
    }
}

#[tokio::test]
async fn submit_acknowledges_and_forwards_in_background() {
    let mut harness = harness(Ok(()));

    let ack = harness.gateway.submit(scenario_submission());
    assert!(ack.success);

    let payload = next(&mut harness.posted).await;
    assert_eq!(payload.lead.address, "123 Main St");
    assert_eq!(payload.lead.source, DEFAULT_SOURCE);

    let outcome = next(&mut harness.outcomes).await;
    assert!(outcome.is_delivered());
    assert_eq!(outcome.source, DEFAULT_SOURCE);
}

#[tokio::test]
async fn submit_acknowledges_even_when_webhook_rejects() {
    let mut harness = harness(Err(DeliveryError::Rejected { status: 502 }));

    let ack = harness.gateway.submit(scenario_submission());
    assert!(ack.success);

    let outcome = next(&mut harness.outcomes).await;
    assert_eq!(
        outcome.status,
        DeliveryStatus::Failed(DeliveryError::Rejected { status: 502 })
    );
}

#[tokio::test]
async fn submit_does_not_wait_for_a_stalled_webhook() {
    let (outcome_tx, mut outcomes) = unbounded_channel();
    let gateway = LeadDeliveryGateway::new(
        Arc::new(StalledTransport),
        Arc::new(ChannelSink {
            outcomes: outcome_tx,
        }),
    );

    let ack = gateway.submit(scenario_submission());
    assert!(ack.success);

    tokio::task::yield_now().await;
    assert!(outcomes.try_recv().is_err(), "delivery still pending");
}

#[test]
fn submit_without_runtime_reports_to_sink() {
    let mut harness = harness(Ok(()));

    let ack = harness.gateway.submit(scenario_submission());

    assert!(ack.success);
    let outcome = harness.outcomes.try_recv().expect("outcome recorded");
    assert_eq!(outcome.status, DeliveryStatus::Failed(DeliveryError::NoRuntime));
    assert!(harness.posted.try_recv().is_err());
}

#[tokio::test]
async fn deliver_surfaces_transport_errors_to_direct_callers() {
    let mut harness = harness(Err(DeliveryError::Timeout));
    let payload = scenario_submission().normalize(chrono::Utc::now());

    let result = harness.gateway.deliver(payload).await;

    assert_eq!(result, Err(DeliveryError::Timeout));
    let outcome = next(&mut harness.outcomes).await;
    assert!(!outcome.is_delivered());
}

async fn post_body(router: axum::Router, body: &'static str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post("/api/leads")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("json payload"))
}

#[tokio::test]
async fn lead_route_forwards_every_recognized_field() {
    let mut harness = harness(Ok(()));
    let router = lead_router(Arc::new(harness.gateway.clone()));

    let (status, body) = post_body(
        router,
        r#"{"name":"Jane Doe","phone":"+1 (813) 555-1234","bedrooms":3,"garage":null}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let payload = next(&mut harness.posted).await;
    let forwarded = serde_json::to_value(&payload).expect("serializes");
    for key in RECOGNIZED_FIELDS {
        assert!(
            forwarded.get(key).map(Value::is_string).unwrap_or(false),
            "missing string field {key}"
        );
    }
    assert_eq!(forwarded.get("bedrooms"), Some(&json!("3")));
    assert_eq!(forwarded.get("garage"), Some(&json!("")));
}

#[tokio::test]
async fn lead_route_reports_success_for_unreadable_body() {
    let mut harness = harness(Ok(()));
    let router = lead_router(Arc::new(harness.gateway.clone()));

    let (status, body) = post_body(router, "{not json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    tokio::task::yield_now().await;
    assert!(harness.posted.try_recv().is_err());
}

#[tokio::test]
async fn lead_route_reports_success_when_webhook_fails() {
    let mut harness = harness(Err(DeliveryError::Transport("connection refused".into())));
    let router = lead_router(Arc::new(harness.gateway.clone()));

    let (status, body) = post_body(router, r#"{"name":"Jane Doe","source":"contact"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    let outcome = next(&mut harness.outcomes).await;
    assert_eq!(outcome.source, "contact");
    assert!(!outcome.is_delivered());
}
