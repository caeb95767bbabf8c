//! End-to-end funnel scenarios through the public API: the qualifying funnel hands its lead
//! to the property-detail form through a file-backed draft, and every submission reaches
//! the webhook transport in the background.

mod common {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

    use lead_intake::workflows::delivery::{
        DeliveryError, LeadDeliveryGateway, TracingSink, WebhookPayload, WebhookTransport,
    };

    pub(super) struct ChannelTransport {
        posted: UnboundedSender<WebhookPayload>,
    }

    impl WebhookTransport for ChannelTransport {
        async fn post(&self, payload: &WebhookPayload) -> Result<(), DeliveryError> {
            self.posted
                .send(payload.clone())
                .map_err(|err| DeliveryError::Transport(err.to_string()))
        }
    }

    pub(super) fn gateway() -> (
        LeadDeliveryGateway<ChannelTransport, TracingSink>,
        UnboundedReceiver<WebhookPayload>,
    ) {
        let (posted, received) = unbounded_channel();
        let gateway = LeadDeliveryGateway::with_tracing(Arc::new(ChannelTransport { posted }));
        (gateway, received)
    }

    pub(super) async fn next_payload(received: &mut UnboundedReceiver<WebhookPayload>) -> WebhookPayload {
        tokio::time::timeout(Duration::from_secs(2), received.recv())
            .await
            .expect("delivery scheduled")
            .expect("channel open")
    }

    pub(super) fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("lead-intake-it-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }
}

use std::sync::Arc;

use common::*;
use lead_intake::workflows::funnel::{
    CompletionView, FormSession, FunnelVariant, GarageType, Occupancy, PropertyCondition,
    PropertyDetailSession, SellingReason, Timeline, PROPERTY_DETAILS_PATH,
};
use lead_intake::workflows::handoff::{DraftHandoff, DraftStore, FileDraftStore, DRAFT_KEY};

#[tokio::test]
async fn qualifying_funnel_hands_off_to_property_details() {
    let dir = scratch_dir("handoff");
    let store = Arc::new(FileDraftStore::open(&dir).expect("draft dir"));
    let handoff = DraftHandoff::new(store.clone());
    let (gateway, mut received) = gateway();

    let mut funnel = FormSession::new(
        FunnelVariant::qualifying(),
        "https://example.com/sell-my-house-fast/tampa",
    );
    funnel.set_address("123 Main St").expect("address");
    funnel.next().expect("advance");
    funnel
        .select_reason(SellingReason::Foreclosure)
        .expect("reason");
    funnel
        .select_condition(PropertyCondition::Poor)
        .expect("condition");
    funnel.select_timeline(Timeline::Asap).expect("timeline");
    funnel.set_full_name("Jane Doe").expect("name");
    funnel.set_phone("8135551234").expect("phone");
    funnel.set_email("jane@example.com").expect("email");

    let completion = funnel.submit(&gateway, &handoff).expect("stage one");
    assert!(completion.ack.success);
    assert_eq!(completion.view, CompletionView::Redirect(PROPERTY_DETAILS_PATH));
    assert!(store.get(DRAFT_KEY).expect("read store").is_some());

    let first = next_payload(&mut received).await;
    assert_eq!(first.lead.source, "qualifying-funnel");
    assert_eq!(first.lead.phone, "+1 (813) 555-1234");
    assert_eq!(first.lead.reason, "foreclosure");

    let mut details =
        PropertyDetailSession::resume(&handoff, "https://example.com/property-details");
    details.set_bedrooms("4").expect("bedrooms");
    details.set_garage(Some(GarageType::Carport)).expect("garage");
    details
        .set_occupancy(Some(Occupancy::TenantOccupied))
        .expect("occupancy");
    details.set_mortgage_balance("120000").expect("mortgage");
    let (_, ack) = details.submit(&gateway, &handoff).expect("stage two");
    assert!(ack.success);

    let second = next_payload(&mut received).await;
    assert_eq!(second.lead.source, "property-details-form");
    assert_eq!(second.lead.address, "123 Main St");
    assert_eq!(second.lead.email, "jane@example.com");
    assert_eq!(second.lead.bedrooms, "4");
    assert_eq!(second.lead.garage, "carport");
    assert_eq!(second.lead.occupied, "tenant-occupied");
    assert_eq!(second.lead.mortgage_balance, "120000");

    assert!(store.get(DRAFT_KEY).expect("read store").is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn compact_funnel_confirms_and_delivers_once() {
    let dir = scratch_dir("compact");
    let store = Arc::new(FileDraftStore::open(&dir).expect("draft dir"));
    let handoff = DraftHandoff::new(store.clone());
    let (gateway, mut received) = gateway();

    let mut funnel = FormSession::new(FunnelVariant::compact(), "https://example.com/");
    funnel.set_address("77 Bay Rd").expect("address");
    funnel.next().expect("advance");
    funnel
        .select_condition(PropertyCondition::Good)
        .expect("condition");
    funnel
        .select_timeline(Timeline::ThreeToSixMonths)
        .expect("timeline");
    funnel.set_full_name("Ray Park").expect("name");
    funnel.set_phone("727555").expect("phone");
    funnel.set_email("ray@example.com").expect("email");

    let completion = funnel.submit(&gateway, &handoff).expect("completes");
    assert_eq!(completion.view, CompletionView::Confirmation);

    let payload = next_payload(&mut received).await;
    assert_eq!(payload.lead.source, "multi-step-form");
    assert_eq!(payload.lead.timeline, "3-6-months");
    assert_eq!(payload.lead.phone, "+1 (727) 555");
    assert!(received.try_recv().is_err());
    assert!(store.get(DRAFT_KEY).expect("read store").is_none());
    let _ = std::fs::remove_dir_all(&dir);
}
