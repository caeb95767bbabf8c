use std::sync::{Arc, Mutex};

use crate::workflows::delivery::{
    DeliveryError, LeadIntake, LeadSubmission, SubmissionAck, WebhookPayload, WebhookTransport,
};
use crate::workflows::funnel::{
    FormSession, FunnelVariant, PropertyCondition, SellingReason, Timeline,
};
use crate::workflows::handoff::{DraftHandoff, MemoryDraftStore};

pub(super) const PAGE_URL: &str = "https://example.com/sell-my-house-fast/tampa";

/// Captures submissions synchronously.
#[derive(Default, Clone)]
pub(super) struct RecordingIntake {
    submissions: Arc<Mutex<Vec<LeadSubmission>>>,
}

impl LeadIntake for RecordingIntake {
    fn submit(&self, submission: LeadSubmission) -> SubmissionAck {
        self.submissions
            .lock()
            .expect("intake mutex poisoned")
            .push(submission);
        SubmissionAck::accepted()
    }
}

impl RecordingIntake {
    pub(super) fn submissions(&self) -> Vec<LeadSubmission> {
        self.submissions
            .lock()
            .expect("intake mutex poisoned")
            .clone()
    }
}

pub(super) struct FailingTransport;

impl WebhookTransport for FailingTransport {
    async fn post(&self, _payload: &WebhookPayload) -> Result<(), DeliveryError> {
        Err(DeliveryError::Timeout)
    }
}

pub(super) fn memory_handoff() -> (Arc<MemoryDraftStore>, DraftHandoff) {
    let store = Arc::new(MemoryDraftStore::default());
    let handoff = DraftHandoff::new(store.clone());
    (store, handoff)
}

/// Walk the qualifying funnel to the contact step with the scenario answers.
pub(super) fn qualifying_at_contact() -> FormSession {
    let mut session = FormSession::new(FunnelVariant::qualifying(), PAGE_URL);
    session.set_address("123 Main St").expect("address step");
    session.next().expect("address confirmed");
    session
        .select_reason(SellingReason::Foreclosure)
        .expect("reason step");
    session
        .select_condition(PropertyCondition::Poor)
        .expect("condition step");
    session.select_timeline(Timeline::Asap).expect("timeline step");
    session
}

pub(super) fn fill_contact(session: &mut FormSession) {
    session.set_full_name("Jane Doe").expect("contact step");
    session.set_phone("8135551234").expect("contact step");
    session.set_email("jane@example.com").expect("contact step");
}
