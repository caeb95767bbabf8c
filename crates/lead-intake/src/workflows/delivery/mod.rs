//! Lead delivery: the `/api/leads` contract and best-effort forwarding to the CRM webhook.

pub mod client;
pub mod gateway;
pub mod payload;
pub mod router;
pub mod transport;

#[cfg(test)]
mod tests;

pub use client::LeadsEndpointClient;
pub use gateway::{
    DeliveryOutcome, DeliverySink, DeliveryStatus, LeadDeliveryGateway, LeadIntake,
    SubmissionAck, TracingSink,
};
pub use payload::{LeadSubmission, WebhookPayload, DEFAULT_SOURCE, RECOGNIZED_FIELDS};
pub use router::lead_router;
pub use transport::{DeliveryError, ReqwestWebhookTransport, WebhookTransport};
