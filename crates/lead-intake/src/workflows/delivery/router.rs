use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use tracing::{info, warn};

use super::gateway::{LeadIntake, SubmissionAck};
use super::payload::LeadSubmission;

/// Router exposing the lead submission endpoint.
pub fn lead_router<I>(intake: Arc<I>) -> Router
where
    I: LeadIntake + 'static,
{
    Router::new()
        .route("/api/leads", post(submit_lead_handler::<I>))
        .with_state(intake)
}

/// Always answers `{ "success": true }`. An unreadable body is logged and not forwarded.
pub(crate) async fn submit_lead_handler<I>(
    State(intake): State<Arc<I>>,
    body: Bytes,
) -> Json<SubmissionAck>
where
    I: LeadIntake + 'static,
{
    match serde_json::from_slice::<LeadSubmission>(&body) {
        Ok(submission) => {
            info!(source = %submission.source, "lead submission received");
            Json(intake.submit(submission))
        }
        Err(error) => {
            warn!(%error, bytes = body.len(), "discarding unreadable lead submission");
            Json(SubmissionAck::accepted())
        }
    }
}
