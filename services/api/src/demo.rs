use crate::infra::{DryRunTransport, RecordingSink};
use chrono::Utc;
use clap::Args;
use lead_intake::config::AppConfig;
use lead_intake::error::AppError;
use lead_intake::workflows::delivery::{
    DeliveryOutcome, DeliveryStatus, LeadDeliveryGateway, LeadIntake, LeadSubmission,
    LeadsEndpointClient, ReqwestWebhookTransport,
};
use lead_intake::workflows::funnel::{
    CompletionView, FormSession, FunnelVariant, GarageType, Occupancy, PropertyCondition,
    PropertyDetailSession, SellingReason, Timeline,
};
use lead_intake::workflows::handoff::{DraftHandoff, FileDraftStore, DRAFT_KEY};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const DEMO_PAGE_URL: &str = "https://example.com/sell-my-house-fast/tampa";
const DETAILS_PAGE_URL: &str = "https://example.com/property-details";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Directory holding the continuation draft. Defaults to a folder under the system temp dir.
    #[arg(long)]
    pub(crate) draft_dir: Option<PathBuf>,
    /// Post to the configured LEAD_WEBHOOK_URL instead of a dry-run transport.
    #[arg(long, conflicts_with = "endpoint")]
    pub(crate) live: bool,
    /// Base URL of a running lead intake service; the funnels post to its `/api/leads`.
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
    /// Seconds to wait for background deliveries before printing their outcomes.
    #[arg(long, default_value_t = 5)]
    pub(crate) wait_secs: u64,
}

#[derive(Args, Debug)]
pub(crate) struct DeliverArgs {
    /// JSON file shaped like a `/api/leads` request body
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Skip the network and only show the normalized webhook body
    #[arg(long)]
    pub(crate) dry_run: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        draft_dir,
        live,
        endpoint,
        wait_secs,
    } = args;

    let draft_dir = draft_dir.unwrap_or_else(|| std::env::temp_dir().join("lead-intake-demo"));
    let store = Arc::new(FileDraftStore::open(draft_dir)?);
    println!("Lead intake demo");
    println!("Draft store: {}", store.root().display());
    let handoff = DraftHandoff::new(store);
    let wait = Duration::from_secs(wait_secs);

    if let Some(base_url) = endpoint {
        let client = LeadsEndpointClient::new(&base_url, wait)?;
        println!("Intake: {}", client.endpoint());
        walk_two_stage_funnel(&client, &handoff)?;
        client.flush().await;
        println!("\nPosted both stages; delivery results are in the service log");
        return Ok(());
    }

    let sink = Arc::new(RecordingSink::default());
    let dry_run = if live {
        let config = AppConfig::load()?;
        println!("Webhook: live ({}s timeout)", config.webhook.timeout_secs);
        let transport = Arc::new(ReqwestWebhookTransport::from_config(&config.webhook)?);
        let gateway = LeadDeliveryGateway::new(transport, sink.clone());
        walk_two_stage_funnel(&gateway, &handoff)?;
        None
    } else {
        println!("Webhook: dry run");
        let transport = Arc::new(DryRunTransport::default());
        let gateway = LeadDeliveryGateway::new(transport.clone(), sink.clone());
        walk_two_stage_funnel(&gateway, &handoff)?;
        Some(transport)
    };

    let outcomes = sink.wait_for(2, wait).await;
    render_outcomes(&outcomes);

    if let Some(transport) = dry_run {
        println!("\nWebhook bodies");
        for payload in transport.posted() {
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }
    Ok(())
}

pub(crate) async fn run_deliver(args: DeliverArgs) -> Result<(), AppError> {
    let DeliverArgs { file, dry_run } = args;

    let raw = std::fs::read_to_string(&file)?;
    let submission: LeadSubmission = serde_json::from_str(&raw)?;
    let payload = submission.normalize(Utc::now());

    println!("Normalized webhook body");
    println!("{}", serde_json::to_string_pretty(&payload)?);

    let sink = Arc::new(RecordingSink::default());
    let result = if dry_run {
        let gateway = LeadDeliveryGateway::new(Arc::new(DryRunTransport::default()), sink.clone());
        gateway.deliver(payload).await
    } else {
        let config = AppConfig::load()?;
        let transport = Arc::new(ReqwestWebhookTransport::from_config(&config.webhook)?);
        let gateway = LeadDeliveryGateway::new(transport, sink.clone());
        gateway.deliver(payload).await
    };

    render_outcomes(&sink.outcomes());
    result.map_err(AppError::from)
}

fn walk_two_stage_funnel(intake: &dyn LeadIntake, handoff: &DraftHandoff) -> Result<(), AppError> {
    let mut funnel = FormSession::new(FunnelVariant::qualifying(), DEMO_PAGE_URL);
    println!(
        "\nStage one: {} funnel ({} steps)",
        funnel.variant().name,
        funnel.total_steps()
    );

    funnel.set_address("123 Main St, Tampa, FL 33602")?;
    print_step(&funnel, "123 Main St, Tampa, FL 33602");
    funnel.next()?;

    print_step(&funnel, SellingReason::Inherited.label());
    funnel.select_reason(SellingReason::Inherited)?;
    print_step(&funnel, PropertyCondition::Fair.label());
    funnel.select_condition(PropertyCondition::Fair)?;
    print_step(&funnel, Timeline::OneToThreeMonths.label());
    funnel.select_timeline(Timeline::OneToThreeMonths)?;

    funnel.set_full_name("Jane Doe")?;
    funnel.set_phone("813-555-1234")?;
    funnel.set_email("jane@example.com")?;
    print_step(&funnel, &funnel.record().phone_number);

    let completion = funnel.submit(intake, handoff)?;
    match completion.view {
        CompletionView::Redirect(path) => {
            println!("- Submitted (success: {}), continuing at {path}", completion.ack.success)
        }
        CompletionView::Confirmation => {
            println!("- Submitted (success: {})", completion.ack.success)
        }
    }

    let mut details = PropertyDetailSession::resume(handoff, DETAILS_PAGE_URL);
    match details.lead() {
        Some(lead) => println!(
            "\nStage two: property details for {} (draft '{DRAFT_KEY}' loaded)",
            lead.address
        ),
        None => println!("\nStage two: property details (no draft found)"),
    }

    details.set_bedrooms("3")?;
    details.set_bathrooms("2")?;
    details.set_square_feet("1650")?;
    details.set_year_built("1978")?;
    details.set_garage(Some(GarageType::OneCar))?;
    details.set_occupancy(Some(Occupancy::Vacant))?;
    details.set_mortgage_balance("85000")?;
    details.set_additional_notes("Roof is about 20 years old.")?;

    let (submission, ack) = details.submit(intake, handoff)?;
    println!(
        "- Submitted {} for {} (success: {})",
        submission.source, submission.address, ack.success
    );
    let remaining = handoff.peek_draft()?;
    println!("- Draft cleared: {}", remaining.is_none());

    Ok(())
}

fn print_step(funnel: &FormSession, value: &str) {
    if let (Some(index), Some(step)) = (funnel.step_index(), funnel.current_step()) {
        println!(
            "- Step {index}/{} {}: {value}",
            funnel.total_steps(),
            step.label()
        );
    }
}

fn render_outcomes(outcomes: &[DeliveryOutcome]) {
    if outcomes.is_empty() {
        println!("\nDelivery outcomes: none reported yet");
        return;
    }

    println!("\nDelivery outcomes");
    for outcome in outcomes {
        match &outcome.status {
            DeliveryStatus::Delivered => println!(
                "- {} received {} delivered",
                outcome.source, outcome.received_at
            ),
            DeliveryStatus::Failed(error) => println!(
                "- {} received {} failed: {error}",
                outcome.source, outcome.received_at
            ),
        }
    }
}
