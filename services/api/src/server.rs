use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lead_intake::config::AppConfig;
use lead_intake::error::AppError;
use lead_intake::telemetry;
use lead_intake::workflows::delivery::{LeadDeliveryGateway, ReqwestWebhookTransport};
use lead_intake::workflows::places::AddressSuggestions;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let transport = Arc::new(ReqwestWebhookTransport::from_config(&config.webhook)?);
    let gateway = Arc::new(LeadDeliveryGateway::with_tracing(transport));
    let suggestions = Arc::new(AddressSuggestions::new(&config.places));
    let autocomplete = suggestions.is_enabled();

    let app = with_lead_routes(gateway, suggestions)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        webhook_timeout_secs = config.webhook.timeout_secs,
        autocomplete,
        "lead intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
