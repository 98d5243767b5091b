use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryFoundItemRepository, InMemoryLostReportRepository};
use crate::routes::with_recovery_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lost_found::config::AppConfig;
use lost_found::error::AppError;
use lost_found::telemetry;
use lost_found::workflows::recovery::RecoveryService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(threshold) = args.threshold.take() {
        config.matching.claim_threshold = threshold;
    }

    telemetry::init(&config.telemetry)?;

    let found_items = Arc::new(InMemoryFoundItemRepository::default());
    let reports = Arc::new(InMemoryLostReportRepository::default());
    let recovery_service = Arc::new(RecoveryService::new(
        found_items,
        reports,
        config.matching.clone(),
        &config.semantic,
    )?);

    if !recovery_service.semantic_enabled() {
        warn!("no semantic scoring key configured; claims use local similarity only");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        semantic_enabled: recovery_service.semantic_enabled(),
    };

    let app = with_recovery_routes(recovery_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        claim_threshold = config.matching.claim_threshold,
        model = %config.semantic.model,
        "lost-and-found claim service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
