use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAlertPublisher};
use crate::routes::with_induction_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use trainset_induction::config::AppConfig;
use trainset_induction::error::AppError;
use trainset_induction::telemetry;
use trainset_induction::workflows::induction::InductionPlanningService;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let planning_service = Arc::new(InductionPlanningService::new(
        alerts,
        config.planning.clone(),
    )?);

    let app = with_induction_routes(planning_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        service_threshold = config.planning.service_threshold,
        "induction planner ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
