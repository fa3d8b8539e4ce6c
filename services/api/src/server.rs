use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryStore};
use crate::routes::with_disclosure_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use patent_disclosure::config::AppConfig;
use patent_disclosure::error::AppError;
use patent_disclosure::telemetry;
use patent_disclosure::workflows::disclosure::DisclosureArchive;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryStore::default());
    let archive = Arc::new(
        DisclosureArchive::new(store).with_id_prefix(config.archive.id_prefix.clone()),
    );

    let app = with_disclosure_routes(archive)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.label(),
        %addr,
        id_prefix = %config.archive.id_prefix,
        "disclosure service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
