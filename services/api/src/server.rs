use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationRepository, InMemoryJobRepository};
use crate::routes::app_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_catalog::applications::JobApplicationService;
use job_catalog::catalog::JobCatalogService;
use job_catalog::config::AppConfig;
use job_catalog::error::AppError;
use job_catalog::ingest::PostingImporter;
use job_catalog::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let postings = Arc::new(InMemoryJobRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let catalog_service = Arc::new(JobCatalogService::new(postings.clone()));
    let application_service = Arc::new(JobApplicationService::new(postings, applications));

    if let Some(path) = config.catalog.seed_path.as_ref() {
        let seeded = PostingImporter::from_path(path)?;
        let inserted = catalog_service.seed(seeded)?;
        info!(inserted, path = %path.display(), "loaded seed postings");
    }

    let app = app_router(catalog_service, application_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job catalog service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
