use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionRepository, StaticDirectory};
use crate::routes::with_evaluation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use imc_evaluation::assessment::sessions::EvaluationSessionService;
use imc_evaluation::assessment::ThemeCatalog;
use imc_evaluation::config::AppConfig;
use imc_evaluation::directory::DirectoryProvider;
use imc_evaluation::error::AppError;
use imc_evaluation::telemetry;
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

    let catalog = ThemeCatalog::standard();
    catalog.validate()?;
    let catalog = Arc::new(catalog);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySessionRepository::default());
    let session_service = Arc::new(EvaluationSessionService::new(catalog.clone(), repository));
    let directory: Arc<dyn DirectoryProvider> = Arc::new(StaticDirectory);

    let app = with_evaluation_routes(session_service, catalog, directory)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "evaluation platform ready");

    axum::serve(listener, app).await?;
    Ok(())
}
