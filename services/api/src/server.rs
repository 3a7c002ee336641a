use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, CatalogSource};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mm_safaris::catalog::CatalogSite;
use mm_safaris::config::AppConfig;
use mm_safaris::error::AppError;
use mm_safaris::inquiries::InquiryService;
use mm_safaris::notifications::{MailBackend, MailDispatcher};
use mm_safaris::store::MemoryStore;
use mm_safaris::telemetry;
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

    let store = Arc::new(MemoryStore::new());
    let source = CatalogSource::select(args.catalog_csv.take(), args.no_seed);
    let tours = load_catalog(&store, &source)?;
    info!(source = %source.describe(), tours = tours.len(), "catalog loaded");

    let backend = MailBackend::from_config(&config.mail)?;
    info!(backend = backend.name(), operator = %config.mail.operator_email, "mail backend selected");
    let (dispatcher, _mail_worker) = MailDispatcher::spawn(backend, config.mail.from_email.clone());

    let site = Arc::new(CatalogSite::new(store.clone(), config.media.clone()));
    let inquiries = Arc::new(InquiryService::new(
        store.clone(),
        store,
        Arc::new(dispatcher),
        &config.mail,
    ));

    let app = with_site_routes(site, inquiries)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "safari site ready");

    axum::serve(listener, app).await?;
    Ok(())
}
