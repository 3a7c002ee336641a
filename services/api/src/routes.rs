use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use mm_safaris::catalog::{catalog_router, CatalogRepository, CatalogSite};
use mm_safaris::inquiries::{inquiry_router, InquiryRepository, InquiryService};
use mm_safaris::notifications::Notifier;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_site_routes<C, I, N>(
    site: Arc<CatalogSite<C>>,
    inquiries: Arc<InquiryService<C, I, N>>,
) -> axum::Router
where
    C: CatalogRepository + 'static,
    I: InquiryRepository + 'static,
    N: Notifier + 'static,
{
    catalog_router(site)
        .merge(inquiry_router(inquiries))
        .route("/about/", axum::routing::get(about_endpoint))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn about_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "company": "MM Africa Safaris",
        "summary": "Guided wildlife safaris across Kenya, Tanzania and Uganda, from migration crossings to gorilla treks.",
        "destinations": ["Kenya", "Tanzania", "Uganda"],
        "links": {
            "tours": "/tours/",
            "contact": "/contact/",
        },
    }))
}
