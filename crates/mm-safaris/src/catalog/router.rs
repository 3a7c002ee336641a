use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::query::{CatalogQuery, RawTourQuery, TourFilters};
use super::repository::{CatalogError, CatalogRepository};
use super::service::CatalogService;
use super::views::{TourDetailView, TourSummaryView};
use crate::config::MediaConfig;

pub const HOME_FEATURED_LIMIT: usize = 3;
pub const BOOKING_RECEIVED_MESSAGE: &str =
    "Your booking request has been submitted! We will contact you soon.";

/// Everything the visitor-facing catalog pages read from.
pub struct CatalogSite<R> {
    pub query: CatalogQuery<R>,
    pub catalog: CatalogService<R>,
    pub media: MediaConfig,
}

impl<R> CatalogSite<R>
where
    R: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<R>, media: MediaConfig) -> Self {
        Self {
            query: CatalogQuery::new(Arc::clone(&repository)),
            catalog: CatalogService::new(repository),
            media,
        }
    }
}

/// Router exposing the home page, the filtered listing, and tour details.
pub fn catalog_router<R>(site: Arc<CatalogSite<R>>) -> Router
where
    R: CatalogRepository + 'static,
{
    Router::new()
        .route("/", get(home_handler::<R>))
        .route("/tours/", get(list_handler::<R>))
        .route("/tours/:slug/", get(detail_handler::<R>))
        .with_state(site)
}

pub(crate) async fn home_handler<R>(State(site): State<Arc<CatalogSite<R>>>) -> Response
where
    R: CatalogRepository + 'static,
{
    match site.query.featured_tours(HOME_FEATURED_LIMIT) {
        Ok(tours) => {
            let featured: Vec<_> = tours
                .iter()
                .map(|tour| TourSummaryView::new(tour, &site.media))
                .collect();
            (StatusCode::OK, axum::Json(json!({ "featured_tours": featured }))).into_response()
        }
        Err(err) => catalog_error_response(err),
    }
}

pub(crate) async fn list_handler<R>(
    State(site): State<Arc<CatalogSite<R>>>,
    Query(raw): Query<RawTourQuery>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    let filters = TourFilters::from_raw(&raw);
    match site.query.list_tours(&filters) {
        Ok(tours) => {
            let tours: Vec<_> = tours
                .iter()
                .map(|tour| TourSummaryView::new(tour, &site.media))
                .collect();
            let payload = json!({
                "count": tours.len(),
                "tours": tours,
                "filters": {
                    "q": raw.q.unwrap_or_default(),
                    "difficulty": raw.difficulty.unwrap_or_default(),
                    "max_price": raw.max_price.unwrap_or_default(),
                },
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => catalog_error_response(err),
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DetailParams {
    #[serde(default)]
    pub(crate) booked: Option<String>,
}

pub(crate) async fn detail_handler<R>(
    State(site): State<Arc<CatalogSite<R>>>,
    Path(slug): Path<String>,
    Query(params): Query<DetailParams>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    match site.catalog.tour_detail(&slug) {
        Ok(detail) => {
            let mut view = TourDetailView::new(&detail, &site.media);
            if params.booked.is_some() {
                view.message = Some(BOOKING_RECEIVED_MESSAGE);
            }
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => catalog_error_response(err),
    }
}

/// Map a catalog failure onto an HTTP response.
pub fn catalog_error_response(err: CatalogError) -> Response {
    let status = match &err {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::DuplicateSlug(_) | CatalogError::HasBookings { .. } => StatusCode::CONFLICT,
        CatalogError::InvalidSlug(_) | CatalogError::InvalidTour(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CatalogError::Unavailable(_) => {
            error!(%err, "catalog store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
}
