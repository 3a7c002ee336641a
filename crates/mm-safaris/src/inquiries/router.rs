use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{BookingForm, ContactForm};
use super::repository::InquiryRepository;
use super::service::{InquiryService, InquiryServiceError};
use crate::catalog::views::tour_url;
use crate::catalog::CatalogRepository;
use crate::notifications::Notifier;

pub const CONTACT_RECEIVED_MESSAGE: &str =
    "Thank you for contacting us! We will get back to you soon.";

/// Router builder exposing the booking and contact forms.
pub fn inquiry_router<C, I, N>(service: Arc<InquiryService<C, I, N>>) -> Router
where
    C: CatalogRepository + 'static,
    I: InquiryRepository + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route(
            "/tours/:slug/book/",
            get(booking_form_handler::<C, I, N>).post(submit_booking_handler::<C, I, N>),
        )
        .route(
            "/contact/",
            get(contact_form_handler::<C, I, N>).post(submit_contact_handler::<C, I, N>),
        )
        .with_state(service)
}

pub(crate) async fn booking_form_handler<C, I, N>(
    State(service): State<Arc<InquiryService<C, I, N>>>,
    Path(slug): Path<String>,
) -> Response
where
    C: CatalogRepository + 'static,
    I: InquiryRepository + 'static,
    N: Notifier + 'static,
{
    match service.bookable_tour(&slug) {
        Ok(tour) => {
            let payload = json!({
                "tour": { "name": tour.name, "slug": tour.slug },
                "values": BookingForm::default(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_booking_handler<C, I, N>(
    State(service): State<Arc<InquiryService<C, I, N>>>,
    Path(slug): Path<String>,
    Form(form): Form<BookingForm>,
) -> Response
where
    C: CatalogRepository + 'static,
    I: InquiryRepository + 'static,
    N: Notifier + 'static,
{
    match service.submit_booking(&slug, &form) {
        Ok(_) => Redirect::to(&format!("{}?booked=1", tour_url(&slug))).into_response(),
        Err(InquiryServiceError::Validation(errors)) => {
            let payload = json!({ "errors": errors, "values": form });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContactParams {
    #[serde(default)]
    pub(crate) sent: Option<String>,
}

pub(crate) async fn contact_form_handler<C, I, N>(
    State(_service): State<Arc<InquiryService<C, I, N>>>,
    Query(params): Query<ContactParams>,
) -> Response
where
    C: CatalogRepository + 'static,
    I: InquiryRepository + 'static,
    N: Notifier + 'static,
{
    let mut payload = json!({ "values": ContactForm::default() });
    if params.sent.is_some() {
        payload["message"] = json!(CONTACT_RECEIVED_MESSAGE);
    }
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_contact_handler<C, I, N>(
    State(service): State<Arc<InquiryService<C, I, N>>>,
    Form(form): Form<ContactForm>,
) -> Response
where
    C: CatalogRepository + 'static,
    I: InquiryRepository + 'static,
    N: Notifier + 'static,
{
    match service.submit_contact_message(&form) {
        Ok(_) => Redirect::to("/contact/?sent=1").into_response(),
        Err(InquiryServiceError::Validation(errors)) => {
            let payload = json!({ "errors": errors, "values": form });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

fn error_response(err: InquiryServiceError) -> Response {
    let status = match &err {
        InquiryServiceError::TourNotFound(_) => StatusCode::NOT_FOUND,
        InquiryServiceError::Validation(_) | InquiryServiceError::InvalidTransition { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        InquiryServiceError::Repository(_) | InquiryServiceError::Catalog(_) => {
            error!(error = %err, "inquiry store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
}
