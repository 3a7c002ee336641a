use std::sync::{Arc, Mutex};

use axum::response::Response;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::catalog::{CatalogService, Difficulty, NewTour};
use crate::config::MailConfig;
use crate::inquiries::domain::{
    Booking, BookingForm, BookingId, BookingStatus, ContactForm, ContactMessage,
    ContactMessageId, NewBooking, NewContactMessage,
};
use crate::inquiries::repository::{BookingQuery, InquiryRepository, RepositoryError};
use crate::inquiries::{inquiry_router, InquiryService};
use crate::notifications::{Notification, NotificationError, Notifier};
use crate::store::MemoryStore;

pub(super) const OPERATOR: &str = "ops@mmafricasafaris.test";

pub(super) fn mail_config() -> MailConfig {
    MailConfig {
        operator_email: OPERATOR.to_string(),
        ..MailConfig::default()
    }
}

/// A store holding the two tours the scenarios book against.
pub(super) fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let catalog = CatalogService::new(store.clone());
    catalog
        .create_tour(
            NewTour::new(
                "Amboseli Elephant Paradise",
                "Herds of elephants beneath Kilimanjaro.",
                3,
                Decimal::new(1450, 0),
                Difficulty::Easy,
            )
            .featured(),
        )
        .expect("amboseli created");
    catalog
        .create_tour(
            NewTour::new(
                "Gorilla Trekking",
                "Track mountain gorillas in Bwindi.",
                4,
                Decimal::new(3200, 0),
                Difficulty::Challenging,
            )
            .with_max_group_size(8),
        )
        .expect("gorilla trekking created");
    store
}

pub(super) fn build_service() -> (
    InquiryService<MemoryStore, MemoryStore, RecordingNotifier>,
    Arc<MemoryStore>,
    Arc<RecordingNotifier>,
) {
    let store = seeded_store();
    let notifier = Arc::new(RecordingNotifier::default());
    let service = InquiryService::new(store.clone(), store.clone(), notifier.clone(), &mail_config());
    (service, store, notifier)
}

pub(super) fn booking_form() -> BookingForm {
    BookingForm {
        full_name: "Grace Njeri".to_string(),
        email: "grace@example.com".to_string(),
        phone: "+254722555010".to_string(),
        number_of_people: "2".to_string(),
        preferred_date: "2025-07-18".to_string(),
        special_requests: "Window seat on the flight, please.".to_string(),
    }
}

pub(super) fn contact_form() -> ContactForm {
    ContactForm {
        name: "Oliver Brown".to_string(),
        email: "oliver@example.co.uk".to_string(),
        subject: "Family safari".to_string(),
        message: "Do you have tours suitable for children under 10?".to_string(),
    }
}

#[derive(Default, Clone)]
pub(super) struct RecordingNotifier {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

/// Counts hand-off attempts and rejects every one of them.
#[derive(Default, Clone)]
pub(super) struct FailingNotifier {
    attempts: Arc<Mutex<Vec<Notification>>>,
}

impl FailingNotifier {
    pub(super) fn attempts(&self) -> Vec<Notification> {
        self.attempts.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for FailingNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        self.attempts
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Err(NotificationError::QueueClosed)
    }
}

pub(super) struct UnavailableInquiries;

impl InquiryRepository for UnavailableInquiries {
    fn insert_booking(&self, _booking: NewBooking) -> Result<Booking, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn booking(&self, _id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_booking_status(
        &self,
        _id: BookingId,
        _status: BookingStatus,
    ) -> Result<Booking, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn bookings(&self, _query: &BookingQuery) -> Result<Vec<Booking>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_contact_message(
        &self,
        _message: NewContactMessage,
    ) -> Result<ContactMessage, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn contact_messages(
        &self,
        _search: Option<&str>,
    ) -> Result<Vec<ContactMessage>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_contact_message(&self, _id: ContactMessageId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn form_body<T: serde::Serialize>(form: &T) -> axum::body::Body {
    let encoded = serde_urlencoded::to_string(form).expect("form encodes");
    axum::body::Body::from(encoded)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn inquiry_router_with_service(
    service: InquiryService<MemoryStore, MemoryStore, RecordingNotifier>,
) -> axum::Router {
    inquiry_router(Arc::new(service))
}
