use super::common::*;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::catalog::{CatalogError, CatalogRepository, CatalogService};
use crate::inquiries::domain::{BookingForm, BookingId, BookingStatus, ContactMessageId};
use crate::inquiries::repository::{BookingQuery, InquiryRepository, RepositoryError};
use crate::inquiries::validation::FieldErrorKind;
use crate::inquiries::{InquiryService, InquiryServiceError};
use crate::notifications::NotificationKind;

#[test]
fn invalid_booking_reports_each_field_and_stores_nothing() {
    let (service, store, notifier) = build_service();
    let form = BookingForm {
        full_name: String::new(),
        email: "bad".to_string(),
        phone: "+256700000001".to_string(),
        number_of_people: "0".to_string(),
        preferred_date: "not-a-date".to_string(),
        special_requests: String::new(),
    };

    match service.submit_booking("gorilla-trekking", &form) {
        Err(InquiryServiceError::Validation(errors)) => {
            assert_eq!(errors.len(), 4);
            assert_eq!(errors.kind("full_name"), Some(FieldErrorKind::Required));
            assert_eq!(errors.kind("email"), Some(FieldErrorKind::InvalidFormat));
            assert_eq!(
                errors.kind("number_of_people"),
                Some(FieldErrorKind::OutOfRange)
            );
            assert_eq!(
                errors.kind("preferred_date"),
                Some(FieldErrorKind::InvalidFormat)
            );
        }
        other => panic!("expected validation errors, got {other:?}"),
    }

    assert!(store
        .bookings(&BookingQuery::default())
        .expect("bookings")
        .is_empty());
    assert!(notifier.events().is_empty());
}

#[test]
fn valid_booking_is_pending_and_notifies_submitter_and_operator() {
    let (service, _, notifier) = build_service();

    let booking = service
        .submit_booking("amboseli-elephant-paradise", &booking_form())
        .expect("booking accepted");

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.number_of_people, 2);
    assert_eq!(
        booking.special_requests.as_deref(),
        Some("Window seat on the flight, please.")
    );

    let events = notifier.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, NotificationKind::BookingReceipt);
    assert_eq!(events[0].to, "grace@example.com");
    assert!(events[0].body.contains("Amboseli Elephant Paradise"));
    assert!(events[0].body.contains("July 18, 2025"));
    assert_eq!(events[1].kind, NotificationKind::BookingAlert);
    assert_eq!(events[1].to, OPERATOR);
}

#[test]
fn notification_failures_do_not_fail_the_booking() {
    let store = seeded_store();
    let notifier = Arc::new(FailingNotifier::default());
    let service = InquiryService::new(store.clone(), store.clone(), notifier.clone(), &mail_config());

    let booking = service
        .submit_booking("amboseli-elephant-paradise", &booking_form())
        .expect("booking accepted despite notifier failure");

    assert_eq!(notifier.attempts().len(), 2);
    assert_eq!(
        store.booking(booking.id).expect("lookup").map(|b| b.status),
        Some(BookingStatus::Pending)
    );
}

#[test]
fn unknown_tour_is_not_found() {
    let (service, _, notifier) = build_service();
    match service.submit_booking("kilimanjaro-summit", &booking_form()) {
        Err(InquiryServiceError::TourNotFound(slug)) => assert_eq!(slug, "kilimanjaro-summit"),
        other => panic!("expected tour not found, got {other:?}"),
    }
    assert!(notifier.events().is_empty());
}

#[test]
fn store_failures_propagate() {
    let store = seeded_store();
    let service = InquiryService::new(
        store,
        Arc::new(UnavailableInquiries),
        Arc::new(RecordingNotifier::default()),
        &mail_config(),
    );

    match service.submit_contact_message(&contact_form()) {
        Err(InquiryServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected unavailable repository, got {other:?}"),
    }
}

#[test]
fn identical_contact_messages_are_stored_twice() {
    let (service, _, notifier) = build_service();

    let first = service
        .submit_contact_message(&contact_form())
        .expect("first message");
    let second = service
        .submit_contact_message(&contact_form())
        .expect("second message");

    assert_ne!(first.id, second.id);
    assert_eq!(service.contact_messages(None).expect("messages").len(), 2);

    let events = notifier.events();
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|event| event.kind == NotificationKind::ContactAlert && event.to == OPERATOR));
    assert!(events[0].body.contains("oliver@example.co.uk"));
}

#[test]
fn status_moves_forward_one_step_at_a_time() {
    let (service, _, _) = build_service();
    let booking = service
        .submit_booking("gorilla-trekking", &booking_form())
        .expect("booking accepted");

    match service.transition_booking_status(booking.id, BookingStatus::Paid) {
        Err(InquiryServiceError::InvalidTransition { from, to, .. }) => {
            assert_eq!(from, BookingStatus::Pending);
            assert_eq!(to, BookingStatus::Paid);
        }
        other => panic!("expected invalid transition, got {other:?}"),
    }

    for next in [
        BookingStatus::Confirmed,
        BookingStatus::Paid,
        BookingStatus::Completed,
    ] {
        let updated = service
            .transition_booking_status(booking.id, next)
            .expect("forward transition");
        assert_eq!(updated.status, next);
    }

    assert!(matches!(
        service.transition_booking_status(booking.id, BookingStatus::Cancelled),
        Err(InquiryServiceError::InvalidTransition { .. })
    ));
}

#[test]
fn cancelled_bookings_stay_cancelled() {
    let (service, _, _) = build_service();
    let booking = service
        .submit_booking("gorilla-trekking", &booking_form())
        .expect("booking accepted");

    service
        .transition_booking_status(booking.id, BookingStatus::Cancelled)
        .expect("cancel pending booking");
    assert!(matches!(
        service.transition_booking_status(booking.id, BookingStatus::Confirmed),
        Err(InquiryServiceError::InvalidTransition { .. })
    ));
}

#[test]
fn transition_of_unknown_booking_is_not_found() {
    let (service, _, _) = build_service();
    match service.transition_booking_status(BookingId(404), BookingStatus::Confirmed) {
        Err(InquiryServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn operator_can_filter_and_search_bookings() {
    let (service, _, _) = build_service();
    service
        .submit_booking("gorilla-trekking", &booking_form())
        .expect("grace books gorillas");

    let mut other = booking_form();
    other.full_name = "Peter Ochieng".to_string();
    other.email = "peter@example.org".to_string();
    other.preferred_date = "2025-08-01".to_string();
    service
        .submit_booking("amboseli-elephant-paradise", &other)
        .expect("peter books amboseli");
    service
        .submit_booking("gorilla-trekking", &other)
        .expect("peter books gorillas");

    assert_eq!(
        service
            .bookings_for_tour("gorilla-trekking", None)
            .expect("tour bookings")
            .len(),
        2
    );
    let on_date = service
        .bookings_for_tour(
            "gorilla-trekking",
            NaiveDate::from_ymd_opt(2025, 8, 1),
        )
        .expect("dated bookings");
    assert_eq!(on_date.len(), 1);
    assert_eq!(on_date[0].full_name, "Peter Ochieng");

    let by_email = service.search_bookings("EXAMPLE.ORG").expect("search");
    assert_eq!(by_email.len(), 2);
    assert!(by_email.iter().all(|booking| booking.email == "peter@example.org"));

    let newest_first = service
        .bookings(&BookingQuery::default())
        .expect("all bookings");
    assert_eq!(newest_first.len(), 3);
    assert!(newest_first[0].id > newest_first[2].id);
}

#[test]
fn operator_can_search_and_delete_contact_messages() {
    let (service, _, _) = build_service();
    let kept = service
        .submit_contact_message(&contact_form())
        .expect("message stored");
    let mut other = contact_form();
    other.subject = "Invoice question".to_string();
    let removed = service
        .submit_contact_message(&other)
        .expect("message stored");

    let hits = service.contact_messages(Some("invoice")).expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, removed.id);

    service
        .delete_contact_message(removed.id)
        .expect("message deleted");
    let remaining = service.contact_messages(None).expect("messages");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);

    assert!(matches!(
        service.delete_contact_message(ContactMessageId(9_999)),
        Err(InquiryServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn tours_with_inquiries_are_protected_from_deletion() {
    let (service, store, _) = build_service();
    service
        .submit_booking("gorilla-trekking", &booking_form())
        .expect("booking accepted");

    let catalog = CatalogService::new(store.clone());
    assert!(matches!(
        catalog.delete_tour("gorilla-trekking"),
        Err(CatalogError::HasBookings { bookings: 1, .. })
    ));
    assert!(store
        .tour_by_slug("gorilla-trekking")
        .expect("lookup")
        .is_some());
}
