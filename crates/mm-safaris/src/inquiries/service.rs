use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::domain::{
    Booking, BookingForm, BookingId, BookingStatus, ContactForm, ContactMessage, ContactMessageId,
};
use super::repository::{BookingQuery, InquiryRepository, RepositoryError};
use super::validation::{validate_booking, validate_contact, FieldErrors};
use crate::catalog::{CatalogError, CatalogRepository, Tour};
use crate::config::MailConfig;
use crate::notifications::{templates, Notification, Notifier};

/// Inquiry lifecycle: accepts booking and contact submissions, moves bookings
/// through their status machine, and triggers best-effort notifications.
pub struct InquiryService<C, I, N> {
    catalog: Arc<C>,
    inquiries: Arc<I>,
    notifier: Arc<N>,
    operator_email: String,
}

impl<C, I, N> InquiryService<C, I, N>
where
    C: CatalogRepository + 'static,
    I: InquiryRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(catalog: Arc<C>, inquiries: Arc<I>, notifier: Arc<N>, mail: &MailConfig) -> Self {
        Self {
            catalog,
            inquiries,
            notifier,
            operator_email: mail.operator_email.clone(),
        }
    }

    /// The tour a booking form is being filled in for.
    pub fn bookable_tour(&self, slug: &str) -> Result<Tour, InquiryServiceError> {
        self.catalog
            .tour_by_slug(slug)?
            .ok_or_else(|| InquiryServiceError::TourNotFound(slug.to_string()))
    }

    /// Validate and store a booking inquiry, then queue the visitor receipt
    /// and the operator alert. Notification trouble never fails the call.
    pub fn submit_booking(
        &self,
        tour_slug: &str,
        form: &BookingForm,
    ) -> Result<Booking, InquiryServiceError> {
        let tour = self.bookable_tour(tour_slug)?;
        let booking = validate_booking(tour.id, form).map_err(InquiryServiceError::Validation)?;
        let stored = match self.inquiries.insert_booking(booking) {
            Err(RepositoryError::MissingTour(_)) => {
                return Err(InquiryServiceError::TourNotFound(tour_slug.to_string()))
            }
            other => other?,
        };

        info!(
            booking = %stored.id,
            tour = %tour.slug,
            travellers = stored.number_of_people,
            "booking inquiry received"
        );

        self.dispatch(templates::booking_receipt(&tour, &stored));
        self.dispatch(templates::booking_alert(&tour, &stored, &self.operator_email));
        Ok(stored)
    }

    /// Validate and store a contact message, then queue the operator alert.
    pub fn submit_contact_message(
        &self,
        form: &ContactForm,
    ) -> Result<ContactMessage, InquiryServiceError> {
        let message = validate_contact(form).map_err(InquiryServiceError::Validation)?;
        let stored = self.inquiries.insert_contact_message(message)?;

        info!(message = %stored.id, subject = %stored.subject, "contact message received");

        self.dispatch(templates::contact_alert(&stored, &self.operator_email));
        Ok(stored)
    }

    /// Operator-driven status change along the booking status machine.
    pub fn transition_booking_status(
        &self,
        id: BookingId,
        next: BookingStatus,
    ) -> Result<Booking, InquiryServiceError> {
        let current = self.booking(id)?;
        if !current.status.can_transition_to(next) {
            return Err(InquiryServiceError::InvalidTransition {
                id,
                from: current.status,
                to: next,
            });
        }

        let updated = self.inquiries.update_booking_status(id, next)?;
        info!(booking = %id, from = %current.status, to = %next, "booking status changed");
        Ok(updated)
    }

    pub fn booking(&self, id: BookingId) -> Result<Booking, InquiryServiceError> {
        self.inquiries
            .booking(id)?
            .ok_or(InquiryServiceError::Repository(RepositoryError::NotFound))
    }

    /// Bookings newest first, narrowed by `query`.
    pub fn bookings(&self, query: &BookingQuery) -> Result<Vec<Booking>, InquiryServiceError> {
        Ok(self.inquiries.bookings(query)?)
    }

    /// Bookings for one tour, optionally only those for a given preferred date.
    pub fn bookings_for_tour(
        &self,
        tour_slug: &str,
        preferred_date: Option<NaiveDate>,
    ) -> Result<Vec<Booking>, InquiryServiceError> {
        let tour = self.bookable_tour(tour_slug)?;
        self.bookings(&BookingQuery {
            tour: Some(tour.id),
            preferred_date,
            ..BookingQuery::default()
        })
    }

    /// Bookings whose submitter name or e-mail contains `term`.
    pub fn search_bookings(&self, term: &str) -> Result<Vec<Booking>, InquiryServiceError> {
        self.bookings(&BookingQuery {
            search: Some(term.to_string()),
            ..BookingQuery::default()
        })
    }

    pub fn contact_messages(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<ContactMessage>, InquiryServiceError> {
        Ok(self.inquiries.contact_messages(search)?)
    }

    pub fn delete_contact_message(&self, id: ContactMessageId) -> Result<(), InquiryServiceError> {
        self.inquiries.delete_contact_message(id)?;
        info!(message = %id, "contact message deleted");
        Ok(())
    }

    fn dispatch(&self, notification: Notification) {
        let kind = notification.kind.as_str();
        let to = notification.to.clone();
        if let Err(err) = self.notifier.notify(notification) {
            warn!(kind, to = %to, error = %err, "notification hand-off failed; continuing");
        }
    }
}

/// Error raised by the inquiry service.
#[derive(Debug, thiserror::Error)]
pub enum InquiryServiceError {
    #[error("no tour found for '{0}'")]
    TourNotFound(String),
    #[error("{0}")]
    Validation(FieldErrors),
    #[error("booking {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
