use chrono::NaiveDate;

use super::domain::{
    Booking, BookingId, BookingStatus, ContactMessage, ContactMessageId, NewBooking,
    NewContactMessage,
};
use crate::catalog::TourId;

/// Operator-side narrowing of the booking list. Empty fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingQuery {
    pub tour: Option<TourId>,
    pub preferred_date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
    /// Case-insensitive substring of the submitter's name or e-mail.
    pub search: Option<String>,
}

impl BookingQuery {
    pub fn matches(&self, booking: &Booking) -> bool {
        if self.tour.is_some_and(|tour| tour != booking.tour_id) {
            return false;
        }
        if self
            .preferred_date
            .is_some_and(|date| date != booking.preferred_date)
        {
            return false;
        }
        if self.status.is_some_and(|status| status != booking.status) {
            return false;
        }
        match &self.search {
            Some(needle) => contains_ignoring_case(
                &[booking.full_name.as_str(), booking.email.as_str()],
                needle,
            ),
            None => true,
        }
    }
}

pub(crate) fn contains_ignoring_case(haystacks: &[&str], needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty()
        || haystacks
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Storage abstraction for booking inquiries and contact messages.
///
/// Listings come back newest first.
pub trait InquiryRepository: Send + Sync {
    /// Store a booking at `pending`. Fails with [`RepositoryError::MissingTour`]
    /// when the referenced tour no longer exists.
    fn insert_booking(&self, booking: NewBooking) -> Result<Booking, RepositoryError>;
    fn booking(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError>;
    fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, RepositoryError>;
    fn bookings(&self, query: &BookingQuery) -> Result<Vec<Booking>, RepositoryError>;

    fn insert_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, RepositoryError>;
    /// Messages whose name, e-mail, or subject contains `search`, or all of them.
    fn contact_messages(&self, search: Option<&str>)
        -> Result<Vec<ContactMessage>, RepositoryError>;
    fn delete_contact_message(&self, id: ContactMessageId) -> Result<(), RepositoryError>;
}

/// Error enumeration for inquiry storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("tour {0} does not exist")]
    MissingTour(TourId),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
