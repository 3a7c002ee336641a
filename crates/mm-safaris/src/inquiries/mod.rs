//! Booking inquiries and contact messages: intake, validation, and the
//! operator-driven booking lifecycle.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Booking, BookingForm, BookingId, BookingStatus, ContactForm, ContactMessage,
    ContactMessageId, NewBooking, NewContactMessage,
};
pub use repository::{BookingQuery, InquiryRepository, RepositoryError};
pub use router::inquiry_router;
pub use service::{InquiryService, InquiryServiceError};
pub use validation::{FieldError, FieldErrorKind, FieldErrors};
