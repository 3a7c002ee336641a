//! In-process store backing both the catalog and the inquiry repositories.
//!
//! All records live behind a single mutex so uniqueness checks, cascades, and
//! the booking-to-tour reference check happen inside one critical section.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::catalog::{
    CatalogError, CatalogRepository, ItineraryDay, NewItineraryDay, NewTourImage, Tour,
    TourDraft, TourId, TourImage,
};
use crate::inquiries::domain::{
    Booking, BookingId, BookingStatus, ContactMessage, ContactMessageId, NewBooking,
    NewContactMessage,
};
use crate::inquiries::repository::{
    contains_ignoring_case, BookingQuery, InquiryRepository, RepositoryError,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    tours: BTreeMap<TourId, Tour>,
    itinerary: BTreeMap<u64, ItineraryDay>,
    gallery: BTreeMap<u64, TourImage>,
    bookings: BTreeMap<BookingId, Booking>,
    messages: BTreeMap<ContactMessageId, ContactMessage>,
    sequence: u64,
}

impl StoreState {
    /// One sequence for every record kind; ids only need to be unique per kind.
    fn next_id(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    fn slug_taken(&self, slug: &str, except: Option<TourId>) -> bool {
        self.tours
            .values()
            .any(|tour| tour.slug == slug && Some(tour.id) != except)
    }

    fn bookings_for(&self, tour: TourId) -> usize {
        self.bookings
            .values()
            .filter(|booking| booking.tour_id == tour)
            .count()
    }
}

const POISONED: &str = "store lock poisoned";

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn catalog_state(&self) -> Result<MutexGuard<'_, StoreState>, CatalogError> {
        self.state
            .lock()
            .map_err(|_| CatalogError::Unavailable(POISONED.to_string()))
    }

    fn inquiry_state(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable(POISONED.to_string()))
    }
}

impl CatalogRepository for MemoryStore {
    fn insert_tour(&self, draft: TourDraft) -> Result<Tour, CatalogError> {
        let mut state = self.catalog_state()?;
        if state.slug_taken(&draft.slug, None) {
            return Err(CatalogError::DuplicateSlug(draft.slug));
        }

        let now = Utc::now();
        let tour = Tour {
            id: TourId(state.next_id()),
            name: draft.name,
            slug: draft.slug,
            description: draft.description,
            duration_days: draft.duration_days,
            price: draft.price,
            difficulty: draft.difficulty,
            max_group_size: draft.max_group_size,
            image: draft.image,
            featured: draft.featured,
            created_at: now,
            updated_at: now,
        };
        state.tours.insert(tour.id, tour.clone());
        Ok(tour)
    }

    fn update_tour(&self, id: TourId, draft: TourDraft) -> Result<Tour, CatalogError> {
        let mut state = self.catalog_state()?;
        if state.slug_taken(&draft.slug, Some(id)) {
            return Err(CatalogError::DuplicateSlug(draft.slug));
        }

        let tour = state
            .tours
            .get_mut(&id)
            .ok_or_else(|| CatalogError::NotFound(format!("tour {id}")))?;
        tour.name = draft.name;
        tour.slug = draft.slug;
        tour.description = draft.description;
        tour.duration_days = draft.duration_days;
        tour.price = draft.price;
        tour.difficulty = draft.difficulty;
        tour.max_group_size = draft.max_group_size;
        tour.image = draft.image;
        tour.featured = draft.featured;
        tour.updated_at = Utc::now();
        Ok(tour.clone())
    }

    fn delete_tour(&self, id: TourId) -> Result<(), CatalogError> {
        let mut state = self.catalog_state()?;
        let slug = match state.tours.get(&id) {
            Some(tour) => tour.slug.clone(),
            None => return Err(CatalogError::NotFound(format!("tour {id}"))),
        };

        let bookings = state.bookings_for(id);
        if bookings > 0 {
            return Err(CatalogError::HasBookings { slug, bookings });
        }

        state.tours.remove(&id);
        state.itinerary.retain(|_, day| day.tour_id != id);
        state.gallery.retain(|_, image| image.tour_id != id);
        Ok(())
    }

    fn tour_by_id(&self, id: TourId) -> Result<Option<Tour>, CatalogError> {
        Ok(self.catalog_state()?.tours.get(&id).cloned())
    }

    fn tour_by_slug(&self, slug: &str) -> Result<Option<Tour>, CatalogError> {
        let state = self.catalog_state()?;
        Ok(state.tours.values().find(|tour| tour.slug == slug).cloned())
    }

    fn all_tours(&self) -> Result<Vec<Tour>, CatalogError> {
        Ok(self.catalog_state()?.tours.values().cloned().collect())
    }

    fn insert_itinerary_day(
        &self,
        tour: TourId,
        day: NewItineraryDay,
    ) -> Result<ItineraryDay, CatalogError> {
        let mut state = self.catalog_state()?;
        if !state.tours.contains_key(&tour) {
            return Err(CatalogError::NotFound(format!("tour {tour}")));
        }

        let day = ItineraryDay {
            id: state.next_id(),
            tour_id: tour,
            day_number: day.day_number,
            title: day.title,
            description: day.description,
            accommodation: day.accommodation,
            meals: day.meals,
        };
        state.itinerary.insert(day.id, day.clone());
        Ok(day)
    }

    fn delete_itinerary_day(&self, id: u64) -> Result<(), CatalogError> {
        self.catalog_state()?
            .itinerary
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CatalogError::NotFound(format!("itinerary day {id}")))
    }

    fn itinerary_for(&self, tour: TourId) -> Result<Vec<ItineraryDay>, CatalogError> {
        let state = self.catalog_state()?;
        Ok(state
            .itinerary
            .values()
            .filter(|day| day.tour_id == tour)
            .cloned()
            .collect())
    }

    fn insert_image(&self, tour: TourId, image: NewTourImage) -> Result<TourImage, CatalogError> {
        let mut state = self.catalog_state()?;
        if !state.tours.contains_key(&tour) {
            return Err(CatalogError::NotFound(format!("tour {tour}")));
        }

        let image = TourImage {
            id: state.next_id(),
            tour_id: tour,
            image: image.image,
            caption: image.caption,
        };
        state.gallery.insert(image.id, image.clone());
        Ok(image)
    }

    fn delete_image(&self, id: u64) -> Result<(), CatalogError> {
        self.catalog_state()?
            .gallery
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CatalogError::NotFound(format!("gallery image {id}")))
    }

    fn gallery_for(&self, tour: TourId) -> Result<Vec<TourImage>, CatalogError> {
        let state = self.catalog_state()?;
        Ok(state
            .gallery
            .values()
            .filter(|image| image.tour_id == tour)
            .cloned()
            .collect())
    }
}

impl InquiryRepository for MemoryStore {
    fn insert_booking(&self, booking: NewBooking) -> Result<Booking, RepositoryError> {
        let mut state = self.inquiry_state()?;
        if !state.tours.contains_key(&booking.tour_id) {
            return Err(RepositoryError::MissingTour(booking.tour_id));
        }

        let booking = Booking {
            id: BookingId(state.next_id()),
            tour_id: booking.tour_id,
            full_name: booking.full_name,
            email: booking.email,
            phone: booking.phone,
            number_of_people: booking.number_of_people,
            preferred_date: booking.preferred_date,
            special_requests: booking.special_requests,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        };
        state.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    fn booking(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        Ok(self.inquiry_state()?.bookings.get(&id).cloned())
    }

    fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, RepositoryError> {
        let mut state = self.inquiry_state()?;
        let booking = state
            .bookings
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        booking.status = status;
        Ok(booking.clone())
    }

    fn bookings(&self, query: &BookingQuery) -> Result<Vec<Booking>, RepositoryError> {
        let state = self.inquiry_state()?;
        let mut bookings: Vec<_> = state
            .bookings
            .values()
            .filter(|booking| query.matches(booking))
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| (Reverse(booking.created_at), Reverse(booking.id)));
        Ok(bookings)
    }

    fn insert_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, RepositoryError> {
        let mut state = self.inquiry_state()?;
        let message = ContactMessage {
            id: ContactMessageId(state.next_id()),
            name: message.name,
            email: message.email,
            subject: message.subject,
            message: message.message,
            created_at: Utc::now(),
        };
        state.messages.insert(message.id, message.clone());
        Ok(message)
    }

    fn contact_messages(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<ContactMessage>, RepositoryError> {
        let state = self.inquiry_state()?;
        let mut messages: Vec<_> = state
            .messages
            .values()
            .filter(|message| match search {
                Some(needle) => contains_ignoring_case(
                    &[
                        message.name.as_str(),
                        message.email.as_str(),
                        message.subject.as_str(),
                    ],
                    needle,
                ),
                None => true,
            })
            .cloned()
            .collect();
        messages.sort_by_key(|message| (Reverse(message.created_at), Reverse(message.id)));
        Ok(messages)
    }

    fn delete_contact_message(&self, id: ContactMessageId) -> Result<(), RepositoryError> {
        self.inquiry_state()?
            .messages
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
