use rust_decimal::Decimal;

use super::domain::{
    Difficulty, ItineraryDay, NewItineraryDay, NewTourImage, Tour, TourId, TourImage,
};

/// Tour fields that passed catalog checks, with the slug already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TourDraft {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub duration_days: u32,
    pub price: Decimal,
    pub difficulty: Difficulty,
    pub max_group_size: u32,
    pub image: Option<String>,
    pub featured: bool,
}

impl TourDraft {
    pub(crate) fn from_tour(tour: &Tour) -> Self {
        Self {
            name: tour.name.clone(),
            slug: tour.slug.clone(),
            description: tour.description.clone(),
            duration_days: tour.duration_days,
            price: tour.price,
            difficulty: tour.difficulty,
            max_group_size: tour.max_group_size,
            image: tour.image.clone(),
            featured: tour.featured,
        }
    }
}

/// Storage abstraction for tours and the records they own.
///
/// Implementations enforce slug uniqueness themselves, so two concurrent writes
/// with the same slug cannot both succeed, and remove itinerary days and gallery
/// images together with their tour.
pub trait CatalogRepository: Send + Sync {
    fn insert_tour(&self, draft: TourDraft) -> Result<Tour, CatalogError>;
    /// Replace the stored fields of a tour, keeping its id and creation time.
    fn update_tour(&self, id: TourId, draft: TourDraft) -> Result<Tour, CatalogError>;
    fn delete_tour(&self, id: TourId) -> Result<(), CatalogError>;
    fn tour_by_id(&self, id: TourId) -> Result<Option<Tour>, CatalogError>;
    fn tour_by_slug(&self, slug: &str) -> Result<Option<Tour>, CatalogError>;
    /// Every tour, in no particular order.
    fn all_tours(&self) -> Result<Vec<Tour>, CatalogError>;

    fn insert_itinerary_day(
        &self,
        tour: TourId,
        day: NewItineraryDay,
    ) -> Result<ItineraryDay, CatalogError>;
    fn delete_itinerary_day(&self, id: u64) -> Result<(), CatalogError>;
    fn itinerary_for(&self, tour: TourId) -> Result<Vec<ItineraryDay>, CatalogError>;

    fn insert_image(&self, tour: TourId, image: NewTourImage) -> Result<TourImage, CatalogError>;
    fn delete_image(&self, id: u64) -> Result<(), CatalogError>;
    fn gallery_for(&self, tour: TourId) -> Result<Vec<TourImage>, CatalogError>;
}

/// Error enumeration for catalog failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("a tour with slug '{0}' already exists")]
    DuplicateSlug(String),
    #[error("no tour found for '{0}'")]
    NotFound(String),
    #[error("invalid slug '{0}': use lowercase letters, digits, and single hyphens")]
    InvalidSlug(String),
    #[error("invalid tour: {0}")]
    InvalidTour(String),
    #[error("tour '{slug}' still has {bookings} booking inquiries")]
    HasBookings { slug: String, bookings: usize },
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}
