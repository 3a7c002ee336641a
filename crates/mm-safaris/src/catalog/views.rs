use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{Difficulty, ItineraryDay, Tour, TourDetail, TourImage};
use crate::config::MediaConfig;

/// Public representation of a tour in listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourSummaryView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub duration_days: u32,
    pub price: Decimal,
    pub difficulty: Difficulty,
    pub difficulty_label: &'static str,
    pub max_group_size: u32,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub url: String,
    pub booking_url: String,
}

impl TourSummaryView {
    pub fn new(tour: &Tour, media: &MediaConfig) -> Self {
        Self {
            slug: tour.slug.clone(),
            name: tour.name.clone(),
            description: tour.description.clone(),
            duration_days: tour.duration_days,
            price: tour.price,
            difficulty: tour.difficulty,
            difficulty_label: tour.difficulty.label(),
            max_group_size: tour.max_group_size,
            featured: tour.featured,
            image_url: tour.image.as_deref().map(|asset| media.url_for(asset)),
            url: tour_url(&tour.slug),
            booking_url: booking_url(&tour.slug),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryDayView {
    pub day_number: u32,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meals: Option<String>,
}

impl From<&ItineraryDay> for ItineraryDayView {
    fn from(day: &ItineraryDay) -> Self {
        Self {
            day_number: day.day_number,
            title: day.title.clone(),
            description: day.description.clone(),
            accommodation: day.accommodation.clone(),
            meals: day.meals.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryImageView {
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl GalleryImageView {
    fn new(image: &TourImage, media: &MediaConfig) -> Self {
        Self {
            image_url: media.url_for(&image.image),
            caption: image.caption.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourDetailView {
    #[serde(flatten)]
    pub tour: TourSummaryView,
    pub itinerary: Vec<ItineraryDayView>,
    pub gallery: Vec<GalleryImageView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl TourDetailView {
    pub fn new(detail: &TourDetail, media: &MediaConfig) -> Self {
        Self {
            tour: TourSummaryView::new(&detail.tour, media),
            itinerary: detail.itinerary.iter().map(ItineraryDayView::from).collect(),
            gallery: detail
                .gallery
                .iter()
                .map(|image| GalleryImageView::new(image, media))
                .collect(),
            message: None,
        }
    }
}

pub fn tour_url(slug: &str) -> String {
    format!("/tours/{slug}/")
}

pub fn booking_url(slug: &str) -> String {
    format!("/tours/{slug}/book/")
}
