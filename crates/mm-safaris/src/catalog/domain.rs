use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_GROUP_SIZE: u32 = 12;
pub const NAME_MAX_LEN: usize = 200;
pub const CAPTION_MAX_LEN: usize = 200;
pub const MEALS_MAX_LEN: usize = 100;

/// Store-assigned identifier for a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TourId(pub u64);

impl fmt::Display for TourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Moderate, Self::Challenging];

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Challenging => "challenging",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Challenging => "Challenging",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, moderate, or challenging)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str() == value)
            .ok_or_else(|| UnknownDifficulty(value.to_string()))
    }
}

/// A bookable itinerary product as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: TourId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub duration_days: u32,
    pub price: Decimal,
    pub difficulty: Difficulty,
    pub max_group_size: u32,
    pub image: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Operator input for a new tour. The slug is derived from the name when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTour {
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
    pub duration_days: u32,
    pub price: Decimal,
    pub difficulty: Difficulty,
    pub max_group_size: u32,
    pub image: Option<String>,
    pub featured: bool,
}

impl NewTour {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        duration_days: u32,
        price: Decimal,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            name: name.into(),
            slug: None,
            description: description.into(),
            duration_days,
            price,
            difficulty,
            max_group_size: DEFAULT_MAX_GROUP_SIZE,
            image: None,
            featured: false,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_max_group_size(mut self, max_group_size: u32) -> Self {
        self.max_group_size = max_group_size;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }
}

/// What an edit does to the slug of an existing tour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SlugChange {
    /// Keep the current slug, even if the name changes.
    #[default]
    Keep,
    /// Replace the slug with an explicit value.
    Set(String),
    /// Clear the slug so it is derived again from the (possibly new) name.
    Regenerate,
}

/// Partial edit of a tour; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourUpdate {
    pub name: Option<String>,
    pub slug: SlugChange,
    pub description: Option<String>,
    pub duration_days: Option<u32>,
    pub price: Option<Decimal>,
    pub difficulty: Option<Difficulty>,
    pub max_group_size: Option<u32>,
    pub image: Option<Option<String>>,
    pub featured: Option<bool>,
}

/// One day's plan within a tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub id: u64,
    pub tour_id: TourId,
    pub day_number: u32,
    pub title: String,
    pub description: String,
    pub accommodation: Option<String>,
    pub meals: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItineraryDay {
    pub day_number: u32,
    pub title: String,
    pub description: String,
    pub accommodation: Option<String>,
    pub meals: Option<String>,
}

/// A gallery photo; `image` references an asset in the media store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourImage {
    pub id: u64,
    pub tour_id: TourId,
    pub image: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTourImage {
    pub image: String,
    pub caption: Option<String>,
}

/// A tour with its itinerary (ascending by day number) and gallery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourDetail {
    pub tour: Tour,
    pub itinerary: Vec<ItineraryDay>,
    pub gallery: Vec<TourImage>,
}
