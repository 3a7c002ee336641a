use std::cmp::Reverse;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::Tour;
use super::repository::{CatalogError, CatalogRepository};

/// Filter values exactly as they arrived in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTourQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub max_price: Option<String>,
}

/// Conjunctive catalog filters. Absent values do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourFilters {
    pub keyword: Option<String>,
    pub difficulty: Option<String>,
    pub max_price: Option<Decimal>,
}

impl TourFilters {
    /// Interpret raw query values. Blank values are absent and a `max_price`
    /// that is not a number is dropped instead of failing the listing.
    pub fn from_raw(raw: &RawTourQuery) -> Self {
        // rust_decimal also accepts `1_000` and `1e2`; both are honored as bounds.
        let max_price = non_blank(raw.max_price.as_deref()).and_then(|value| {
            match Decimal::from_str(&value) {
                Ok(price) => Some(price),
                Err(err) => {
                    debug!(max_price = %value, %err, "ignoring malformed max_price filter");
                    None
                }
            }
        });

        Self {
            keyword: non_blank(raw.q.as_deref()),
            difficulty: non_blank(raw.difficulty.as_deref()),
            max_price,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keyword.is_none() && self.difficulty.is_none() && self.max_price.is_none()
    }

    pub fn matches(&self, tour: &Tour) -> bool {
        if let Some(keyword) = &self.keyword {
            let needle = keyword.to_lowercase();
            if !tour.name.to_lowercase().contains(&needle)
                && !tour.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(difficulty) = &self.difficulty {
            if tour.difficulty.as_str() != difficulty {
                return false;
            }
        }

        if let Some(max_price) = self.max_price {
            if tour.price > max_price {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Featured tours first, then newest first; later inserts win creation-time ties.
pub fn sort_for_listing(tours: &mut [Tour]) {
    tours.sort_by_key(|tour| (Reverse(tour.featured), Reverse(tour.created_at), Reverse(tour.id)));
}

/// Read-side access to the catalog for visitors.
pub struct CatalogQuery<R> {
    repository: Arc<R>,
}

impl<R> Clone for CatalogQuery<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> CatalogQuery<R>
where
    R: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// The complete filtered listing in catalog order.
    pub fn list_tours(&self, filters: &TourFilters) -> Result<Vec<Tour>, CatalogError> {
        let mut tours = self.repository.all_tours()?;
        tours.retain(|tour| filters.matches(tour));
        sort_for_listing(&mut tours);
        Ok(tours)
    }

    /// Up to `limit` featured tours for the home page.
    pub fn featured_tours(&self, limit: usize) -> Result<Vec<Tour>, CatalogError> {
        let mut tours = self.repository.all_tours()?;
        tours.retain(|tour| tour.featured);
        sort_for_listing(&mut tours);
        tours.truncate(limit);
        Ok(tours)
    }
}
