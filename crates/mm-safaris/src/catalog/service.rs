use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use super::domain::{
    ItineraryDay, NewItineraryDay, NewTour, NewTourImage, SlugChange, Tour, TourDetail,
    TourImage, TourUpdate, CAPTION_MAX_LEN, MEALS_MAX_LEN, NAME_MAX_LEN,
};
use super::repository::{CatalogError, CatalogRepository, TourDraft};
use super::slug::{is_valid_slug, slugify};

/// Operator-side catalog maintenance: tours, itinerary days, and gallery images.
pub struct CatalogService<R> {
    repository: Arc<R>,
}

impl<R> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> CatalogService<R>
where
    R: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a tour, deriving its slug from the name when none is supplied.
    ///
    /// A derived slug that collides with an existing tour is rejected with
    /// [`CatalogError::DuplicateSlug`]; callers pick a distinct slug explicitly.
    pub fn create_tour(&self, tour: NewTour) -> Result<Tour, CatalogError> {
        let slug = resolve_slug(tour.slug.as_deref(), &tour.name)?;
        let draft = TourDraft {
            name: tour.name.trim().to_string(),
            slug,
            description: tour.description,
            duration_days: tour.duration_days,
            price: tour.price,
            difficulty: tour.difficulty,
            max_group_size: tour.max_group_size,
            image: normalize_optional(tour.image),
            featured: tour.featured,
        };
        let draft = checked(draft)?;

        let stored = self.repository.insert_tour(draft)?;
        info!(tour = %stored.slug, id = %stored.id, "tour created");
        Ok(stored)
    }

    /// Edit a tour. The slug only changes when the update asks for it.
    pub fn update_tour(&self, slug: &str, update: TourUpdate) -> Result<Tour, CatalogError> {
        let current = self.tour(slug)?;
        let mut draft = TourDraft::from_tour(&current);

        if let Some(name) = update.name {
            draft.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            draft.description = description;
        }
        if let Some(duration_days) = update.duration_days {
            draft.duration_days = duration_days;
        }
        if let Some(price) = update.price {
            draft.price = price;
        }
        if let Some(difficulty) = update.difficulty {
            draft.difficulty = difficulty;
        }
        if let Some(max_group_size) = update.max_group_size {
            draft.max_group_size = max_group_size;
        }
        if let Some(image) = update.image {
            draft.image = normalize_optional(image);
        }
        if let Some(featured) = update.featured {
            draft.featured = featured;
        }

        draft.slug = match update.slug {
            SlugChange::Keep => current.slug.clone(),
            SlugChange::Set(slug) => resolve_slug(Some(&slug), &draft.name)?,
            SlugChange::Regenerate => resolve_slug(None, &draft.name)?,
        };

        let draft = checked(draft)?;
        let stored = self.repository.update_tour(current.id, draft)?;
        info!(tour = %stored.slug, id = %stored.id, "tour updated");
        Ok(stored)
    }

    /// Delete a tour together with its itinerary days and gallery images.
    pub fn delete_tour(&self, slug: &str) -> Result<(), CatalogError> {
        let tour = self.tour(slug)?;
        self.repository.delete_tour(tour.id)?;
        info!(tour = %tour.slug, id = %tour.id, "tour deleted");
        Ok(())
    }

    pub fn tour(&self, slug: &str) -> Result<Tour, CatalogError> {
        self.repository
            .tour_by_slug(slug)?
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
    }

    pub fn tour_detail(&self, slug: &str) -> Result<TourDetail, CatalogError> {
        let tour = self.tour(slug)?;
        let mut itinerary = self.repository.itinerary_for(tour.id)?;
        itinerary.sort_by_key(|day| day.day_number);
        let mut gallery = self.repository.gallery_for(tour.id)?;
        gallery.sort_by_key(|image| image.id);

        Ok(TourDetail {
            tour,
            itinerary,
            gallery,
        })
    }

    pub fn add_itinerary_day(
        &self,
        slug: &str,
        day: NewItineraryDay,
    ) -> Result<ItineraryDay, CatalogError> {
        let tour = self.tour(slug)?;

        if day.day_number == 0 {
            return Err(CatalogError::InvalidTour(
                "itinerary day number must be positive".to_string(),
            ));
        }
        let title = required_text("itinerary title", &day.title, NAME_MAX_LEN)?;
        let accommodation =
            optional_text("accommodation", normalize_optional(day.accommodation), NAME_MAX_LEN)?;
        let meals = optional_text("meals", normalize_optional(day.meals), MEALS_MAX_LEN)?;

        self.repository.insert_itinerary_day(
            tour.id,
            NewItineraryDay {
                day_number: day.day_number,
                title,
                description: day.description,
                accommodation,
                meals,
            },
        )
    }

    pub fn remove_itinerary_day(&self, id: u64) -> Result<(), CatalogError> {
        self.repository.delete_itinerary_day(id)
    }

    pub fn add_image(&self, slug: &str, image: NewTourImage) -> Result<TourImage, CatalogError> {
        let tour = self.tour(slug)?;
        let asset = required_text("gallery image", &image.image, usize::MAX)?;
        let caption = optional_text("caption", normalize_optional(image.caption), CAPTION_MAX_LEN)?;

        self.repository.insert_image(
            tour.id,
            NewTourImage {
                image: asset,
                caption,
            },
        )
    }

    pub fn remove_image(&self, id: u64) -> Result<(), CatalogError> {
        self.repository.delete_image(id)
    }
}

fn resolve_slug(explicit: Option<&str>, name: &str) -> Result<String, CatalogError> {
    match explicit.map(str::trim).filter(|slug| !slug.is_empty()) {
        Some(slug) if is_valid_slug(slug) => Ok(slug.to_string()),
        Some(slug) => Err(CatalogError::InvalidSlug(slug.to_string())),
        None => {
            let derived = slugify(name);
            if derived.is_empty() {
                Err(CatalogError::InvalidSlug(name.to_string()))
            } else {
                Ok(derived)
            }
        }
    }
}

fn checked(mut draft: TourDraft) -> Result<TourDraft, CatalogError> {
    draft.name = required_text("name", &draft.name, NAME_MAX_LEN)?;
    if draft.description.trim().is_empty() {
        return Err(CatalogError::InvalidTour("description is required".to_string()));
    }
    if draft.duration_days == 0 {
        return Err(CatalogError::InvalidTour(
            "duration must be at least one day".to_string(),
        ));
    }
    if draft.max_group_size == 0 {
        return Err(CatalogError::InvalidTour(
            "maximum group size must be positive".to_string(),
        ));
    }
    draft.price = normalize_price(draft.price)?;
    Ok(draft)
}

/// Largest storable price, 99_999_999.99: ten digits, two of them after the point.
const PRICE_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Prices are non-negative, at most [`PRICE_MAX`], with exactly two fractional digits.
fn normalize_price(price: Decimal) -> Result<Decimal, CatalogError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CatalogError::InvalidTour(format!(
            "price must not be negative (got {price})"
        )));
    }
    if price.normalize().scale() > 2 {
        return Err(CatalogError::InvalidTour(format!(
            "price must have at most two decimal places (got {price})"
        )));
    }
    if price > PRICE_MAX {
        return Err(CatalogError::InvalidTour(format!(
            "price must not exceed {PRICE_MAX} (got {price})"
        )));
    }

    let mut fixed = price.abs();
    fixed.rescale(2);
    if fixed.scale() != 2 {
        return Err(CatalogError::InvalidTour(format!(
            "price {price} cannot be stored with two decimal places"
        )));
    }
    Ok(fixed)
}

fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidTour(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CatalogError::InvalidTour(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn optional_text(
    field: &str,
    value: Option<String>,
    max_len: usize,
) -> Result<Option<String>, CatalogError> {
    match value {
        Some(text) if text.chars().count() > max_len => Err(CatalogError::InvalidTour(format!(
            "{field} must be at most {max_len} characters"
        ))),
        other => Ok(other),
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::Difficulty;
    use crate::store::MemoryStore;

    fn service() -> CatalogService<MemoryStore> {
        CatalogService::new(Arc::new(MemoryStore::default()))
    }

    fn tour(name: &str) -> NewTour {
        NewTour::new(
            name,
            "Game drives and sundowners.",
            3,
            Decimal::new(145000, 2),
            Difficulty::Easy,
        )
    }

    #[test]
    fn derives_slug_from_name() {
        let service = service();
        let stored = service
            .create_tour(tour("Amboseli Elephant Paradise"))
            .expect("tour created");
        assert_eq!(stored.slug, "amboseli-elephant-paradise");
        assert_eq!(stored.price.to_string(), "1450.00");
        assert_eq!(stored.max_group_size, 12);
    }

    #[test]
    fn names_that_slugify_identically_conflict() {
        let service = service();
        service
            .create_tour(tour("Tsavo East & West"))
            .expect("first tour created");

        match service.create_tour(tour("Tsavo East / West!")) {
            Err(CatalogError::DuplicateSlug(slug)) => assert_eq!(slug, "tsavo-east-west"),
            other => panic!("expected duplicate slug, got {other:?}"),
        }
        assert_eq!(
            service
                .create_tour(tour("Tsavo East / West!").with_slug("tsavo-east-west-2"))
                .expect("explicit slug accepted")
                .slug,
            "tsavo-east-west-2"
        );
    }

    #[test]
    fn rejects_non_canonical_explicit_slugs() {
        let service = service();
        match service.create_tour(tour("Lake Nakuru").with_slug("Lake Nakuru")) {
            Err(CatalogError::InvalidSlug(slug)) => assert_eq!(slug, "Lake Nakuru"),
            other => panic!("expected invalid slug, got {other:?}"),
        }
    }

    #[test]
    fn validates_tour_fields() {
        let service = service();

        let mut zero_days = tour("Zero Days");
        zero_days.duration_days = 0;
        assert!(matches!(
            service.create_tour(zero_days),
            Err(CatalogError::InvalidTour(_))
        ));

        let mut negative = tour("Negative Price");
        negative.price = Decimal::new(-100, 2);
        assert!(matches!(
            service.create_tour(negative),
            Err(CatalogError::InvalidTour(_))
        ));

        let mut fractional = tour("Fractional Price");
        fractional.price = Decimal::new(10005, 3);
        assert!(matches!(
            service.create_tour(fractional),
            Err(CatalogError::InvalidTour(_))
        ));

        for price in [Decimal::MAX, Decimal::new(100_000_000, 0)] {
            let mut oversized = tour("Oversized Price");
            oversized.price = price;
            assert!(
                matches!(
                    service.create_tour(oversized),
                    Err(CatalogError::InvalidTour(_))
                ),
                "{price}"
            );
        }

        let mut ceiling = tour("Ceiling Price");
        ceiling.price = Decimal::new(9_999_999_999, 2);
        let stored = service.create_tour(ceiling).expect("largest price accepted");
        assert_eq!(stored.price.scale(), 2);
        assert_eq!(stored.price.to_string(), "99999999.99");

        assert!(matches!(
            service.create_tour(tour("!!!")),
            Err(CatalogError::InvalidSlug(_))
        ));
    }

    #[test]
    fn slug_is_stable_across_renames_until_regenerated() {
        let service = service();
        service
            .create_tour(tour("Samburu Desert Safari"))
            .expect("tour created");

        let renamed = service
            .update_tour(
                "samburu-desert-safari",
                TourUpdate {
                    name: Some("Samburu Desert Safari Adventure".to_string()),
                    ..TourUpdate::default()
                },
            )
            .expect("rename succeeds");
        assert_eq!(renamed.slug, "samburu-desert-safari");
        assert_eq!(renamed.name, "Samburu Desert Safari Adventure");

        let regenerated = service
            .update_tour(
                "samburu-desert-safari",
                TourUpdate {
                    slug: SlugChange::Regenerate,
                    ..TourUpdate::default()
                },
            )
            .expect("regeneration succeeds");
        assert_eq!(regenerated.slug, "samburu-desert-safari-adventure");
        assert!(matches!(
            service.tour("samburu-desert-safari"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn update_to_taken_slug_is_rejected() {
        let service = service();
        service.create_tour(tour("Mount Kenya Trek")).expect("created");
        service.create_tour(tour("Family Safari")).expect("created");

        let result = service.update_tour(
            "family-safari",
            TourUpdate {
                slug: SlugChange::Set("mount-kenya-trek".to_string()),
                ..TourUpdate::default()
            },
        );
        assert!(matches!(result, Err(CatalogError::DuplicateSlug(_))));
    }

    #[test]
    fn detail_orders_itinerary_by_day_number() {
        let service = service();
        service.create_tour(tour("Gorilla Trekking")).expect("created");

        for (day_number, title) in [(3, "Trek"), (1, "Arrival"), (2, "Transfer"), (1, "Briefing")] {
            service
                .add_itinerary_day(
                    "gorilla-trekking",
                    NewItineraryDay {
                        day_number,
                        title: title.to_string(),
                        description: String::new(),
                        accommodation: Some("Bwindi Lodge".to_string()),
                        meals: Some("B,L,D".to_string()),
                    },
                )
                .expect("day added");
        }
        service
            .add_image(
                "gorilla-trekking",
                NewTourImage {
                    image: "tours/gallery/silverback.jpg".to_string(),
                    caption: Some("  ".to_string()),
                },
            )
            .expect("image added");

        let detail = service.tour_detail("gorilla-trekking").expect("detail");
        let titles: Vec<_> = detail.itinerary.iter().map(|day| day.title.as_str()).collect();
        assert_eq!(titles, ["Arrival", "Briefing", "Transfer", "Trek"]);
        assert_eq!(detail.gallery.len(), 1);
        assert_eq!(detail.gallery[0].caption, None);
    }

    #[test]
    fn rejects_day_zero() {
        let service = service();
        service.create_tour(tour("Day Zero")).expect("created");
        let result = service.add_itinerary_day(
            "day-zero",
            NewItineraryDay {
                day_number: 0,
                title: "Nothing".to_string(),
                description: String::new(),
                accommodation: None,
                meals: None,
            },
        );
        assert!(matches!(result, Err(CatalogError::InvalidTour(_))));
    }

    #[test]
    fn delete_cascades_to_owned_records() {
        let store = Arc::new(MemoryStore::default());
        let service = CatalogService::new(store.clone());
        let created = service.create_tour(tour("Coastal Retreat")).expect("created");
        service
            .add_itinerary_day(
                "coastal-retreat",
                NewItineraryDay {
                    day_number: 1,
                    title: "Beach".to_string(),
                    description: String::new(),
                    accommodation: None,
                    meals: None,
                },
            )
            .expect("day added");
        service
            .add_image(
                "coastal-retreat",
                NewTourImage {
                    image: "tours/gallery/dhow.jpg".to_string(),
                    caption: Some("Dhow sailing".to_string()),
                },
            )
            .expect("image added");

        service.delete_tour("coastal-retreat").expect("deleted");

        assert!(store.itinerary_for(created.id).expect("query").is_empty());
        assert!(store.gallery_for(created.id).expect("query").is_empty());
        assert!(matches!(
            service.tour_detail("coastal-retreat"),
            Err(CatalogError::NotFound(_))
        ));
    }
}
