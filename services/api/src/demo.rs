use crate::infra::{load_catalog, CatalogSource};
use chrono::{Local, NaiveDate};
use clap::Args;
use mm_safaris::catalog::{CatalogQuery, RawTourQuery, Tour, TourFilters};
use mm_safaris::error::AppError;
use mm_safaris::inquiries::{BookingQuery, BookingStatus, InquiryRepository};
use mm_safaris::seed::{self, SeedSummary};
use mm_safaris::store::MemoryStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Keyword matched against tour names and descriptions
    #[arg(long)]
    pub(crate) q: Option<String>,
    /// Difficulty level (easy, moderate, challenging)
    #[arg(long)]
    pub(crate) difficulty: Option<String>,
    /// Upper price bound; a value that is not a number is ignored
    #[arg(long)]
    pub(crate) max_price: Option<String>,
    /// Read tours from a CSV export instead of the bundled demo catalog
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SeedArgs {
    /// Date sample booking dates are counted from (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Also print every sample booking
    #[arg(long)]
    pub(crate) list_bookings: bool,
}

pub(crate) fn run_catalog_listing(args: CatalogArgs) -> Result<(), AppError> {
    let CatalogArgs {
        q,
        difficulty,
        max_price,
        catalog_csv,
    } = args;

    let store = Arc::new(MemoryStore::new());
    let source = CatalogSource::select(catalog_csv, false);
    load_catalog(&store, &source)?;

    let raw = RawTourQuery {
        q,
        difficulty,
        max_price,
    };
    let tours = filtered_catalog(store, &raw)?;

    println!("Safari catalog ({})", source.describe());
    if !TourFilters::from_raw(&raw).is_empty() {
        println!(
            "Filters: q='{}' difficulty='{}' max_price='{}'",
            raw.q.as_deref().unwrap_or_default(),
            raw.difficulty.as_deref().unwrap_or_default(),
            raw.max_price.as_deref().unwrap_or_default()
        );
    }
    println!("{} tour(s)", tours.len());
    for tour in &tours {
        println!("{}", render_tour_line(tour));
    }

    Ok(())
}

pub(crate) fn run_seed_summary(args: SeedArgs) -> Result<(), AppError> {
    let SeedArgs {
        today,
        list_bookings,
    } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let store = Arc::new(MemoryStore::new());
    let summary = seed::seed_demo(Arc::clone(&store), today)?;
    println!("{}", render_summary(&summary));

    let bookings = store
        .bookings(&BookingQuery::default())
        .map_err(seed::SeedError::from)?;
    println!("Bookings by status:");
    for status in BookingStatus::ALL {
        let count = bookings
            .iter()
            .filter(|booking| booking.status == status)
            .count();
        println!("  - {}: {}", status.label(), count);
    }

    if list_bookings {
        println!("Sample bookings:");
        for booking in &bookings {
            println!(
                "  - #{} {} <{}> | {} traveller(s) on {}",
                booking.id,
                booking.full_name,
                booking.email,
                booking.number_of_people,
                booking.preferred_date
            );
        }
    }

    Ok(())
}

fn filtered_catalog(store: Arc<MemoryStore>, raw: &RawTourQuery) -> Result<Vec<Tour>, AppError> {
    let filters = TourFilters::from_raw(raw);
    Ok(CatalogQuery::new(store).list_tours(&filters)?)
}

fn render_tour_line(tour: &Tour) -> String {
    let marker = if tour.featured { "*" } else { "-" };
    format!(
        "{marker} {} [{}] | {} days | ${} | {} | up to {} guests",
        tour.name,
        tour.slug,
        tour.duration_days,
        tour.price,
        tour.difficulty.label(),
        tour.max_group_size
    )
}

fn render_summary(summary: &SeedSummary) -> String {
    format!(
        "Demo data loaded: {} tours ({} featured), {} bookings, {} contact messages",
        summary.tours, summary.featured_tours, summary.bookings, summary.contact_messages
    )
}
