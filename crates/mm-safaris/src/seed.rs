//! Demo population: the standard twelve-tour catalog plus deterministic
//! sample bookings and contact messages.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::catalog::{CatalogError, CatalogRepository, CatalogService, Difficulty, NewTour, Tour};
use crate::inquiries::domain::{BookingForm, ContactForm};
use crate::inquiries::repository::{InquiryRepository, RepositoryError};
use crate::inquiries::validation::{validate_booking, validate_contact, DATE_FORMAT};

const SAMPLE_BOOKINGS: usize = 15;
const SAMPLE_REQUEST: &str = "Looking forward to an amazing experience!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub tours: usize,
    pub featured_tours: usize,
    pub bookings: usize,
    pub contact_messages: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Inquiry(#[from] RepositoryError),
    #[error("sample record rejected: {0}")]
    Sample(String),
}

struct DemoTour {
    name: &'static str,
    description: &'static str,
    duration_days: u32,
    price: i64,
    difficulty: Difficulty,
    max_group_size: u32,
    featured: bool,
}

const DEMO_TOURS: [DemoTour; 12] = [
    DemoTour {
        name: "Maasai Mara Great Migration Safari",
        description: "Witness one of nature's most spectacular events - the Great Migration. Watch millions of wildebeest, zebras, and gazelles cross the Mara River while predators lie in wait. This 5-day adventure includes luxury tented camps, expert guides, and unforgettable wildlife encounters in Kenya's most famous game reserve.",
        duration_days: 5,
        price: 2850,
        difficulty: Difficulty::Moderate,
        max_group_size: 8,
        featured: true,
    },
    DemoTour {
        name: "Serengeti & Ngorongoro Crater Explorer",
        description: "Experience the best of Tanzania's northern circuit. Explore the vast Serengeti plains teeming with wildlife, then descend into the Ngorongoro Crater, a UNESCO World Heritage Site and home to the Big Five. Includes visits to Olduvai Gorge and traditional Maasai villages.",
        duration_days: 7,
        price: 3500,
        difficulty: Difficulty::Moderate,
        max_group_size: 10,
        featured: true,
    },
    DemoTour {
        name: "Amboseli Elephant Paradise",
        description: "Get up close with Africa's gentle giants against the stunning backdrop of Mount Kilimanjaro. Amboseli National Park is famous for its large elephant herds and breathtaking views. This 3-day safari is perfect for photographers and nature lovers seeking an intimate wildlife experience.",
        duration_days: 3,
        price: 1450,
        difficulty: Difficulty::Easy,
        max_group_size: 12,
        featured: true,
    },
    DemoTour {
        name: "Lake Nakuru Flamingo Spectacle",
        description: "Visit the stunning Lake Nakuru, home to millions of flamingos that turn the lake pink. This 4-day safari also includes game drives where you'll spot rhinos, lions, leopards, and over 450 bird species. Stay in comfortable lodges overlooking the lake.",
        duration_days: 4,
        price: 1850,
        difficulty: Difficulty::Easy,
        max_group_size: 10,
        featured: false,
    },
    DemoTour {
        name: "Samburu Desert Safari Adventure",
        description: "Explore Kenya's rugged northern frontier in Samburu National Reserve. Encounter unique wildlife species found nowhere else in Kenya including the Grevy's zebra, reticulated giraffe, and Somali ostrich. Experience the rich culture of the Samburu people in this off-the-beaten-path adventure.",
        duration_days: 6,
        price: 2650,
        difficulty: Difficulty::Challenging,
        max_group_size: 8,
        featured: false,
    },
    DemoTour {
        name: "Tsavo East & West Discovery",
        description: "Explore Kenya's largest national park system, famous for its red elephants and dramatic landscapes. Visit Mzima Springs with its underwater hippo viewing chamber, and search for the legendary \"Man-Eaters of Tsavo\". A perfect safari for adventurous spirits.",
        duration_days: 5,
        price: 2200,
        difficulty: Difficulty::Moderate,
        max_group_size: 10,
        featured: false,
    },
    DemoTour {
        name: "Mount Kenya Wilderness Trek",
        description: "Combine safari with adventure on this unique trek through Mount Kenya National Park. Hike through pristine mountain forests, spot rare mountain wildlife, and enjoy spectacular alpine scenery. This challenging expedition is ideal for active travelers seeking something different.",
        duration_days: 8,
        price: 3200,
        difficulty: Difficulty::Challenging,
        max_group_size: 6,
        featured: false,
    },
    DemoTour {
        name: "Gorilla Trekking Uganda Experience",
        description: "An unforgettable journey to meet mountain gorillas in their natural habitat in Bwindi Impenetrable Forest. This once-in-a-lifetime experience includes guided treks through dense jungle, luxury lodge accommodation, and the chance to observe these magnificent primates up close.",
        duration_days: 6,
        price: 4500,
        difficulty: Difficulty::Challenging,
        max_group_size: 8,
        featured: false,
    },
    DemoTour {
        name: "Family Safari Adventure",
        description: "Specially designed for families with children. Enjoy game drives in comfortable vehicles, stay in family-friendly lodges with swimming pools, and participate in educational wildlife programs. Visit animal orphanages and learn about conservation efforts. Perfect introduction to safari for young adventurers.",
        duration_days: 5,
        price: 1950,
        difficulty: Difficulty::Easy,
        max_group_size: 15,
        featured: false,
    },
    DemoTour {
        name: "Luxury Honeymoon Safari",
        description: "Celebrate your love in Africa's most romantic settings. Stay in exclusive luxury lodges, enjoy private game drives, sundowners in the bush, and special romantic dinners under the stars. Includes champagne breakfasts, couples spa treatments, and personalized service throughout.",
        duration_days: 7,
        price: 5500,
        difficulty: Difficulty::Easy,
        max_group_size: 4,
        featured: false,
    },
    DemoTour {
        name: "Photography Safari Masterclass",
        description: "Designed for photography enthusiasts, this safari offers extended time at prime wildlife locations during golden hour. Includes professional photography guidance, specially modified vehicles with 360-degree views, and visits to the most photogenic locations in the Maasai Mara.",
        duration_days: 6,
        price: 3800,
        difficulty: Difficulty::Moderate,
        max_group_size: 6,
        featured: false,
    },
    DemoTour {
        name: "Coastal Safari & Beach Retreat",
        description: "The perfect combination of safari and beach relaxation. Start with 4 days of game drives in Tsavo, then unwind on the pristine white sands of the Kenyan coast. Includes snorkeling, dhow sailing, and visits to historic Swahili towns like Lamu or Mombasa.",
        duration_days: 10,
        price: 4200,
        difficulty: Difficulty::Easy,
        max_group_size: 12,
        featured: false,
    },
];

const SAMPLE_TRAVELLERS: [(&str, &str); 12] = [
    ("John Smith", "john.smith@email.com"),
    ("Emma Johnson", "emma.j@email.com"),
    ("Michael Brown", "michael.b@email.com"),
    ("Sarah Davis", "sarah.d@email.com"),
    ("David Wilson", "david.w@email.com"),
    ("Lisa Anderson", "lisa.a@email.com"),
    ("Robert Taylor", "robert.t@email.com"),
    ("Jennifer Martinez", "jennifer.m@email.com"),
    ("William Garcia", "william.g@email.com"),
    ("Emily Rodriguez", "emily.r@email.com"),
    ("James Lee", "james.l@email.com"),
    ("Maria Gonzalez", "maria.g@email.com"),
];

const SAMPLE_MESSAGES: [(&str, &str, &str, &str); 5] = [
    (
        "Alex Thompson",
        "alex.t@email.com",
        "Question about group discounts",
        "Hi, I'm planning a safari for a group of 20 people. Do you offer group discounts? What would be the best tour for a mixed group with different fitness levels?",
    ),
    (
        "Sophie Williams",
        "sophie.w@email.com",
        "Honeymoon safari inquiry",
        "My fiancé and I are getting married in June and would love to book a honeymoon safari. Can you help us plan something special and romantic?",
    ),
    (
        "Marcus Johnson",
        "marcus.j@email.com",
        "Photography equipment",
        "I'm a professional photographer interested in your Photography Safari. What camera equipment do you recommend bringing? Are there any restrictions?",
    ),
    (
        "Rachel Green",
        "rachel.g@email.com",
        "Family safari with young children",
        "We have two children aged 6 and 8. Are your family safaris suitable for kids this age? What safety measures do you have in place?",
    ),
    (
        "Daniel Martinez",
        "daniel.m@email.com",
        "Custom itinerary request",
        "I'm interested in combining the Maasai Mara with a visit to Zanzibar. Can you create a custom 12-day itinerary for us?",
    ),
];

/// The standard catalog, in creation order. The first three are featured.
pub fn demo_tours() -> Vec<NewTour> {
    DEMO_TOURS
        .iter()
        .map(|demo| {
            let tour = NewTour::new(
                demo.name,
                demo.description,
                demo.duration_days,
                Decimal::new(demo.price, 0),
                demo.difficulty,
            )
            .with_max_group_size(demo.max_group_size);
            if demo.featured {
                tour.featured()
            } else {
                tour
            }
        })
        .collect()
}

/// Create the demo catalog through the regular creation path.
pub fn seed_catalog<R>(catalog: &CatalogService<R>) -> Result<Vec<Tour>, CatalogError>
where
    R: CatalogRepository + 'static,
{
    let tours = demo_tours()
        .into_iter()
        .map(|tour| catalog.create_tour(tour))
        .collect::<Result<Vec<_>, _>>()?;
    info!(tours = tours.len(), "demo catalog loaded");
    Ok(tours)
}

/// Store the sample bookings and contact messages directly, without
/// notifications. Preferred dates fall 30 to 180 days after `today`.
pub fn seed_inquiries<I>(
    inquiries: &I,
    tours: &[Tour],
    today: NaiveDate,
) -> Result<(usize, usize), SeedError>
where
    I: InquiryRepository,
{
    let mut bookings = 0;
    if !tours.is_empty() {
        for index in 0..SAMPLE_BOOKINGS {
            let tour = &tours[(index * 5) % tours.len()];
            let (full_name, email) = SAMPLE_TRAVELLERS[(index * 7) % SAMPLE_TRAVELLERS.len()];
            let offset = 30 + ((index as i64) * 37) % 151;
            let form = BookingForm {
                full_name: full_name.to_string(),
                email: email.to_string(),
                phone: format!("+1{}", 2_000_000_000 + (index as u64 * 493_817_771) % 7_999_999_999),
                number_of_people: (1 + (index * 5) % 6).to_string(),
                preferred_date: (today + Duration::days(offset)).format(DATE_FORMAT).to_string(),
                special_requests: SAMPLE_REQUEST.to_string(),
            };
            let booking = validate_booking(tour.id, &form)
                .map_err(|errors| SeedError::Sample(errors.to_string()))?;
            inquiries.insert_booking(booking)?;
            bookings += 1;
        }
    }

    let mut messages = 0;
    for (name, email, subject, message) in SAMPLE_MESSAGES {
        let form = ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        };
        let message =
            validate_contact(&form).map_err(|errors| SeedError::Sample(errors.to_string()))?;
        inquiries.insert_contact_message(message)?;
        messages += 1;
    }

    info!(bookings, messages, "sample inquiries loaded");
    Ok((bookings, messages))
}

/// Populate a store that backs both repositories with the full demo data set.
pub fn seed_demo<S>(
    store: std::sync::Arc<S>,
    today: NaiveDate,
) -> Result<SeedSummary, SeedError>
where
    S: CatalogRepository + InquiryRepository + 'static,
{
    let catalog = CatalogService::new(store.clone());
    let tours = seed_catalog(&catalog)?;
    let (bookings, contact_messages) = seed_inquiries(store.as_ref(), &tours, today)?;

    Ok(SeedSummary {
        tours: tours.len(),
        featured_tours: tours.iter().filter(|tour| tour.featured).count(),
        bookings,
        contact_messages,
    })
}
