pub mod domain;
pub mod import;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;
pub mod slug;
pub mod views;

pub use domain::{
    Difficulty, ItineraryDay, NewItineraryDay, NewTour, NewTourImage, SlugChange, Tour,
    TourDetail, TourId, TourImage, TourUpdate,
};
pub use import::{CatalogImportError, CatalogImporter};
pub use query::{CatalogQuery, RawTourQuery, TourFilters};
pub use repository::{CatalogError, CatalogRepository, TourDraft};
pub use router::{catalog_router, CatalogSite};
pub use service::CatalogService;
