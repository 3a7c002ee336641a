use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use mm_safaris::catalog::{CatalogImporter, CatalogService, Tour};
use mm_safaris::error::AppError;
use mm_safaris::seed;
use mm_safaris::store::MemoryStore;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Where the tours served at startup come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CatalogSource {
    Csv(PathBuf),
    Demo,
    Empty,
}

impl CatalogSource {
    pub(crate) fn select(catalog_csv: Option<PathBuf>, no_seed: bool) -> Self {
        match catalog_csv {
            Some(path) => Self::Csv(path),
            None if no_seed => Self::Empty,
            None => Self::Demo,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            CatalogSource::Csv(path) => format!("csv:{}", path.display()),
            CatalogSource::Demo => "demo".to_string(),
            CatalogSource::Empty => "empty".to_string(),
        }
    }
}

pub(crate) fn load_catalog(
    store: &Arc<MemoryStore>,
    source: &CatalogSource,
) -> Result<Vec<Tour>, AppError> {
    let catalog = CatalogService::new(Arc::clone(store));
    match source {
        CatalogSource::Csv(path) => Ok(CatalogImporter::from_path(path, &catalog)?),
        CatalogSource::Demo => Ok(seed::seed_catalog(&catalog)?),
        CatalogSource::Empty => Ok(Vec::new()),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
