use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use super::domain::{Difficulty, NewTour, Tour, DEFAULT_MAX_GROUP_SIZE};
use super::repository::{CatalogError, CatalogRepository};
use super::service::CatalogService;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: u64, message: String },
    Catalog { line: u64, source: CatalogError },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog file: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::Row { line, message } => {
                write!(f, "catalog row on line {}: {}", line, message)
            }
            CatalogImportError::Catalog { line, source } => {
                write!(f, "could not store tour from line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Row { .. } => None,
            CatalogImportError::Catalog { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads tours from a CSV export through the regular creation path.
///
/// Expected header:
/// `name,slug,description,duration_days,price,difficulty,max_group_size,featured,image`.
/// `slug`, `max_group_size`, `featured`, and `image` may be left empty.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P, R>(
        path: P,
        catalog: &CatalogService<R>,
    ) -> Result<Vec<Tour>, CatalogImportError>
    where
        P: AsRef<Path>,
        R: CatalogRepository + 'static,
    {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    pub fn from_reader<I, R>(
        reader: I,
        catalog: &CatalogService<R>,
    ) -> Result<Vec<Tour>, CatalogImportError>
    where
        I: Read,
        R: CatalogRepository + 'static,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut created = Vec::new();

        let headers = csv_reader.headers()?.clone();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(csv::Position::line).unwrap_or_default();
            let row: RawTourRow = record.deserialize(Some(&headers))?;
            let tour = row.into_new_tour(line)?;
            let stored = catalog
                .create_tour(tour)
                .map_err(|source| CatalogImportError::Catalog { line, source })?;
            created.push(stored);
        }

        Ok(created)
    }
}

#[derive(Debug, Deserialize)]
struct RawTourRow {
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    slug: Option<String>,
    description: String,
    duration_days: String,
    price: String,
    difficulty: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max_group_size: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    featured: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    image: Option<String>,
}

impl RawTourRow {
    fn into_new_tour(self, line: u64) -> Result<NewTour, CatalogImportError> {
        let row_error = |message: String| CatalogImportError::Row { line, message };

        let duration_days = self.duration_days.parse::<u32>().map_err(|_| {
            row_error(format!(
                "duration_days '{}' is not a whole number",
                self.duration_days
            ))
        })?;
        let price = Decimal::from_str(&self.price)
            .map_err(|_| row_error(format!("price '{}' is not a decimal", self.price)))?;
        let difficulty = Difficulty::from_str(&self.difficulty.to_ascii_lowercase())
            .map_err(|err| row_error(err.to_string()))?;
        let max_group_size = match self.max_group_size {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| row_error(format!("max_group_size '{raw}' is not a whole number")))?,
            None => DEFAULT_MAX_GROUP_SIZE,
        };
        let featured = match self.featured.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("false" | "no" | "0") => false,
            Some("true" | "yes" | "1") => true,
            Some(other) => return Err(row_error(format!("featured '{other}' is not a boolean"))),
        };

        Ok(NewTour {
            name: self.name,
            slug: self.slug,
            description: self.description,
            duration_days,
            price,
            difficulty,
            max_group_size,
            image: self.image,
            featured,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
