//! Row normalization: raw tuples into canonical report rows.
//!
//! Raw tuples carry exactly what the dataset returned. Every trimming,
//! blank-field, and sign rule lives here, so the engines downstream only
//! ever see canonical rows. Construction fully succeeds or fails; there is
//! no partially-populated row.

use crate::core::error::WorldpopError;
use serde::Serialize;

/// Raw country tuple as read from the dataset, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawCountry {
    pub code: Option<String>,
    pub name: Option<String>,
    pub continent: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub capital: Option<String>,
}

/// Raw city tuple as read from the dataset, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawCity {
    pub name: Option<String>,
    pub country: Option<String>,
    pub district: Option<String>,
    pub population: i64,
}

/// Canonical country row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRow {
    pub code: String,
    pub name: String,
    pub continent: String,
    pub region: String,
    pub population: u64,
    pub capital: Option<String>,
}

/// Canonical city row, shared by the city and capital report families.
/// Capital rows carry `district: None` and render the
/// {name, country, population} subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityRow {
    pub name: String,
    pub country: String,
    pub district: Option<String>,
    pub population: u64,
}

pub fn normalize_country(raw: RawCountry) -> Result<CountryRow, WorldpopError> {
    Ok(CountryRow {
        code: required("code", raw.code)?,
        name: required("name", raw.name)?,
        continent: required("continent", raw.continent)?,
        region: required("region", raw.region)?,
        population: strict_population("population", raw.population)?,
        capital: optional(raw.capital),
    })
}

pub fn normalize_city(raw: RawCity) -> Result<CityRow, WorldpopError> {
    Ok(CityRow {
        name: required("name", raw.name)?,
        country: required("country", raw.country)?,
        district: optional(raw.district),
        population: strict_population("population", raw.population)?,
    })
}

pub fn normalize_capital(raw: RawCity) -> Result<CityRow, WorldpopError> {
    let mut row = normalize_city(raw)?;
    row.district = None;
    Ok(row)
}

fn required(field: &'static str, value: Option<String>) -> Result<String, WorldpopError> {
    let value = value.ok_or(WorldpopError::MissingField(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WorldpopError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Strict rows reject negative populations outright; clamping is reserved
/// for derived aggregate rows.
fn strict_population(field: &'static str, value: i64) -> Result<u64, WorldpopError> {
    u64::try_from(value).map_err(|_| WorldpopError::InvalidPopulation { field, value })
}
