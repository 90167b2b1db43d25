//! Report rendering: CSV text with fixed per-family headers, and JSON
//! records.
//!
//! Rendering is a pure, order-preserving transform; the same row sequence
//! always produces byte-identical output. CSV quoting follows RFC 4180:
//! a value is quote-wrapped iff it contains a comma, a double quote, LF, or
//! CR, with internal quotes doubled. An absent optional field renders as the
//! empty string, unquoted.

use crate::core::error::WorldpopError;
use crate::reports::aggregate::{LanguagePopulationRow, PopulationLookupRow, PopulationRollupRow};
use crate::reports::row::{CityRow, CountryRow};
use serde::Serialize;
use std::borrow::Cow;
use std::str::FromStr;

/// Output encoding for a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
}

impl FromStr for ReportFormat {
    type Err = WorldpopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(WorldpopError::InvalidParameter(format!(
                "unknown format '{other}' (expected csv or json)"
            ))),
        }
    }
}

pub const COUNTRY_CSV_HEADER: &str = "Code,Name,Continent,Region,Population,Capital";
pub const CITY_CSV_HEADER: &str = "Name,Country,District,Population";
pub const CAPITAL_CSV_HEADER: &str = "Name,Country,Population";
pub const ROLLUP_CSV_HEADER: &str =
    "Name,TotalPopulation,CityPopulation,NonCityPopulation,CityPopulationPercent,NonCityPopulationPercent";
pub const LOOKUP_CSV_HEADER: &str = "Name,Population";
pub const WORLD_CSV_HEADER: &str = "Name,WorldPopulation";
pub const LANGUAGE_CSV_HEADER: &str = "Language,Speakers,WorldPopulationPercent";

/// Quote-wrap a field iff RFC 4180 requires it.
pub fn csv_escape(field: &str) -> Cow<'_, str> {
    let needs_quoting = field
        .chars()
        .any(|c| matches!(c, ',' | '"' | '\n' | '\r'));
    if !needs_quoting {
        return Cow::Borrowed(field);
    }
    let mut quoted = String::with_capacity(field.len() + 2);
    quoted.push('"');
    for c in field.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Two decimal places, `.` separator, round half up. The host locale never
/// influences this.
pub fn format_percent(value: f64) -> String {
    let hundredths = (value * 100.0 + 0.5).floor() as i64;
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

fn push_row(out: &mut String, fields: &[Option<&str>]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if let Some(value) = field {
            out.push_str(&csv_escape(value));
        }
    }
    out.push('\n');
}

pub fn countries_csv(rows: &[CountryRow]) -> String {
    let mut out = String::with_capacity(64 * (rows.len() + 1));
    out.push_str(COUNTRY_CSV_HEADER);
    out.push('\n');
    for row in rows {
        let population = row.population.to_string();
        push_row(
            &mut out,
            &[
                Some(&row.code),
                Some(&row.name),
                Some(&row.continent),
                Some(&row.region),
                Some(&population),
                row.capital.as_deref(),
            ],
        );
    }
    out
}

pub fn cities_csv(rows: &[CityRow]) -> String {
    let mut out = String::with_capacity(48 * (rows.len() + 1));
    out.push_str(CITY_CSV_HEADER);
    out.push('\n');
    for row in rows {
        let population = row.population.to_string();
        push_row(
            &mut out,
            &[
                Some(&row.name),
                Some(&row.country),
                row.district.as_deref(),
                Some(&population),
            ],
        );
    }
    out
}

pub fn capitals_csv(rows: &[CityRow]) -> String {
    let mut out = String::with_capacity(40 * (rows.len() + 1));
    out.push_str(CAPITAL_CSV_HEADER);
    out.push('\n');
    for row in rows {
        let population = row.population.to_string();
        push_row(
            &mut out,
            &[Some(&row.name), Some(&row.country), Some(&population)],
        );
    }
    out
}

pub fn rollups_csv(rows: &[PopulationRollupRow]) -> String {
    let mut out = String::with_capacity(64 * (rows.len() + 1));
    out.push_str(ROLLUP_CSV_HEADER);
    out.push('\n');
    for row in rows {
        let total = row.total_population.to_string();
        let city = row.city_population.to_string();
        let non_city = row.non_city_population.to_string();
        let city_pct = format_percent(row.city_population_percent);
        let non_city_pct = format_percent(row.non_city_population_percent);
        push_row(
            &mut out,
            &[
                Some(&row.name),
                Some(&total),
                Some(&city),
                Some(&non_city),
                Some(&city_pct),
                Some(&non_city_pct),
            ],
        );
    }
    out
}

pub fn lookup_csv(row: &PopulationLookupRow) -> String {
    single_row_csv(LOOKUP_CSV_HEADER, row)
}

/// The world-population report is a lookup row with its own fixed header
/// and the literal name "World".
pub fn world_population_csv(row: &PopulationLookupRow) -> String {
    single_row_csv(WORLD_CSV_HEADER, row)
}

fn single_row_csv(header: &str, row: &PopulationLookupRow) -> String {
    let mut out = String::with_capacity(header.len() + 32);
    out.push_str(header);
    out.push('\n');
    let population = row.population.to_string();
    push_row(&mut out, &[Some(&row.name), Some(&population)]);
    out
}

pub fn languages_csv(rows: &[LanguagePopulationRow]) -> String {
    let mut out = String::with_capacity(40 * (rows.len() + 1));
    out.push_str(LANGUAGE_CSV_HEADER);
    out.push('\n');
    for row in rows {
        let speakers = row.speakers.to_string();
        let percent = format_percent(row.world_population_percent);
        push_row(
            &mut out,
            &[Some(&row.language), Some(&speakers), Some(&percent)],
        );
    }
    out
}

/// One JSON record per row, field names exactly the row's public fields;
/// absent optional fields serialize as explicit null.
pub fn json_records<T: Serialize>(rows: &[T]) -> Result<String, WorldpopError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

pub fn json_record<T: Serialize>(row: &T) -> Result<String, WorldpopError> {
    Ok(serde_json::to_string_pretty(row)?)
}

/// Capital records expose the {name, country, population} subset of the
/// shared city row.
#[derive(Serialize)]
struct CapitalRecord<'a> {
    name: &'a str,
    country: &'a str,
    population: u64,
}

pub fn capital_records(rows: &[CityRow]) -> Result<String, WorldpopError> {
    let records: Vec<CapitalRecord<'_>> = rows
        .iter()
        .map(|row| CapitalRecord {
            name: &row.name,
            country: &row.country,
            population: row.population,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_leaves_plain_fields_alone() {
        assert_eq!(csv_escape("Plain"), "Plain");
    }

    #[test]
    fn escape_quotes_fields_with_commas() {
        assert_eq!(csv_escape("A,B"), "\"A,B\"");
    }

    #[test]
    fn escape_doubles_internal_quotes() {
        let escaped = csv_escape("He said \"Hi\"");
        assert_eq!(escaped, "\"He said \"\"Hi\"\"\"");
        assert!(escaped.contains("\"\"Hi\"\""));
    }

    #[test]
    fn escape_quotes_newlines() {
        assert_eq!(csv_escape("a\nb"), "\"a\nb\"");
        assert_eq!(csv_escape("a\rb"), "\"a\rb\"");
    }

    #[test]
    fn percent_formatting_is_fixed_two_decimals() {
        assert_eq!(format_percent(25.0), "25.00");
        assert_eq!(format_percent(0.0), "0.00");
        assert_eq!(format_percent(100.0), "100.00");
        assert_eq!(format_percent(0.584828), "0.58");
        assert_eq!(format_percent(94.92047), "94.92");
    }

    #[test]
    fn percent_formatting_rounds_half_up() {
        // 0.125 and 0.375 are exact in binary; round-half-even would print
        // 0.12 and 0.38.
        assert_eq!(format_percent(0.125), "0.13");
        assert_eq!(format_percent(0.375), "0.38");
    }

    #[test]
    fn country_csv_renders_missing_capital_as_empty_field() {
        let rows = vec![CountryRow {
            code: "AND".to_string(),
            name: "Andorra".to_string(),
            continent: "Europe".to_string(),
            region: "Southern Europe".to_string(),
            population: 78_000,
            capital: None,
        }];
        assert_eq!(
            countries_csv(&rows),
            "Code,Name,Continent,Region,Population,Capital\nAND,Andorra,Europe,Southern Europe,78000,\n"
        );
    }

    #[test]
    fn city_csv_escapes_quoted_districts() {
        let rows = vec![CityRow {
            name: "Testville".to_string(),
            country: "Testland".to_string(),
            district: Some("North, Upper".to_string()),
            population: 1_000,
        }];
        assert_eq!(
            cities_csv(&rows),
            "Name,Country,District,Population\nTestville,Testland,\"North, Upper\",1000\n"
        );
    }

    #[test]
    fn rollup_csv_uses_fixed_percent_format() {
        let rows = vec![PopulationRollupRow::from_totals("TestRegion", 1000, 250)];
        assert_eq!(
            rollups_csv(&rows),
            "Name,TotalPopulation,CityPopulation,NonCityPopulation,CityPopulationPercent,NonCityPopulationPercent\nTestRegion,1000,250,750,25.00,75.00\n"
        );
    }

    #[test]
    fn world_csv_has_its_own_header() {
        let row = PopulationLookupRow::new(Some("World"), 6_078_749_450);
        assert_eq!(
            world_population_csv(&row),
            "Name,WorldPopulation\nWorld,6078749450\n"
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let rows = vec![CityRow {
            name: "Paris".to_string(),
            country: "France".to_string(),
            district: Some("Île-de-France".to_string()),
            population: 2_125_246,
        }];
        assert_eq!(cities_csv(&rows), cities_csv(&rows));
    }

    #[test]
    fn json_records_serialize_absent_fields_as_null() {
        let rows = vec![CityRow {
            name: "Paris".to_string(),
            country: "France".to_string(),
            district: None,
            population: 2_125_246,
        }];
        let value: serde_json::Value =
            serde_json::from_str(&json_records(&rows).unwrap()).unwrap();
        assert!(value[0]["district"].is_null());
        assert_eq!(value[0]["population"], 2_125_246);
    }

    #[test]
    fn capital_records_expose_only_the_capital_subset() {
        let rows = vec![CityRow {
            name: "Paris".to_string(),
            country: "France".to_string(),
            district: Some("Île-de-France".to_string()),
            population: 2_125_246,
        }];
        let value: serde_json::Value =
            serde_json::from_str(&capital_records(&rows).unwrap()).unwrap();
        assert_eq!(value[0]["name"], "Paris");
        assert!(value[0].get("district").is_none());
    }
}
