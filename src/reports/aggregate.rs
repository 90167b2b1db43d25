//! Aggregate rows: city/non-city rollups, single-entity lookups, and the
//! fixed world-language shares.
//!
//! These rows are derived from aggregate computation rather than raw
//! authoritative data, so negative inputs are clamped to zero instead of
//! rejected. None of these operations can fail on their own.

use serde::Serialize;

/// The fixed language set, in report declaration order. The language report
/// follows this order, not population order.
pub const WORLD_LANGUAGES: [&str; 5] = ["Chinese", "English", "Hindi", "Spanish", "Arabic"];

/// Population split into city and non-city portions with percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationRollupRow {
    pub name: String,
    pub total_population: u64,
    pub city_population: u64,
    pub non_city_population: u64,
    pub city_population_percent: f64,
    pub non_city_population_percent: f64,
}

impl PopulationRollupRow {
    /// Derive a rollup from raw totals. Inputs are clamped to zero before
    /// any arithmetic; percentages are 0.0 for a zero total and always stay
    /// within [0, 100]. Rounding is the Rendering Layer's concern.
    pub fn from_totals(name: &str, total: i64, city: i64) -> Self {
        let total = total.max(0) as u64;
        let city = city.max(0) as u64;
        let non_city = total.saturating_sub(city);
        let (city_pct, non_city_pct) = if total > 0 {
            (
                (city as f64 * 100.0 / total as f64).clamp(0.0, 100.0),
                (non_city as f64 * 100.0 / total as f64).clamp(0.0, 100.0),
            )
        } else {
            (0.0, 0.0)
        };
        Self {
            name: name.to_string(),
            total_population: total,
            city_population: city,
            non_city_population: non_city,
            city_population_percent: city_pct,
            non_city_population_percent: non_city_pct,
        }
    }
}

/// Population of one named entity at one hierarchy level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulationLookupRow {
    pub name: String,
    pub population: u64,
}

impl PopulationLookupRow {
    /// Blank or missing names become the literal "unknown"; negative
    /// populations clamp to zero.
    pub fn new(name: Option<&str>, population: i64) -> Self {
        let trimmed = name.map(str::trim).unwrap_or("");
        Self {
            name: if trimmed.is_empty() {
                "unknown".to_string()
            } else {
                trimmed.to_string()
            },
            population: population.max(0) as u64,
        }
    }
}

/// Speaker count for one language as a share of world population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguagePopulationRow {
    pub language: String,
    pub speakers: u64,
    pub world_population_percent: f64,
}

impl LanguagePopulationRow {
    /// Percent is 0.0 whenever the world denominator is non-positive, and
    /// stays within [0, 100].
    pub fn new(language: Option<&str>, speakers: i64, world_population: i64) -> Self {
        let trimmed = language.map(str::trim).unwrap_or("");
        let speakers = speakers.max(0) as u64;
        let percent = if speakers > 0 && world_population > 0 {
            (speakers as f64 * 100.0 / world_population as f64).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            language: if trimmed.is_empty() {
                "unknown".to_string()
            } else {
                trimmed.to_string()
            },
            speakers,
            world_population_percent: percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollup_splits_total_into_city_and_non_city() {
        let row = PopulationRollupRow::from_totals("TestRegion", 1000, 250);
        assert_eq!(row.total_population, 1000);
        assert_eq!(row.city_population, 250);
        assert_eq!(row.non_city_population, 750);
        assert_eq!(row.city_population_percent, 25.0);
        assert_eq!(row.non_city_population_percent, 75.0);
    }

    #[test]
    fn rollup_zero_total_has_zero_percentages() {
        let row = PopulationRollupRow::from_totals("Empty", 0, 0);
        assert_eq!(row.total_population, 0);
        assert_eq!(row.city_population, 0);
        assert_eq!(row.non_city_population, 0);
        assert_eq!(row.city_population_percent, 0.0);
        assert_eq!(row.non_city_population_percent, 0.0);
    }

    #[test]
    fn rollup_clamps_negative_inputs() {
        let row = PopulationRollupRow::from_totals("Negative", -10, -5);
        assert_eq!(row.total_population, 0);
        assert_eq!(row.city_population, 0);
        assert_eq!(row.non_city_population, 0);
        assert_eq!(row.city_population_percent, 0.0);
        assert_eq!(row.non_city_population_percent, 0.0);
    }

    #[test]
    fn rollup_city_exceeding_total_stays_within_bounds() {
        let row = PopulationRollupRow::from_totals("Dirty", 100, 150);
        assert_eq!(row.non_city_population, 0);
        assert_eq!(row.city_population_percent, 100.0);
        assert_eq!(row.non_city_population_percent, 0.0);
    }

    #[test]
    fn lookup_defaults_blank_names_to_unknown() {
        let row = PopulationLookupRow::new(Some("   "), 42);
        assert_eq!(row.name, "unknown");
        assert_eq!(row.population, 42);
        let row = PopulationLookupRow::new(None, 42);
        assert_eq!(row.name, "unknown");
    }

    #[test]
    fn lookup_clamps_negative_population() {
        let row = PopulationLookupRow::new(Some("Somewhere"), -10);
        assert_eq!(row.population, 0);
    }

    #[test]
    fn language_percent_is_zero_for_zero_world_population() {
        let row = LanguagePopulationRow::new(Some("Chinese"), 1_000_000, 0);
        assert_eq!(row.world_population_percent, 0.0);
        assert_eq!(row.speakers, 1_000_000);
    }

    #[test]
    fn language_clamps_negative_speakers() {
        let row = LanguagePopulationRow::new(Some("English"), -5, 1_000);
        assert_eq!(row.speakers, 0);
        assert_eq!(row.world_population_percent, 0.0);
    }

    #[test]
    fn language_defaults_blank_names_to_unknown() {
        let row = LanguagePopulationRow::new(Some(""), 10, 100);
        assert_eq!(row.language, "unknown");
        assert_eq!(row.world_population_percent, 10.0);
    }

    #[test]
    fn world_language_set_order_is_fixed() {
        assert_eq!(
            WORLD_LANGUAGES,
            ["Chinese", "English", "Hindi", "Spanish", "Arabic"]
        );
    }
}
