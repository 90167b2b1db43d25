//! Speaker totals for the fixed world-language set.
//!
//! Speakers are derived as country population times the per-country speaker
//! percentage. Output follows the set's declaration order, not population
//! order.

use crate::core::db::Dataset;
use crate::core::error::WorldpopError;
use crate::reports::aggregate::{LanguagePopulationRow, WORLD_LANGUAGES};
use crate::reports::warn_degraded;
use rusqlite::params;

const SPEAKERS_SELECT: &str = "
    SELECT CAST(COALESCE(SUM(c.population * cl.percentage / 100.0), 0) AS INTEGER)
    FROM country_language cl
    JOIN country c ON c.code = cl.country_code
    WHERE cl.language = ?1
";

/// One row per fixed language with speaker count and percent of world
/// population. Degrades to an empty list if the data source is unavailable.
pub fn language_report(dataset: &Dataset) -> Result<Vec<LanguagePopulationRow>, WorldpopError> {
    let fetched = dataset.with_read(|conn| {
        let world: Option<i64> =
            conn.query_row("SELECT SUM(population) FROM country", [], |row| row.get(0))?;
        let mut stmt = conn.prepare(SPEAKERS_SELECT)?;
        let mut speakers = Vec::with_capacity(WORLD_LANGUAGES.len());
        for language in WORLD_LANGUAGES {
            let count: i64 = stmt.query_row(params![language], |row| row.get(0))?;
            speakers.push((language, count));
        }
        Ok((world.unwrap_or(0), speakers))
    });
    match fetched {
        Ok((world, speakers)) => Ok(speakers
            .into_iter()
            .map(|(language, count)| LanguagePopulationRow::new(Some(language), count, world))
            .collect()),
        Err(WorldpopError::DataSourceUnavailable(detail)) => {
            warn_degraded("language report", &detail);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
