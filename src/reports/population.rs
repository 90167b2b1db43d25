//! Population rollups, single-entity lookups, and the world total.

use crate::core::db::Dataset;
use crate::core::error::WorldpopError;
use crate::core::scope::{LookupLevel, RollupLevel};
use crate::reports::aggregate::{PopulationLookupRow, PopulationRollupRow};
use crate::reports::rank::compare_names;
use crate::reports::warn_degraded;
use rusqlite::params;
use std::collections::HashMap;

/// City vs. non-city population split per continent, region, or country,
/// ordered by collated name. Degrades to an empty list if the data source
/// is unavailable.
pub fn rollup_report(
    dataset: &Dataset,
    level: RollupLevel,
) -> Result<Vec<PopulationRollupRow>, WorldpopError> {
    let key = match level {
        RollupLevel::Continent => "continent",
        RollupLevel::Region => "region",
        RollupLevel::Country => "name",
    };
    let totals_sql = format!(
        "SELECT c.{key}, SUM(c.population) FROM country c GROUP BY c.{key}"
    );
    let city_sql = format!(
        "SELECT c.{key}, SUM(ci.population)
         FROM city ci
         JOIN country c ON c.code = ci.country_code
         GROUP BY c.{key}"
    );
    let fetched = dataset.with_read(|conn| {
        let mut stmt = conn.prepare(&totals_sql)?;
        let totals = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(&city_sql)?;
        let city_totals = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok((totals, city_totals))
    });
    let (totals, city_totals) = match fetched {
        Ok(pair) => pair,
        Err(WorldpopError::DataSourceUnavailable(detail)) => {
            warn_degraded("rollup report", &detail);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };
    let mut rollups: Vec<PopulationRollupRow> = totals
        .into_iter()
        .map(|(name, total)| {
            let city = city_totals.get(&name).copied().unwrap_or(0);
            PopulationRollupRow::from_totals(&name, total, city)
        })
        .collect();
    rollups.sort_by(|a, b| compare_names(&a.name, &b.name));
    Ok(rollups)
}

/// Population of one named entity at one hierarchy level. A name with no
/// match yields a zero-population row; a data source failure degrades to
/// zero as well.
pub fn lookup(
    dataset: &Dataset,
    level: LookupLevel,
    name: &str,
) -> Result<PopulationLookupRow, WorldpopError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Ok(PopulationLookupRow::new(None, 0));
    }
    let sql = match level {
        LookupLevel::Continent => "SELECT SUM(population) FROM country WHERE continent = ?1",
        LookupLevel::Region => "SELECT SUM(population) FROM country WHERE region = ?1",
        LookupLevel::Country => "SELECT SUM(population) FROM country WHERE name = ?1",
        LookupLevel::District => "SELECT SUM(population) FROM city WHERE district = ?1",
        LookupLevel::City => "SELECT SUM(population) FROM city WHERE name = ?1",
    };
    let fetched = dataset
        .with_read(|conn| conn.query_row(sql, params![trimmed], |row| row.get::<_, Option<i64>>(0)));
    let population = match fetched {
        Ok(sum) => sum.unwrap_or(0),
        Err(WorldpopError::DataSourceUnavailable(detail)) => {
            warn_degraded(&format!("{level} lookup"), &detail);
            0
        }
        Err(e) => return Err(e),
    };
    Ok(PopulationLookupRow::new(Some(trimmed), population))
}

/// Total world population as a single row named "World".
pub fn world_population(dataset: &Dataset) -> Result<PopulationLookupRow, WorldpopError> {
    let fetched = dataset.with_read(|conn| {
        conn.query_row("SELECT SUM(population) FROM country", [], |row| {
            row.get::<_, Option<i64>>(0)
        })
    });
    let population = match fetched {
        Ok(sum) => sum.unwrap_or(0),
        Err(WorldpopError::DataSourceUnavailable(detail)) => {
            warn_degraded("world population report", &detail);
            0
        }
        Err(e) => return Err(e),
    };
    Ok(PopulationLookupRow::new(Some("World"), population))
}
