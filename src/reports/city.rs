//! City report family: ranked city rows for every scope level.

use crate::core::db::Dataset;
use crate::core::error::WorldpopError;
use crate::core::scope::ScopeSelector;
use crate::reports::rank::{rank, top_n};
use crate::reports::row::{CityRow, RawCity, normalize_city};
use crate::reports::warn_degraded;
use rusqlite::{Connection, params};

const BASE_SELECT: &str = "
    SELECT ci.name, co.name, ci.district, ci.population
    FROM city ci
    JOIN country co ON co.code = ci.country_code
";

/// Cities in `scope` ordered by population, optionally truncated to the
/// `top` most populous.
pub fn city_report(
    dataset: &Dataset,
    scope: &ScopeSelector,
    top: Option<i64>,
) -> Result<Vec<CityRow>, WorldpopError> {
    let raws = match fetch(dataset, scope) {
        Ok(rows) => rows,
        Err(WorldpopError::DataSourceUnavailable(detail)) => {
            warn_degraded("city report", &detail);
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    let rows = raws
        .into_iter()
        .map(normalize_city)
        .collect::<Result<Vec<_>, _>>()?;
    let ranked = rank(rows, |_| true);
    Ok(match top {
        Some(n) => top_n(ranked, n),
        None => ranked,
    })
}

fn fetch(dataset: &Dataset, scope: &ScopeSelector) -> Result<Vec<RawCity>, WorldpopError> {
    dataset.with_read(|conn| {
        let (sql, param) = match scope {
            ScopeSelector::World => (BASE_SELECT.to_string(), None),
            ScopeSelector::Continent(name) => {
                (format!("{BASE_SELECT} WHERE co.continent = ?1"), Some(name))
            }
            ScopeSelector::Region(name) => {
                (format!("{BASE_SELECT} WHERE co.region = ?1"), Some(name))
            }
            ScopeSelector::Country(name) => {
                (format!("{BASE_SELECT} WHERE co.name = ?1"), Some(name))
            }
            ScopeSelector::District(name) => {
                (format!("{BASE_SELECT} WHERE ci.district = ?1"), Some(name))
            }
        };
        query_raw(conn, &sql, param.map(String::as_str))
    })
}

fn query_raw(
    conn: &Connection,
    sql: &str,
    param: Option<&str>,
) -> Result<Vec<RawCity>, rusqlite::Error> {
    let mut stmt = conn.prepare(sql)?;
    let map_row = |row: &rusqlite::Row<'_>| {
        Ok(RawCity {
            name: row.get(0)?,
            country: row.get(1)?,
            district: row.get(2)?,
            population: row.get(3)?,
        })
    };
    match param {
        Some(name) => stmt.query_map(params![name], map_row)?.collect(),
        None => stmt.query_map([], map_row)?.collect(),
    }
}
