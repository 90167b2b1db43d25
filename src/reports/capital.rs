//! Capital report family: ranked capital cities for world, continent, and
//! region scopes. Capital rows are city rows with no district.

use crate::core::db::Dataset;
use crate::core::error::WorldpopError;
use crate::core::scope::ScopeSelector;
use crate::reports::rank::{rank, top_n};
use crate::reports::row::{CityRow, RawCity, normalize_capital};
use crate::reports::warn_degraded;
use rusqlite::{Connection, params};

const BASE_SELECT: &str = "
    SELECT ci.name, co.name, ci.population
    FROM country co
    JOIN city ci ON ci.id = co.capital
";

/// Capitals in `scope` ordered by population, optionally truncated to the
/// `top` most populous.
pub fn capital_report(
    dataset: &Dataset,
    scope: &ScopeSelector,
    top: Option<i64>,
) -> Result<Vec<CityRow>, WorldpopError> {
    match scope {
        ScopeSelector::World | ScopeSelector::Continent(_) | ScopeSelector::Region(_) => {}
        other => {
            return Err(WorldpopError::InvalidParameter(format!(
                "capital reports accept world, continent, or region scope, not {other}"
            )));
        }
    }
    let raws = match fetch(dataset, scope) {
        Ok(rows) => rows,
        Err(WorldpopError::DataSourceUnavailable(detail)) => {
            warn_degraded("capital report", &detail);
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    let rows = raws
        .into_iter()
        .map(normalize_capital)
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
            _ => unreachable!("scope validated by capital_report"),
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
            district: None,
            population: row.get(2)?,
        })
    };
    match param {
        Some(name) => stmt.query_map(params![name], map_row)?.collect(),
        None => stmt.query_map([], map_row)?.collect(),
    }
}
