//! Country report family: ranked country rows for world, continent, and
//! region scopes.

use crate::core::db::Dataset;
use crate::core::error::WorldpopError;
use crate::core::scope::ScopeSelector;
use crate::reports::rank::{rank, top_n};
use crate::reports::row::{CountryRow, RawCountry, normalize_country};
use crate::reports::warn_degraded;
use rusqlite::{Connection, params};

const BASE_SELECT: &str = "
    SELECT c.code, c.name, c.continent, c.region, c.population, cap.name
    FROM country c
    LEFT JOIN city cap ON cap.id = c.capital
";

/// Countries in `scope` ordered by population, optionally truncated to the
/// `top` most populous. A data source failure degrades to an empty list;
/// normalization failures propagate.
pub fn country_report(
    dataset: &Dataset,
    scope: &ScopeSelector,
    top: Option<i64>,
) -> Result<Vec<CountryRow>, WorldpopError> {
    match scope {
        ScopeSelector::World | ScopeSelector::Continent(_) | ScopeSelector::Region(_) => {}
        other => {
            return Err(WorldpopError::InvalidParameter(format!(
                "country reports accept world, continent, or region scope, not {other}"
            )));
        }
    }
    let raws = match fetch(dataset, scope) {
        Ok(rows) => rows,
        Err(WorldpopError::DataSourceUnavailable(detail)) => {
            warn_degraded("country report", &detail);
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    let rows = raws
        .into_iter()
        .map(normalize_country)
        .collect::<Result<Vec<_>, _>>()?;
    let ranked = rank(rows, |_| true);
    Ok(match top {
        Some(n) => top_n(ranked, n),
        None => ranked,
    })
}

fn fetch(dataset: &Dataset, scope: &ScopeSelector) -> Result<Vec<RawCountry>, WorldpopError> {
    dataset.with_read(|conn| {
        let (sql, param) = match scope {
            ScopeSelector::World => (BASE_SELECT.to_string(), None),
            ScopeSelector::Continent(name) => {
                (format!("{BASE_SELECT} WHERE c.continent = ?1"), Some(name))
            }
            ScopeSelector::Region(name) => {
                (format!("{BASE_SELECT} WHERE c.region = ?1"), Some(name))
            }
            _ => unreachable!("scope validated by country_report"),
        };
        query_raw(conn, &sql, param.map(String::as_str))
    })
}

fn query_raw(
    conn: &Connection,
    sql: &str,
    param: Option<&str>,
) -> Result<Vec<RawCountry>, rusqlite::Error> {
    let mut stmt = conn.prepare(sql)?;
    let map_row = |row: &rusqlite::Row<'_>| {
        Ok(RawCountry {
            code: row.get(0)?,
            name: row.get(1)?,
            continent: row.get(2)?,
            region: row.get(3)?,
            population: row.get(4)?,
            capital: row.get(5)?,
        })
    };
    match param {
        Some(name) => stmt.query_map(params![name], map_row)?.collect(),
        None => stmt.query_map([], map_row)?.collect(),
    }
}
