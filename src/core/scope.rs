//! Typed scope selectors for report queries.
//!
//! Every report family takes an explicit selector variant matched to static
//! SQL; there are no untyped parameter-binding callbacks anywhere in the
//! query path.

use crate::core::error::WorldpopError;
use std::fmt;
use std::str::FromStr;

/// Which slice of the hierarchy a ranked report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeSelector {
    World,
    Continent(String),
    Region(String),
    Country(String),
    District(String),
}

impl ScopeSelector {
    /// Build a selector from mutually exclusive CLI flags. More than one
    /// flag, or a blank scope name, is an `InvalidParameter`.
    pub fn from_flags(
        continent: Option<String>,
        region: Option<String>,
        country: Option<String>,
        district: Option<String>,
    ) -> Result<Self, WorldpopError> {
        let given = [&continent, &region, &country, &district]
            .iter()
            .filter(|flag| flag.is_some())
            .count();
        if given > 1 {
            return Err(WorldpopError::InvalidParameter(
                "at most one of --continent, --region, --country, --district may be given"
                    .to_string(),
            ));
        }
        let checked = |flag: &'static str, value: String| -> Result<String, WorldpopError> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(WorldpopError::InvalidParameter(format!(
                    "{flag} requires a non-blank name"
                )));
            }
            Ok(trimmed.to_string())
        };
        Ok(match (continent, region, country, district) {
            (Some(name), _, _, _) => Self::Continent(checked("--continent", name)?),
            (_, Some(name), _, _) => Self::Region(checked("--region", name)?),
            (_, _, Some(name), _) => Self::Country(checked("--country", name)?),
            (_, _, _, Some(name)) => Self::District(checked("--district", name)?),
            _ => Self::World,
        })
    }
}

impl fmt::Display for ScopeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::World => write!(f, "world scope"),
            Self::Continent(name) => write!(f, "continent '{name}'"),
            Self::Region(name) => write!(f, "region '{name}'"),
            Self::Country(name) => write!(f, "country '{name}'"),
            Self::District(name) => write!(f, "district '{name}'"),
        }
    }
}

/// Hierarchy level for a single-entity population lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupLevel {
    Continent,
    Region,
    Country,
    District,
    City,
}

impl FromStr for LookupLevel {
    type Err = WorldpopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continent" => Ok(Self::Continent),
            "region" => Ok(Self::Region),
            "country" => Ok(Self::Country),
            "district" => Ok(Self::District),
            "city" => Ok(Self::City),
            other => Err(WorldpopError::InvalidParameter(format!(
                "unknown lookup level '{other}' (expected continent, region, country, district, or city)"
            ))),
        }
    }
}

impl fmt::Display for LookupLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Continent => "continent",
            Self::Region => "region",
            Self::Country => "country",
            Self::District => "district",
            Self::City => "city",
        };
        write!(f, "{label}")
    }
}

/// Grouping key for city/non-city population rollups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupLevel {
    Continent,
    Region,
    Country,
}

impl FromStr for RollupLevel {
    type Err = WorldpopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continent" => Ok(Self::Continent),
            "region" => Ok(Self::Region),
            "country" => Ok(Self::Country),
            other => Err(WorldpopError::InvalidParameter(format!(
                "unknown rollup level '{other}' (expected continent, region, or country)"
            ))),
        }
    }
}
