use std::io;
use thiserror::Error;

/// Crate-wide error taxonomy.
///
/// Normalization failures (`MissingField`, `InvalidPopulation`) always
/// propagate to the caller; only `DataSourceUnavailable` may be degraded to
/// an empty or zero result, and only at the report-service boundary. A filter
/// that matches nothing is an empty result, not an error, so there is no
/// not-found variant.
#[derive(Error, Debug)]
pub enum WorldpopError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid population for {field}: {value}")]
    InvalidPopulation { field: &'static str, value: i64 },
    #[error("data source unavailable: {0}")]
    DataSourceUnavailable(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
}
