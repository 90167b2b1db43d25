//! Dataset access with per-request scoped connections.
//!
//! A [`Dataset`] holds only the file path. Every read acquires a fresh
//! read-only connection and releases it when the closure returns, on every
//! exit path. No connection handle is shared between requests.

use crate::core::error::WorldpopError;
use crate::core::schemas;
use rusqlite::{Connection, OpenFlags};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Busy timeout for cross-process contention (seconds).
const BUSY_TIMEOUT_SECS: u64 = 5;

/// Handle to a dataset file. Cheap to clone; opens connections on demand.
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
}

impl Dataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Execute a closure with a read-only connection scoped to this call.
    ///
    /// Open and query failures both map to `DataSourceUnavailable`; the
    /// closure itself only ever surfaces `rusqlite` errors, so normalization
    /// failures cannot be misclassified as connectivity failures.
    pub fn with_read<F, R>(&self, f: F) -> Result<R, WorldpopError>
    where
        F: FnOnce(&Connection) -> Result<R, rusqlite::Error>,
    {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            WorldpopError::DataSourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        conn.busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS))
            .map_err(|e| WorldpopError::DataSourceUnavailable(e.to_string()))?;
        f(&conn).map_err(|e| WorldpopError::DataSourceUnavailable(e.to_string()))
    }
}

/// Open a read-write connection with WAL and foreign keys enabled.
pub fn db_connect(path: &Path) -> Result<Connection, WorldpopError> {
    let conn = Connection::open(path)
        .map_err(|e| WorldpopError::DataSourceUnavailable(format!("{}: {}", path.display(), e)))?;
    conn.busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS))
        .map_err(|e| WorldpopError::DataSourceUnavailable(e.to_string()))?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(|e| WorldpopError::DataSourceUnavailable(e.to_string()))?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(|e| WorldpopError::DataSourceUnavailable(e.to_string()))?;
    Ok(conn)
}

/// Create the dataset schema at `path`. Idempotent.
pub fn initialize_dataset(path: &Path) -> Result<(), WorldpopError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(WorldpopError::IoError)?;
        }
    }
    let conn = db_connect(path)?;
    for ddl in [
        schemas::COUNTRY_SCHEMA,
        schemas::CITY_SCHEMA,
        schemas::COUNTRY_LANGUAGE_SCHEMA,
        schemas::CITY_COUNTRY_INDEX,
        schemas::LANGUAGE_NAME_INDEX,
    ] {
        conn.execute(ddl, [])
            .map_err(|e| WorldpopError::DataSourceUnavailable(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn initialize_is_idempotent_and_readable() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("world.db");
        initialize_dataset(&path).expect("first init");
        initialize_dataset(&path).expect("second init");

        let dataset = Dataset::new(&path);
        let count: i64 = dataset
            .with_read(|conn| conn.query_row("SELECT COUNT(*) FROM country", [], |row| row.get(0)))
            .expect("count over empty table");
        assert_eq!(count, 0);
    }

    #[test]
    fn missing_file_is_data_source_unavailable() {
        let tmp = tempdir().expect("tempdir");
        let dataset = Dataset::new(tmp.path().join("absent.db"));
        let err = dataset
            .with_read(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .unwrap_err();
        assert!(matches!(err, WorldpopError::DataSourceUnavailable(_)));
    }
}
