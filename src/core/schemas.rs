//! Centralized schema definitions for the world dataset.
//!
//! Three tables: `country` holds one row per country with an optional
//! capital city id, `city` holds one row per city keyed back to its country,
//! and `country_language` holds per-country speaker percentages.

pub const DATASET_DB_NAME: &str = "world.db";

pub const COUNTRY_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS country (
        code TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        continent TEXT NOT NULL,
        region TEXT NOT NULL,
        population INTEGER NOT NULL,
        capital INTEGER
    )
";

pub const CITY_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS city (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        country_code TEXT NOT NULL,
        district TEXT,
        population INTEGER NOT NULL,
        FOREIGN KEY(country_code) REFERENCES country(code)
    )
";

pub const COUNTRY_LANGUAGE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS country_language (
        country_code TEXT NOT NULL,
        language TEXT NOT NULL,
        is_official INTEGER NOT NULL DEFAULT 0,
        percentage REAL NOT NULL DEFAULT 0.0,
        PRIMARY KEY(country_code, language),
        FOREIGN KEY(country_code) REFERENCES country(code)
    )
";

pub const CITY_COUNTRY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_city_country ON city(country_code)";

pub const LANGUAGE_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_language_name ON country_language(language)";
