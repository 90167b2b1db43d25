//! worldpop: demographic reporting and ranking over the world dataset.
//!
//! The engine normalizes raw country/city/language tuples into canonical
//! rows, orders them deterministically (population descending, collated name
//! ascending tie-break), derives city/non-city rollups and world-language
//! shares, and renders every report as CSV or JSON records.
//!
//! # Crate structure
//!
//! - [`core`]: error taxonomy, dataset access, schema DDL, scope selectors
//! - [`reports`]: row normalization, ranking, aggregation, rendering, and
//!   the per-family report services

pub mod core;
pub mod reports;

use crate::core::db::{self, Dataset};
use crate::core::error::WorldpopError;
use crate::core::schemas;
use crate::core::scope::{LookupLevel, RollupLevel, ScopeSelector};
use crate::reports::render::{self, ReportFormat};
use crate::reports::{capital, city, country, language, population};

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(
    name = "worldpop",
    version = env!("CARGO_PKG_VERSION"),
    about = "Demographic reporting and ranking over the world dataset"
)]
struct Cli {
    /// Dataset file (falls back to $WORLDPOP_DB, then ./world.db).
    #[clap(long, global = true)]
    db: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the dataset schema
    #[clap(name = "init")]
    Init {
        /// Replace an existing dataset file.
        #[clap(long)]
        force: bool,
    },

    /// Ranked and aggregate reports
    #[clap(name = "report", visible_alias = "r")]
    Report(ReportCli),

    /// Population of a single named entity
    #[clap(name = "lookup", visible_alias = "l")]
    Lookup {
        /// Hierarchy level: continent, region, country, district, or city.
        #[clap(long)]
        level: String,
        #[clap(long)]
        name: String,
        /// Output format: 'csv' or 'json'.
        #[clap(long, default_value = "csv")]
        format: String,
    },
}

#[derive(clap::Args, Debug)]
struct ReportCli {
    #[clap(subcommand)]
    command: ReportCommand,
}

#[derive(clap::Args, Debug)]
struct ScopeArgs {
    /// Restrict to one continent.
    #[clap(long)]
    continent: Option<String>,
    /// Restrict to one region.
    #[clap(long)]
    region: Option<String>,
    /// Restrict to one country.
    #[clap(long)]
    country: Option<String>,
    /// Restrict to one district.
    #[clap(long)]
    district: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Countries ordered by population
    Country {
        #[clap(flatten)]
        scope: ScopeArgs,
        /// Keep only the N most populous rows.
        #[clap(long)]
        top: Option<i64>,
        /// Output format: 'csv' or 'json'.
        #[clap(long, default_value = "csv")]
        format: String,
    },

    /// Cities ordered by population
    City {
        #[clap(flatten)]
        scope: ScopeArgs,
        /// Keep only the N most populous rows.
        #[clap(long)]
        top: Option<i64>,
        /// Output format: 'csv' or 'json'.
        #[clap(long, default_value = "csv")]
        format: String,
    },

    /// Capital cities ordered by population
    Capital {
        #[clap(flatten)]
        scope: ScopeArgs,
        /// Keep only the N most populous rows.
        #[clap(long)]
        top: Option<i64>,
        /// Output format: 'csv' or 'json'.
        #[clap(long, default_value = "csv")]
        format: String,
    },

    /// Population living in vs. outside cities
    Rollup {
        /// Rollup level: continent, region, or country.
        #[clap(long)]
        level: String,
        /// Output format: 'csv' or 'json'.
        #[clap(long, default_value = "csv")]
        format: String,
    },

    /// Total world population
    World {
        /// Output format: 'csv' or 'json'.
        #[clap(long, default_value = "csv")]
        format: String,
    },

    /// Speaker counts for the fixed world-language set
    Language {
        /// Output format: 'csv' or 'json'.
        #[clap(long, default_value = "csv")]
        format: String,
    },
}

pub fn run() -> Result<(), WorldpopError> {
    let cli = Cli::parse();
    let dataset_path = resolve_dataset_path(cli.db);

    match cli.command {
        Command::Init { force } => run_init(&dataset_path, force),
        Command::Report(report_cli) => run_report(&Dataset::new(dataset_path), report_cli),
        Command::Lookup {
            level,
            name,
            format,
        } => {
            let level: LookupLevel = level.parse()?;
            let format: ReportFormat = format.parse()?;
            let row = population::lookup(&Dataset::new(dataset_path), level, &name)?;
            match format {
                ReportFormat::Csv => print!("{}", render::lookup_csv(&row)),
                ReportFormat::Json => println!("{}", render::json_record(&row)?),
            }
            Ok(())
        }
    }
}

fn resolve_dataset_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("WORLDPOP_DB").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(schemas::DATASET_DB_NAME))
}

fn run_init(path: &Path, force: bool) -> Result<(), WorldpopError> {
    if path.exists() {
        if !force {
            println!(
                "{} dataset already exists at {} (use --force to replace it)",
                "✓".bright_green(),
                path.display()
            );
            return Ok(());
        }
        std::fs::remove_file(path).map_err(WorldpopError::IoError)?;
    }
    db::initialize_dataset(path)?;
    println!(
        "{} dataset initialized at {}",
        "●".bright_green(),
        path.display()
    );
    Ok(())
}

fn run_report(dataset: &Dataset, report_cli: ReportCli) -> Result<(), WorldpopError> {
    match report_cli.command {
        ReportCommand::Country { scope, top, format } => {
            let scope =
                ScopeSelector::from_flags(scope.continent, scope.region, scope.country, scope.district)?;
            let format: ReportFormat = format.parse()?;
            let rows = country::country_report(dataset, &scope, top)?;
            match format {
                ReportFormat::Csv => print!("{}", render::countries_csv(&rows)),
                ReportFormat::Json => println!("{}", render::json_records(&rows)?),
            }
            Ok(())
        }
        ReportCommand::City { scope, top, format } => {
            let scope =
                ScopeSelector::from_flags(scope.continent, scope.region, scope.country, scope.district)?;
            let format: ReportFormat = format.parse()?;
            let rows = city::city_report(dataset, &scope, top)?;
            match format {
                ReportFormat::Csv => print!("{}", render::cities_csv(&rows)),
                ReportFormat::Json => println!("{}", render::json_records(&rows)?),
            }
            Ok(())
        }
        ReportCommand::Capital { scope, top, format } => {
            let scope =
                ScopeSelector::from_flags(scope.continent, scope.region, scope.country, scope.district)?;
            let format: ReportFormat = format.parse()?;
            let rows = capital::capital_report(dataset, &scope, top)?;
            match format {
                ReportFormat::Csv => print!("{}", render::capitals_csv(&rows)),
                ReportFormat::Json => println!("{}", render::capital_records(&rows)?),
            }
            Ok(())
        }
        ReportCommand::Rollup { level, format } => {
            let level: RollupLevel = level.parse()?;
            let format: ReportFormat = format.parse()?;
            let rows = population::rollup_report(dataset, level)?;
            match format {
                ReportFormat::Csv => print!("{}", render::rollups_csv(&rows)),
                ReportFormat::Json => println!("{}", render::json_records(&rows)?),
            }
            Ok(())
        }
        ReportCommand::World { format } => {
            let format: ReportFormat = format.parse()?;
            let row = population::world_population(dataset)?;
            match format {
                ReportFormat::Csv => print!("{}", render::world_population_csv(&row)),
                ReportFormat::Json => println!("{}", render::json_record(&row)?),
            }
            Ok(())
        }
        ReportCommand::Language { format } => {
            let format: ReportFormat = format.parse()?;
            let rows = language::language_report(dataset)?;
            match format {
                ReportFormat::Csv => print!("{}", render::languages_csv(&rows)),
                ReportFormat::Json => println!("{}", render::json_records(&rows)?),
            }
            Ok(())
        }
    }
}
