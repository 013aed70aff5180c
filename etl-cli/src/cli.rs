use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use etl_core::{Config, NominatimGeocoder, OpenMeteoProvider, Pipeline, WeatherStore};

const DEFAULT_DB: &str = "weather_data.db";

/// Used when neither the command line nor the config file names locations.
const DEFAULT_LOCATIONS: &[&str] = &[
    "Paris", "Lyon", "Marseille", "Lille", "Bordeaux", "Toulouse", "Nice", "Nantes",
    "Strasbourg", "Rennes", "Biarritz",
];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-etl",
    version,
    about = "Fetch current weather for a list of locations into a SQLite database"
)]
pub struct Cli {
    /// Location names to process; falls back to the config file, then to a
    /// built-in list.
    pub locations: Vec<String>,

    /// SQLite database file.
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,
}

impl Cli {
    /// Run the pipeline once. Returns `Ok(true)` when every location
    /// succeeded, `Ok(false)` when at least one failed.
    pub async fn run(self) -> Result<bool> {
        let config = Config::load()?;

        let locations: Vec<String> = if !self.locations.is_empty() {
            self.locations
        } else if !config.locations.is_empty() {
            config.locations.clone()
        } else {
            DEFAULT_LOCATIONS.iter().map(|s| (*s).to_string()).collect()
        };

        let db_path = self
            .db
            .or(config.database)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB));

        let store = WeatherStore::open(&db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
        let geocoder = NominatimGeocoder::new()?;
        let provider = OpenMeteoProvider::new()?;

        tracing::info!(
            database = %db_path.display(),
            locations = locations.len(),
            "starting weather ETL run"
        );

        let pipeline = Pipeline::new(Box::new(geocoder), Box::new(provider), store);
        let outcomes = pipeline.run(&locations).await?;

        for outcome in &outcomes {
            println!("{outcome}");
        }

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        if failed > 0 {
            tracing::warn!(failed, total = outcomes.len(), "run finished with failures");
        }

        Ok(failed == 0)
    }
}
