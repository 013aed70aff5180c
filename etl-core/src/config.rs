use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Top-level configuration stored on disk.
///
/// Everything here is optional: CLI arguments override the file, and the
/// binary falls back to built-in defaults when neither is present.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Path of the SQLite database file.
    pub database: Option<PathBuf>,

    /// Default locations to process when none are given on the command line.
    #[serde(default)]
    pub locations: Vec<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-etl", "weather-etl")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_empty() {
        let cfg = Config::default();
        assert!(cfg.database.is_none());
        assert!(cfg.locations.is_empty());
    }

    #[test]
    fn parses_a_full_config_file() {
        let cfg: Config = toml::from_str(
            r#"
            database = "/var/lib/weather/weather_data.db"
            locations = ["Paris", "Lyon"]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.database, Some(PathBuf::from("/var/lib/weather/weather_data.db")));
        assert_eq!(cfg.locations, vec!["Paris", "Lyon"]);
    }

    #[test]
    fn locations_key_is_optional() {
        let cfg: Config = toml::from_str(r#"database = "weather.db""#).unwrap();
        assert!(cfg.locations.is_empty());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config {
            database: Some(PathBuf::from("weather_data.db")),
            locations: vec!["Biarritz".to_string()],
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();

        assert_eq!(back.database, cfg.database);
        assert_eq!(back.locations, cfg.locations);
    }
}
