//! Configuration loader for the `tanklevel-dashboard` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::dashboard::DashboardOptions;
use crate::map::DEFAULT_ZOOM;
use crate::models::DEFAULT_PREDICTION_PREFIX;

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_num {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, so every request renders against
/// the same configuration snapshot.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// CSV export of the sensor spreadsheet.
    pub data_file: PathBuf,

    /// Column name prefix of the hourly prediction columns.
    pub prediction_prefix: String,

    /// Initial zoom of the sensor map.
    pub map_zoom: u8,

    /// TCP port the HTTP server listens on.
    pub listen_port: u16,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `DASHBOARD_DATA_FILE` – path to the sensor sheet (CSV)
///
/// Optional:
/// - `PREDICTION_COLUMN_PREFIX` – hourly column prefix (default: `nivel_predict_`)
/// - `MAP_ZOOM` – initial map zoom (default: 17)
/// - `LISTEN_PORT` – HTTP port (default: 8080)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let data_file = PathBuf::from(require_env!("DASHBOARD_DATA_FILE"));
    let prediction_prefix = env::var("PREDICTION_COLUMN_PREFIX")
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PREDICTION_PREFIX.to_string());
    let map_zoom = parse_env_num!("MAP_ZOOM", u8, DEFAULT_ZOOM);
    let listen_port = parse_env_num!("LISTEN_PORT", u16, 8080);

    Ok(Config {
        data_file,
        prediction_prefix,
        map_zoom,
        listen_port,
    })
}

impl Config {
    /// Configuration for a given sheet with every optional value defaulted.
    pub fn with_data_file(data_file: impl Into<PathBuf>) -> Self {
        Config {
            data_file: data_file.into(),
            prediction_prefix: DEFAULT_PREDICTION_PREFIX.to_string(),
            map_zoom: DEFAULT_ZOOM,
            listen_port: 8080,
        }
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            map_zoom: self.map_zoom,
        }
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  DASHBOARD_DATA_FILE      : {}", self.data_file.display());
        tracing::info!("  PREDICTION_COLUMN_PREFIX : {}", self.prediction_prefix);
        tracing::info!("  MAP_ZOOM                 : {}", self.map_zoom);
        tracing::info!("  LISTEN_PORT              : {}", self.listen_port);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_defaults() {
        // ---
        let cfg = Config::with_data_file("data/sensors.csv");
        assert_eq!(cfg.data_file, PathBuf::from("data/sensors.csv"));
        assert_eq!(cfg.prediction_prefix, "nivel_predict_");
        assert_eq!(cfg.dashboard_options().map_zoom, 17);
        assert_eq!(cfg.listen_port, 8080);
    }
}
