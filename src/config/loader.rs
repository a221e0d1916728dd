//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tracker
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};

use super::types::{RateConfig, TrackerConfig, TrackerSettings};

/// Loads and provides access to tracker configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── tracker.yaml        # Currency, threshold, premium, grouping, bind address
/// └── rates/
///     └── 2025-01-01.yaml # Hourly rate effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use overwork_tracker::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// println!("Hourly rate: {}", loader.config().hourly_rate(date)?);
/// # Ok::<(), overwork_tracker::error::TrackerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TrackerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::ConfigNotFound`] if `tracker.yaml` or the `rates`
    ///   directory is missing, or the directory holds no rate files
    /// - [`TrackerError::ConfigParseError`] if a file is not valid YAML or
    ///   holds values the tracker cannot work with
    pub fn load<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("tracker.yaml");
        let settings = Self::load_yaml::<TrackerSettings>(&settings_path)?;
        Self::validate_settings(&settings, &settings_path)?;

        let rates_dir = path.join("rates");
        let rates = Self::load_rates(&rates_dir)?;

        Ok(Self {
            config: TrackerConfig::new(settings, rates),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> TrackerResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| TrackerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| TrackerError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_settings(settings: &TrackerSettings, path: &Path) -> TrackerResult<()> {
        let invalid = |message: String| TrackerError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        if settings.daily_threshold_hours == 0 {
            return Err(invalid("daily_threshold_hours must be positive".to_string()));
        }
        if settings.overwork_premium < Decimal::ZERO {
            return Err(invalid(format!(
                "overwork_premium must not be negative, got {}",
                settings.overwork_premium
            )));
        }
        if settings.currency.trim().is_empty() {
            return Err(invalid("currency must not be empty".to_string()));
        }
        Ok(())
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> TrackerResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(TrackerError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| TrackerError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| TrackerError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let rate_config = Self::load_yaml::<RateConfig>(&path)?;
                if rate_config.hourly_rate < Decimal::ZERO {
                    return Err(TrackerError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!(
                            "hourly_rate must not be negative, got {}",
                            rate_config.hourly_rate
                        ),
                    });
                }
                rates.push(rate_config);
            }
        }

        if rates.is_empty() {
            return Err(TrackerError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying tracker configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
