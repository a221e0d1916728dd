//! Configuration types for the overwork tracker.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{NaiveDate, TimeDelta};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{DEFAULT_DAILY_THRESHOLD_HOURS, DEFAULT_OVERWORK_PREMIUM, DayGrouping};
use crate::error::{TrackerError, TrackerResult};

fn default_threshold_hours() -> u32 {
    DEFAULT_DAILY_THRESHOLD_HOURS as u32
}

fn default_overwork_premium() -> Decimal {
    DEFAULT_OVERWORK_PREMIUM
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// General tracker settings from `tracker.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerSettings {
    /// Human-readable name of this tracker deployment.
    pub name: String,
    /// ISO 4217 currency code amounts are reported in.
    pub currency: String,
    /// Hours of work per day before overwork starts.
    #[serde(default = "default_threshold_hours")]
    pub daily_threshold_hours: u32,
    /// Multiplier of the base rate paid on top for overwork hours.
    #[serde(default = "default_overwork_premium")]
    pub overwork_premium: Decimal,
    /// Which sessions share a calendar day.
    #[serde(default)]
    pub day_grouping: DayGrouping,
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

/// Hourly rate effective from a given date, from `rates/*.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    /// The first date this rate applies to.
    pub effective_date: NaiveDate,
    /// The base hourly rate.
    pub hourly_rate: Decimal,
}

/// The complete tracker configuration.
///
/// # Example
///
/// ```
/// use overwork_tracker::config::{RateConfig, TrackerConfig, TrackerSettings};
/// use overwork_tracker::calculation::DayGrouping;
/// use chrono::{NaiveDate, TimeDelta};
/// use rust_decimal::Decimal;
///
/// let config = TrackerConfig::new(
///     TrackerSettings {
///         name: "Team A".to_string(),
///         currency: "EUR".to_string(),
///         daily_threshold_hours: 9,
///         overwork_premium: Decimal::new(40, 2),
///         day_grouping: DayGrouping::ExactDate,
///         bind_address: "127.0.0.1:3000".to_string(),
///     },
///     vec![RateConfig {
///         effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///         hourly_rate: Decimal::new(3000, 2),
///     }],
/// );
/// assert_eq!(config.threshold(), TimeDelta::hours(9));
/// ```
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    settings: TrackerSettings,
    /// Rate configurations by effective date (sorted oldest first).
    rates: Vec<RateConfig>,
}

impl TrackerConfig {
    /// Creates a new TrackerConfig from its component parts.
    pub fn new(settings: TrackerSettings, rates: Vec<RateConfig>) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            settings,
            rates: sorted_rates,
        }
    }

    /// Returns the general settings.
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Returns all rate configurations, oldest first.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }

    /// The daily overwork threshold as a duration.
    pub fn threshold(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.settings.daily_threshold_hours))
    }

    /// The overwork premium multiplier.
    pub fn overwork_premium(&self) -> Decimal {
        self.settings.overwork_premium
    }

    /// The configured day grouping policy.
    pub fn day_grouping(&self) -> DayGrouping {
        self.settings.day_grouping
    }

    /// The reporting currency.
    pub fn currency(&self) -> &str {
        &self.settings.currency
    }

    /// Gets the hourly rate effective on `date`.
    ///
    /// The most recent rate whose effective date is on or before `date`
    /// applies.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::RateNotFound`] if every configured rate
    /// starts after `date`.
    pub fn hourly_rate(&self, date: NaiveDate) -> TrackerResult<Decimal> {
        self.rates
            .iter()
            .rev()
            .find(|rc| rc.effective_date <= date)
            .map(|rc| rc.hourly_rate)
            .ok_or(TrackerError::RateNotFound { date })
    }
}
