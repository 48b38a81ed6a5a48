//! Driver configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use labyrinth_content::application::loader::{
    LoadedCampaign, load_campaign_from_path, load_campaign_from_str,
};

use crate::error::AppError;

/// Campaign used when `LABYRINTH_CAMPAIGN` is unset.
pub const BUNDLED_CAMPAIGN: &str = include_str!("../campaigns/labyrinth.yaml");

/// Default simulation rate.
pub const DEFAULT_TICK_HZ: u32 = 30;

const MAX_TICK_HZ: u32 = 1000;

/// How log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

/// Settings for the headless driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Campaign file; the bundled campaign when `None`.
    pub campaign_path: Option<PathBuf>,
    /// Ticks per second.
    pub tick_hz: u32,
    /// Log output format.
    pub log_format: LogFormat,
}

impl DriverConfig {
    /// Reads `LABYRINTH_CAMPAIGN`, `LABYRINTH_TICK_HZ` and
    /// `LABYRINTH_LOG_FORMAT`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let campaign_path = lookup("LABYRINTH_CAMPAIGN")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let tick_hz = match lookup("LABYRINTH_TICK_HZ") {
            None => DEFAULT_TICK_HZ,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|hz| (1..=MAX_TICK_HZ).contains(hz))
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "LABYRINTH_TICK_HZ must be between 1 and {MAX_TICK_HZ}, got {raw}"
                    ))
                })?,
        };

        let log_format = match lookup("LABYRINTH_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("" | "json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "LABYRINTH_LOG_FORMAT must be json or pretty, got {other}"
                )));
            }
        };

        Ok(Self {
            campaign_path,
            tick_hz,
            log_format,
        })
    }

    /// Time between ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_hz.max(1)))
    }

    /// Loads the configured campaign, or the bundled one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Campaign` if the campaign cannot be read or fails
    /// validation.
    pub fn load_campaign(&self) -> Result<LoadedCampaign, AppError> {
        let loaded = match &self.campaign_path {
            Some(path) => load_campaign_from_path(path)?,
            None => load_campaign_from_str(BUNDLED_CAMPAIGN)?,
        };
        Ok(loaded)
    }
}
