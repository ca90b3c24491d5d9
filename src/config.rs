//! Configuration file handling.
//!
//! Settings come from `wxstation.toml`; every key is optional. Command line
//! arguments are applied on top with [`Config::apply_args`].

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::clock::{TimeFormat, Zone};
use crate::i18n::Language;
use crate::owm::Query;
use crate::units::Units;

/// Forecast entries kept from the 5 day / 3 hour feed.
pub const NUMBER_OF_FORECASTS: usize = 40;

/// Day summaries shown on screen.
pub const NUMBER_OF_DAY_FORECASTS: usize = 4;

/// Longest accepted weather refresh interval (one day).
pub const MAX_UPDATE_INTERVAL_MINUTES: u64 = 24 * 60;

/// Every 3h (UTC); all of them are needed for daily min/max temperatures.
pub const FORECAST_HOURS_UTC: [u32; 8] = [0, 3, 6, 9, 12, 15, 18, 21];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_update_interval")]
    pub update_interval_minutes: u64,

    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            update_interval_minutes: default_update_interval(),
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

fn default_update_interval() -> u64 {
    10
}

fn default_log_file() -> String {
    "wxstation.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// OpenWeatherMap city id.
    #[serde(default = "default_location_id")]
    pub id: String,

    #[serde(default = "default_location_name")]
    pub name: String,

    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            id: default_location_id(),
            name: default_location_name(),
            timezone: default_timezone(),
        }
    }
}

fn default_location_id() -> String {
    "2657896".to_string()
}

fn default_location_name() -> String {
    "Zurich".to_string()
}

fn default_timezone() -> String {
    "local".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub key: String,

    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            language: default_language(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_metric")]
    pub metric: bool,

    /// `08/23/2022 02:55:02 pm` instead of `23.08.2022 14:55:02`.
    #[serde(default)]
    pub us_format: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            metric: default_metric(),
            us_format: false,
        }
    }
}

fn default_metric() -> bool {
    true
}

impl Config {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref location) = args.location {
            self.location.id = location.clone();
        }
        if let Some(ref name) = args.name {
            self.location.name = name.clone();
        }
        if let Some(ref key) = args.api_key {
            self.api.key = key.clone();
        }
        if let Some(ref lang) = args.lang {
            self.api.language = lang.clone();
        }
        if let Some(ref timezone) = args.timezone {
            self.location.timezone = timezone.clone();
        }
        if let Some(interval) = args.interval {
            self.general.update_interval_minutes = interval;
        }
        if args.imperial {
            self.display.metric = false;
        }
        if args.verbose {
            self.general.log_level = "debug".to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.update_interval_minutes == 0 {
            bail!("update_interval_minutes must be at least 1");
        }
        if self.general.update_interval_minutes > MAX_UPDATE_INTERVAL_MINUTES {
            bail!(
                "update_interval_minutes must be at most {}",
                MAX_UPDATE_INTERVAL_MINUTES
            );
        }
        if self.location.id.trim().is_empty() {
            bail!("no location id configured");
        }
        if self.api.key.trim().is_empty() {
            bail!("no OpenWeatherMap API key configured (set [api] key or OWM_API_KEY)");
        }
        self.language()?;
        self.zone()?;
        Ok(())
    }

    pub fn language(&self) -> Result<Language> {
        Language::parse(&self.api.language)
            .with_context(|| format!("Unsupported language: {}", self.api.language))
    }

    pub fn zone(&self) -> Result<Zone> {
        Zone::parse(&self.location.timezone)
            .with_context(|| format!("Invalid timezone: {}", self.location.timezone))
    }

    pub fn units(&self) -> Units {
        Units::from_metric(self.display.metric)
    }

    pub fn time_format(&self) -> TimeFormat {
        TimeFormat::from_us(self.display.us_format)
    }

    pub fn query(&self) -> Result<Query> {
        Ok(Query {
            location_id: self.location.id.clone(),
            api_key: self.api.key.clone(),
            units: self.units(),
            language: self.language()?,
        })
    }
}
