use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_QUOTES_URL: &str = "https://bolsar.info/opciones.php";
pub const DEFAULT_TABLE_CLASS: &str = "tabla_cierre";
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
/// Yahoo Finance suffix for Buenos Aires listings.
pub const DEFAULT_TICKER_SUFFIX: &str = ".BA";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("lot_size must be at least 1, got {0}")]
    LotSize(u32),

    #[error("max_percentage_difference {0} outside valid range 0.0..=100.0")]
    MaxPercentage(f64),

    #[error("spot_multiplier {0} outside valid range 1.0..=2.0")]
    SpotMultiplier(f64),

    #[error("timeout_secs must be at least 1")]
    Timeout,
}

/// Parameters of the pair selector and the payoff renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadConfig {
    /// Number of contracts per leg.
    pub lot_size: u32,
    /// Ceiling on the upper leg's price per unit of strike difference, in %.
    pub max_percentage_difference: f64,
    /// Bought-leg strikes above `spot * spot_multiplier` are rejected.
    pub spot_multiplier: f64,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            lot_size: 10,
            max_percentage_difference: 30.0,
            spot_multiplier: 1.05,
        }
    }
}

impl SpreadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lot_size < 1 {
            return Err(ConfigError::LotSize(self.lot_size));
        }
        if !(0.0..=100.0).contains(&self.max_percentage_difference) {
            return Err(ConfigError::MaxPercentage(self.max_percentage_difference));
        }
        if !(1.0..=2.0).contains(&self.spot_multiplier) {
            return Err(ConfigError::SpotMultiplier(self.spot_multiplier));
        }
        Ok(())
    }

    /// Apply optional overrides (CLI flags, form fields) on top of `self`.
    pub fn merged(
        self,
        lot_size: Option<u32>,
        max_percentage_difference: Option<f64>,
        spot_multiplier: Option<f64>,
    ) -> Self {
        Self {
            lot_size: lot_size.unwrap_or(self.lot_size),
            max_percentage_difference: max_percentage_difference
                .unwrap_or(self.max_percentage_difference),
            spot_multiplier: spot_multiplier.unwrap_or(self.spot_multiplier),
        }
    }
}

/// Where quotes and spot prices come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub quotes_url: String,
    /// CSS class of the quote table.
    pub table_class: String,
    pub yahoo_base_url: String,
    pub ticker_suffix: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            quotes_url: DEFAULT_QUOTES_URL.to_string(),
            table_class: DEFAULT_TABLE_CLASS.to_string(),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            ticker_suffix: DEFAULT_TICKER_SUFFIX.to_string(),
            timeout_secs: 30,
            user_agent: concat!("bull-spread/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub spread: SpreadConfig,
    pub source: SourceConfig,
}

impl Settings {
    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    /// Defaults, or the given file when present.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spread.validate()?;
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Timeout);
        }
        Ok(())
    }
}
