//! Session configuration.
//!
//! Everything has a compiled-in default. The binary overrides it from the
//! environment (optionally populated from a `.env` file):
//!
//! - `GIFT_START_DATE`: first day of the timeline, `YYYY-MM-DD`
//! - `GIFT_SEED`: seed for the tree generator, a `u64`

use crate::content;
use chrono::{Local, NaiveDate};
use thiserror::Error;

pub const START_DATE_VAR: &str = "GIFT_START_DATE";
pub const SEED_VAR: &str = "GIFT_SEED";

/// Errors from reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid YYYY-MM-DD date: {value:?}")]
    InvalidDate { var: &'static str, value: String },

    #[error("{var} is not a valid unsigned integer: {value:?}")]
    InvalidSeed { var: &'static str, value: String },
}

/// Configuration for a gift session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldConfig {
    /// First day of the shared timeline.
    pub start_date: NaiveDate,

    /// Tree generator seed; a fresh tree every run when unset.
    pub seed: Option<u64>,

    /// Fixed "today", for reproducible day counts.
    pub today: Option<NaiveDate>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldConfig {
    pub fn new() -> Self {
        Self {
            start_date: content::start_date(),
            seed: None,
            today: None,
        }
    }

    /// Set the first day of the timeline.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    /// Seed the tree generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pin the current date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The pinned date, or the local calendar date.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read overrides through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        let read = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(value) = read(START_DATE_VAR) {
            let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
                ConfigError::InvalidDate {
                    var: START_DATE_VAR,
                    value: value.clone(),
                }
            })?;
            config = config.with_start_date(date);
        }

        if let Some(value) = read(SEED_VAR) {
            let seed = value.parse::<u64>().map_err(|_| ConfigError::InvalidSeed {
                var: SEED_VAR,
                value: value.clone(),
            })?;
            config = config.with_seed(seed);
        }

        Ok(config)
    }
}
