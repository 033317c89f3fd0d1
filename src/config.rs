use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::account::heuristic::ScoringConfig;
use crate::account::status::{StatusBands, REAL_MIN_SCORE, SUSPICIOUS_MIN_SCORE};

/// Default base URL of the account classifier backend.
pub const DEFAULT_ACCOUNT_API_URL: &str = "http://localhost:5000";
/// Default base URL of the energy prediction backend.
pub const DEFAULT_ENERGY_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Nothing
/// here is required: with no backends reachable every command still works
/// in simulation mode.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for `POST /api/analyze` (APPRAISE_ACCOUNT_API_URL)
    pub account_api_url: String,
    /// Base URL for `POST /predict` (APPRAISE_ENERGY_API_URL)
    pub energy_api_url: String,
    /// Per-request HTTP timeout (APPRAISE_TIMEOUT_SECS)
    pub timeout: Duration,
    /// Skip remote calls entirely (APPRAISE_OFFLINE)
    pub offline: bool,
    /// Lower edge of the Real band (APPRAISE_REAL_THRESHOLD)
    pub real_threshold: f64,
    /// Lower edge of the Suspicious band (APPRAISE_SUSPICIOUS_THRESHOLD)
    pub suspicious_threshold: f64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup("APPRAISE_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("APPRAISE_TIMEOUT_SECS must be a whole number, got {v:?}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let offline = lookup("APPRAISE_OFFLINE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let real_threshold = parse_threshold(&lookup, "APPRAISE_REAL_THRESHOLD", REAL_MIN_SCORE)?;
        let suspicious_threshold = parse_threshold(
            &lookup,
            "APPRAISE_SUSPICIOUS_THRESHOLD",
            SUSPICIOUS_MIN_SCORE,
        )?;

        let config = Self {
            account_api_url: lookup("APPRAISE_ACCOUNT_API_URL")
                .unwrap_or_else(|| DEFAULT_ACCOUNT_API_URL.to_string()),
            energy_api_url: lookup("APPRAISE_ENERGY_API_URL")
                .unwrap_or_else(|| DEFAULT_ENERGY_API_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            offline,
            real_threshold,
            suspicious_threshold,
        };

        // Fail early on an inverted or out-of-range band table
        config.scoring()?;
        Ok(config)
    }

    /// Heuristic configuration with the configured status bands.
    pub fn scoring(&self) -> Result<ScoringConfig> {
        Ok(ScoringConfig {
            bands: StatusBands::new(self.real_threshold, self.suspicious_threshold)?,
            ..ScoringConfig::default()
        })
    }
}

fn parse_threshold<F>(lookup: &F, key: &str, default: f64) -> Result<f64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => v
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{key} must be a number, got {v:?}")),
        None => Ok(default),
    }
}
