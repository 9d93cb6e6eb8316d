//! Configuration for the risk engine

use crate::{Error, LocationCategory, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Risk engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Scoring rules
    pub scoring: ScoringConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "ulinzi-risk-engine".to_string(),
            scoring: ScoringConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// One cumulative amount tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountTier {
    /// Points apply when the amount is strictly above this
    pub threshold: Decimal,

    /// Points added
    pub points: u32,
}

impl AmountTier {
    fn new(threshold: i64, points: u32) -> Self {
        Self {
            threshold: Decimal::from(threshold),
            points,
        }
    }
}

/// Additive scoring rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score every transaction starts with
    pub base_score: u32,

    /// Cumulative amount tiers, strictly ascending
    pub amount_tiers: Vec<AmountTier>,

    /// Hours strictly below this are odd hours
    pub odd_hours_before: u8,

    /// Hours strictly above this are odd hours
    pub odd_hours_after: u8,

    /// Points for an odd-hour transaction
    pub odd_hour_points: u32,

    /// Extra points for `LateNightAnomaly`, only on top of an odd hour
    pub late_night_anomaly_points: u32,

    /// Points for `Anomalous`
    pub anomalous_location_points: u32,

    /// Points for `HighRiskInternational`
    pub high_risk_international_points: u32,

    /// Points for the behavioral anomaly flag
    pub behavioral_anomaly_points: u32,

    /// Laundering pattern applies strictly above this amount
    pub laundering_amount_threshold: Decimal,

    /// Points for the laundering pattern
    pub laundering_points: u32,

    /// Score forced by a SIM swap
    pub sim_swap_score: u32,

    /// Score-to-decision mapping
    pub thresholds: DecisionThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 15,
            amount_tiers: vec![
                AmountTier::new(50_000, 15),
                AmountTier::new(200_000, 25),
                AmountTier::new(500_000, 35),
            ],
            odd_hours_before: 5,
            odd_hours_after: 23,
            odd_hour_points: 25,
            late_night_anomaly_points: 30,
            anomalous_location_points: 20,
            high_risk_international_points: 35,
            behavioral_anomaly_points: 25,
            laundering_amount_threshold: Decimal::from(300_000),
            laundering_points: 20,
            sim_swap_score: 99,
            thresholds: DecisionThresholds::default(),
        }
    }
}

impl ScoringConfig {
    /// Points contributed by the location alone
    pub fn location_points(&self, location: LocationCategory) -> u32 {
        match location {
            LocationCategory::Anomalous => self.anomalous_location_points,
            LocationCategory::HighRiskInternational => self.high_risk_international_points,
            LocationCategory::Home
            | LocationCategory::KnownTravel
            | LocationCategory::LateNightAnomaly => 0,
        }
    }

    /// Check the rules are internally consistent
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;

        if self.sim_swap_score > 100 {
            return Err(Error::InvalidConfig(format!(
                "sim_swap_score {} exceeds 100",
                self.sim_swap_score
            )));
        }

        for pair in self.amount_tiers.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(Error::InvalidConfig(format!(
                    "amount tiers must be strictly ascending: {} then {}",
                    pair[0].threshold, pair[1].threshold
                )));
            }
        }

        Ok(())
    }
}

/// Upper bounds (inclusive) for each decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionThresholds {
    /// Scores up to and including this approve
    pub approve_max: u8,

    /// Scores up to and including this challenge; above it block
    pub challenge_max: u8,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            approve_max: 50,
            challenge_max: 85,
        }
    }
}

impl DecisionThresholds {
    /// Check ordering and range
    pub fn validate(&self) -> Result<()> {
        if self.approve_max >= self.challenge_max {
            return Err(Error::InvalidConfig(format!(
                "approve_max {} must be below challenge_max {}",
                self.approve_max, self.challenge_max
            )));
        }

        if self.challenge_max > 100 {
            return Err(Error::InvalidConfig(format!(
                "challenge_max {} exceeds 100",
                self.challenge_max
            )));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Check the filter directive parses
    pub fn validate(&self) -> Result<()> {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| Error::Config(format!("invalid log level '{}': {}", self.level, e)))
    }
}

impl Config {
    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.logging.validate()
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(level) = std::env::var("ULINZI_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(json) = std::env::var("ULINZI_LOG_JSON") {
            config.logging.json = parse_env("ULINZI_LOG_JSON", &json)?;
        }

        if let Ok(value) = std::env::var("ULINZI_APPROVE_MAX") {
            config.scoring.thresholds.approve_max = parse_env("ULINZI_APPROVE_MAX", &value)?;
        }

        if let Ok(value) = std::env::var("ULINZI_CHALLENGE_MAX") {
            config.scoring.thresholds.challenge_max = parse_env("ULINZI_CHALLENGE_MAX", &value)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} has invalid value '{}'", key, value)))
}
