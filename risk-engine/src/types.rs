//! Core types for risk engine

use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the transaction originated, relative to the account holder's profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationCategory {
    /// Home region
    Home,
    /// Travel destination already on record
    KnownTravel,
    /// Geo-anomaly
    Anomalous,
    /// High-risk foreign jurisdiction
    HighRiskInternational,
    /// Odd-hour activity from an unexpected place
    LateNightAnomaly,
}

impl LocationCategory {
    /// All categories, in declaration order
    pub const ALL: [LocationCategory; 5] = [
        LocationCategory::Home,
        LocationCategory::KnownTravel,
        LocationCategory::Anomalous,
        LocationCategory::HighRiskInternational,
        LocationCategory::LateNightAnomaly,
    ];

    /// Kebab-case name, as accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationCategory::Home => "home",
            LocationCategory::KnownTravel => "known-travel",
            LocationCategory::Anomalous => "anomalous",
            LocationCategory::HighRiskInternational => "high-risk-international",
            LocationCategory::LateNightAnomaly => "late-night-anomaly",
        }
    }
}

impl fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        LocationCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| Error::InvalidInput(format!("unknown location category '{}'", s)))
    }
}

/// Attributes of a single transaction under evaluation.
///
/// Fields are private so every instance has passed [`TransactionInput::new`]:
/// the amount is non-negative and the hour lies in `0..=23`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTransactionInput")]
pub struct TransactionInput {
    amount: Decimal,
    hour_of_day: u8,
    location_category: LocationCategory,
    sim_swap_flag: bool,
    behavioral_anomaly_flag: bool,
}

impl TransactionInput {
    /// Validate and build a transaction input
    pub fn new(
        amount: Decimal,
        hour_of_day: u8,
        location_category: LocationCategory,
        sim_swap_flag: bool,
        behavioral_anomaly_flag: bool,
    ) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(Error::InvalidInput(format!(
                "amount must be non-negative, got {}",
                amount
            )));
        }

        if hour_of_day > 23 {
            return Err(Error::InvalidInput(format!(
                "hour_of_day must be in 0..=23, got {}",
                hour_of_day
            )));
        }

        Ok(Self {
            amount,
            hour_of_day,
            location_category,
            sim_swap_flag,
            behavioral_anomaly_flag,
        })
    }

    /// Transaction amount in currency units
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Local hour the transaction was initiated
    pub fn hour_of_day(&self) -> u8 {
        self.hour_of_day
    }

    /// Location category
    pub fn location_category(&self) -> LocationCategory {
        self.location_category
    }

    /// Telco reported a recent SIM swap
    pub fn sim_swap_flag(&self) -> bool {
        self.sim_swap_flag
    }

    /// Behavioral analytics flagged the session
    pub fn behavioral_anomaly_flag(&self) -> bool {
        self.behavioral_anomaly_flag
    }
}

#[derive(Deserialize)]
struct RawTransactionInput {
    amount: Decimal,
    hour_of_day: u8,
    location_category: LocationCategory,
    #[serde(default)]
    sim_swap_flag: bool,
    #[serde(default)]
    behavioral_anomaly_flag: bool,
}

impl TryFrom<RawTransactionInput> for TransactionInput {
    type Error = Error;

    fn try_from(raw: RawTransactionInput) -> Result<Self> {
        TransactionInput::new(
            raw.amount,
            raw.hour_of_day,
            raw.location_category,
            raw.sim_swap_flag,
            raw.behavioral_anomaly_flag,
        )
    }
}

/// Risk score (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    /// Highest possible score
    pub const MAX: RiskScore = RiskScore(100);

    /// Create new risk score, clamped to 100
    pub fn new(score: u32) -> Self {
        Self(score.min(100) as u8)
    }

    /// Get raw score
    pub fn score(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RiskScore {
    type Error = Error;

    fn try_from(score: u8) -> Result<Self> {
        if score > 100 {
            return Err(Error::InvalidInput(format!(
                "risk score must be in 0..=100, got {}",
                score
            )));
        }
        Ok(Self(score))
    }
}

impl From<RiskScore> for u8 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// Outcome for the transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Let the transaction through
    Approve,
    /// Require secondary verification before proceeding
    Challenge,
    /// Stop the transaction
    Block,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Decision::Approve => "APPROVE",
            Decision::Challenge => "CHALLENGE",
            Decision::Block => "BLOCK",
        };
        f.write_str(label)
    }
}

/// Rule that fired during scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCode {
    /// Base risk every transaction starts with
    Baseline,
    /// Amount crossed a value tier
    AmountTier,
    /// Initiated during odd hours
    OddHour,
    /// Late-night anomaly on top of odd hours
    LateNightAnomaly,
    /// Geo-anomaly
    AnomalousLocation,
    /// High-risk foreign jurisdiction
    HighRiskInternational,
    /// Behavioral analytics flag
    BehavioralAnomaly,
    /// Large amount into a high-risk jurisdiction
    LaunderingPattern,
    /// Recent SIM swap; replaces every other factor
    SimSwapOverride,
}

/// Contribution of a single rule to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Rule that fired
    pub code: FactorCode,

    /// Points added (for the override, the score it forces)
    pub points: u32,
}

/// Risk assessment result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk score
    pub score: RiskScore,

    /// Decision derived from the score
    pub decision: Decision,

    /// Rules that contributed, in evaluation order
    pub factors: Vec<RiskFactor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_risk_score_clamps() {
        assert_eq!(RiskScore::new(145).score(), 100);
        assert_eq!(RiskScore::new(15).score(), 15);
        assert_eq!(RiskScore::new(u32::MAX), RiskScore::MAX);
    }

    #[test]
    fn test_risk_score_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<RiskScore>("250").is_err());
        assert!(serde_json::from_str::<RiskScore>("101").is_err());
        assert_eq!(serde_json::from_str::<RiskScore>("100").unwrap(), RiskScore::MAX);
        assert_eq!(serde_json::to_string(&RiskScore::new(42)).unwrap(), "42");

        let assessment = serde_json::from_str::<RiskAssessment>(
            r#"{"score":200,"decision":"approve","factors":[]}"#,
        );
        assert!(assessment.is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = TransactionInput::new(dec!(-0.01), 12, LocationCategory::Home, false, false);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_zero_amount_accepted() {
        assert!(TransactionInput::new(Decimal::ZERO, 0, LocationCategory::Home, false, false).is_ok());
    }

    #[test]
    fn test_hour_out_of_range_rejected() {
        assert!(TransactionInput::new(dec!(10), 23, LocationCategory::Home, false, false).is_ok());
        let result = TransactionInput::new(dec!(10), 24, LocationCategory::Home, false, false);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_location_parsing() {
        assert_eq!(
            "High_Risk_International".parse::<LocationCategory>().unwrap(),
            LocationCategory::HighRiskInternational
        );
        assert_eq!(
            " late-night-anomaly ".parse::<LocationCategory>().unwrap(),
            LocationCategory::LateNightAnomaly
        );
        assert!(matches!(
            "moon".parse::<LocationCategory>(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_location_display_roundtrips() {
        for category in LocationCategory::ALL {
            assert_eq!(category.to_string().parse::<LocationCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: TransactionInput = serde_json::from_str(
            r#"{"amount":"5000","hour_of_day":14,"location_category":"home"}"#,
        )
        .unwrap();
        assert_eq!(ok.amount(), dec!(5000));
        assert!(!ok.sim_swap_flag());

        let bad = serde_json::from_str::<TransactionInput>(
            r#"{"amount":"5000","hour_of_day":30,"location_category":"home"}"#,
        );
        assert!(bad.is_err());

        let unknown = serde_json::from_str::<TransactionInput>(
            r#"{"amount":"5000","hour_of_day":3,"location_category":"offworld"}"#,
        );
        assert!(unknown.is_err());
    }
}
