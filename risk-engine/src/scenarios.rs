//! Named transaction presets for demos

use crate::{Error, LocationCategory, Result, TransactionInput};
use rust_decimal::Decimal;
use serde::Serialize;

/// A canned transaction with a short story attached
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    /// Lookup key
    pub name: &'static str,

    /// One-line description
    pub description: &'static str,

    /// Transaction to score
    pub input: TransactionInput,
}

struct Preset {
    name: &'static str,
    description: &'static str,
    amount: i64,
    hour_of_day: u8,
    location: LocationCategory,
    sim_swap: bool,
    behavioral: bool,
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "routine-purchase",
        description: "KES 5,000 at 14:00 from the home region",
        amount: 5_000,
        hour_of_day: 14,
        location: LocationCategory::Home,
        sim_swap: false,
        behavioral: false,
    },
    Preset {
        name: "late-night-drain",
        description: "KES 850,000 withdrawal at 03:00 flagged as a late-night anomaly",
        amount: 850_000,
        hour_of_day: 3,
        location: LocationCategory::LateNightAnomaly,
        sim_swap: false,
        behavioral: false,
    },
    Preset {
        name: "sim-swap",
        description: "Small daytime purchase right after a reported SIM swap",
        amount: 5_000,
        hour_of_day: 14,
        location: LocationCategory::Home,
        sim_swap: true,
        behavioral: false,
    },
    Preset {
        name: "offshore-layering",
        description: "KES 600,000 transfer into a high-risk jurisdiction",
        amount: 600_000,
        hour_of_day: 14,
        location: LocationCategory::HighRiskInternational,
        sim_swap: false,
        behavioral: false,
    },
    Preset {
        name: "three-am-anomaly",
        description: "KES 850,000 at 03:01 from Naivasha, SIM swapped 4 hours ago, 150x velocity spike",
        amount: 850_000,
        hour_of_day: 3,
        location: LocationCategory::Anomalous,
        sim_swap: true,
        behavioral: true,
    },
];

impl Preset {
    fn build(&self) -> Result<Scenario> {
        Ok(Scenario {
            name: self.name,
            description: self.description,
            input: TransactionInput::new(
                Decimal::from(self.amount),
                self.hour_of_day,
                self.location,
                self.sim_swap,
                self.behavioral,
            )?,
        })
    }
}

/// Names of all presets
pub fn names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.name)
}

/// All presets
pub fn all() -> Result<Vec<Scenario>> {
    PRESETS.iter().map(Preset::build).collect()
}

/// Look a preset up by name
pub fn find(name: &str) -> Result<Scenario> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| Error::UnknownScenario(name.to_string()))?
        .build()
}
