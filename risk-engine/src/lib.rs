//! Risk Engine for Ulinzi
//!
//! Rule-based transaction risk scoring for the financial sentinel

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod error;
pub mod types;
pub mod config;
pub mod scoring;
pub mod scenarios;

pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, DecisionThresholds, LoggingConfig, ScoringConfig};
pub use scoring::{assess, decide, RiskScorer};
