//! Risk scoring engine
//!
//! Additive rule scoring over a [`TransactionInput`]. Rules run in a fixed
//! order, a reported SIM swap replaces the accumulated score outright, and
//! the result is clamped to 100 before being mapped to a [`Decision`].

use crate::config::{DecisionThresholds, ScoringConfig};
use crate::{Decision, FactorCode, LocationCategory, RiskAssessment, RiskFactor, RiskScore, TransactionInput};
use tracing::{debug, warn};

/// Risk scorer
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    config: ScoringConfig,
}

impl RiskScorer {
    /// Create new risk scorer.
    ///
    /// The config is taken as-is; run [`ScoringConfig::validate`] first when
    /// it comes from outside.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Scoring rules in use
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Assess transaction risk
    pub fn assess(&self, input: &TransactionInput) -> RiskAssessment {
        let cfg = &self.config;
        let mut factors = Vec::new();

        if input.sim_swap_flag() {
            warn!(
                amount = %input.amount(),
                "SIM swap reported, overriding risk score to {}",
                cfg.sim_swap_score
            );
            factors.push(RiskFactor {
                code: FactorCode::SimSwapOverride,
                points: cfg.sim_swap_score,
            });
            return self.finish(RiskScore::new(cfg.sim_swap_score), factors);
        }

        let mut add = |code, points| factors.push(RiskFactor { code, points });

        add(FactorCode::Baseline, cfg.base_score);

        for tier in &cfg.amount_tiers {
            if input.amount() > tier.threshold {
                add(FactorCode::AmountTier, tier.points);
            }
        }

        let hour = input.hour_of_day();
        let location = input.location_category();
        if hour < cfg.odd_hours_before || hour > cfg.odd_hours_after {
            add(FactorCode::OddHour, cfg.odd_hour_points);
            // Counted again on top of the odd hour when the category says so.
            if location == LocationCategory::LateNightAnomaly {
                add(FactorCode::LateNightAnomaly, cfg.late_night_anomaly_points);
            }
        }

        match location {
            LocationCategory::Anomalous => {
                add(FactorCode::AnomalousLocation, cfg.location_points(location))
            }
            LocationCategory::HighRiskInternational => {
                add(FactorCode::HighRiskInternational, cfg.location_points(location))
            }
            _ => {}
        }

        if input.behavioral_anomaly_flag() {
            add(FactorCode::BehavioralAnomaly, cfg.behavioral_anomaly_points);
        }

        if input.amount() > cfg.laundering_amount_threshold
            && location == LocationCategory::HighRiskInternational
        {
            add(FactorCode::LaunderingPattern, cfg.laundering_points);
        }

        let raw: u32 = factors.iter().map(|f| f.points).fold(0, u32::saturating_add);
        self.finish(RiskScore::new(raw), factors)
    }

    fn finish(&self, score: RiskScore, factors: Vec<RiskFactor>) -> RiskAssessment {
        let decision = decide(score, &self.config.thresholds);
        debug!(score = score.score(), ?decision, factors = factors.len(), "Risk assessed");
        RiskAssessment {
            score,
            decision,
            factors,
        }
    }
}

/// Map a score onto a decision
pub fn decide(score: RiskScore, thresholds: &DecisionThresholds) -> Decision {
    match score.score() {
        s if s <= thresholds.approve_max => Decision::Approve,
        s if s <= thresholds.challenge_max => Decision::Challenge,
        _ => Decision::Block,
    }
}

/// Assess a transaction with the default rules
pub fn assess(input: &TransactionInput) -> RiskAssessment {
    RiskScorer::default().assess(input)
}
