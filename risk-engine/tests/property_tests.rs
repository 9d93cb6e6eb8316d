//! Property-based tests for scoring invariants
//!
//! - Clamp: every score lies in 0..=100
//! - Override: a SIM swap always yields 99
//! - Monotonicity: a larger amount never lowers the score
//! - Idempotency: same input, same assessment

use proptest::prelude::*;
use rust_decimal::Decimal;
use ulinzi_risk::{
    assess, decide, Decision, DecisionThresholds, LocationCategory, RiskScore, TransactionInput,
};

/// Strategy for generating valid amounts (non-negative, two decimal places)
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (0u64..200_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2)),
        // Land on and around the tier edges often
        prop::sample::select(vec![50_000i64, 200_000, 300_000, 500_000])
            .prop_flat_map(|edge| (edge - 1..=edge + 1).prop_map(Decimal::from)),
    ]
}

/// Strategy for generating location categories
fn location_strategy() -> impl Strategy<Value = LocationCategory> {
    prop::sample::select(LocationCategory::ALL.to_vec())
}

/// Strategy for generating valid transaction inputs
fn input_strategy() -> impl Strategy<Value = TransactionInput> {
    (
        amount_strategy(),
        0u8..=23,
        location_strategy(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(amount, hour, location, sim_swap, behavioral)| {
            TransactionInput::new(amount, hour, location, sim_swap, behavioral).unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: scores never leave 0..=100
    #[test]
    fn prop_score_in_range(input in input_strategy()) {
        let assessment = assess(&input);
        prop_assert!(assessment.score.score() <= 100);
    }

    /// Property: SIM swap dominates every other field
    #[test]
    fn prop_sim_swap_dominates(
        amount in amount_strategy(),
        hour in 0u8..=23,
        location in location_strategy(),
        behavioral in any::<bool>(),
    ) {
        let input = TransactionInput::new(amount, hour, location, true, behavioral).unwrap();
        let assessment = assess(&input);
        prop_assert_eq!(assessment.score.score(), 99);
        prop_assert_eq!(assessment.decision, Decision::Block);
    }

    /// Property: raising the amount never lowers the score
    #[test]
    fn prop_amount_monotonic(
        low in amount_strategy(),
        extra in amount_strategy(),
        hour in 0u8..=23,
        location in location_strategy(),
        sim_swap in any::<bool>(),
        behavioral in any::<bool>(),
    ) {
        let smaller = TransactionInput::new(low, hour, location, sim_swap, behavioral).unwrap();
        let larger = TransactionInput::new(low + extra, hour, location, sim_swap, behavioral).unwrap();
        prop_assert!(assess(&larger).score >= assess(&smaller).score);
    }

    /// Property: assessing twice gives the same answer
    #[test]
    fn prop_idempotent(input in input_strategy()) {
        prop_assert_eq!(assess(&input), assess(&input));
    }

    /// Property: decision agrees with the default thresholds
    #[test]
    fn prop_decision_matches_score(input in input_strategy()) {
        let assessment = assess(&input);
        let expected = match assessment.score.score() {
            0..=50 => Decision::Approve,
            51..=85 => Decision::Challenge,
            _ => Decision::Block,
        };
        prop_assert_eq!(assessment.decision, expected);
        prop_assert_eq!(decide(assessment.score, &DecisionThresholds::default()), expected);
    }

    /// Property: negative amounts are refused at the boundary
    #[test]
    fn prop_negative_amount_rejected(cents in 1i64..100_000_000i64) {
        let result = TransactionInput::new(
            Decimal::new(-cents, 2),
            12,
            LocationCategory::Home,
            false,
            false,
        );
        prop_assert!(result.is_err());
    }
}

#[test]
fn test_reference_scenarios() {
    let cases = [
        (5_000, 14, LocationCategory::Home, false, 15, Decision::Approve),
        (850_000, 3, LocationCategory::LateNightAnomaly, false, 100, Decision::Block),
        (5_000, 14, LocationCategory::Home, true, 99, Decision::Block),
        (600_000, 14, LocationCategory::HighRiskInternational, false, 100, Decision::Block),
    ];

    for (amount, hour, location, sim_swap, score, decision) in cases {
        let input =
            TransactionInput::new(Decimal::from(amount), hour, location, sim_swap, false).unwrap();
        let assessment = assess(&input);
        assert_eq!(assessment.score, RiskScore::new(score));
        assert_eq!(assessment.decision, decision);
    }
}

#[test]
fn test_assessment_serializes_snake_case() {
    let input =
        TransactionInput::new(Decimal::from(5_000), 14, LocationCategory::Home, true, false)
            .unwrap();
    let json = serde_json::to_value(assess(&input)).unwrap();
    assert_eq!(json["score"], 99);
    assert_eq!(json["decision"], "block");
    assert_eq!(json["factors"][0]["code"], "sim_swap_override");
}
