//! Subscription / PPV price recommendation and A/B test proposal.
//!
//! Everything here is a pure function of its inputs. Out-of-range numbers are
//! floored rather than rejected, so [`recommend_pricing`] is total.

use crate::domain::pricing::{
    AudienceSnapshot, PricingRecommendation, PricingTestProposal, RiskLevel, RiskProfile,
};
use crate::math::{clip, round_dp, round_to_half};

/// Posts (or story equivalents) assumed per month when turning views into impressions.
const MONTHLY_POSTS: f64 = 30.0;

/// Direct-pay ARPU relative to the ad-equivalent revenue per fan.
const ARPU_MULTIPLIER: f64 = 4.0;

const MIN_PENETRATION: f64 = 0.15;
const MAX_PENETRATION: f64 = 0.35;
const FALLBACK_PENETRATION: f64 = 0.20;

const MIN_ARPU: f64 = 3.0;
const MAX_ARPU: f64 = 30.0;

const MIN_SUB_PRICE: f64 = 5.0;
const MAX_SUB_PRICE: f64 = 50.0;

const MIN_TEST_PRICE: f64 = 3.0;
const MAX_TEST_PRICE: f64 = 100.0;

const MIN_PPV_LOW: f64 = 4.0;
const PPV_MIN_SPREAD: f64 = 2.0;

/// Within this band (percent) the suggested price is tested as-is.
const DIRECT_TEST_BAND_PCT: f64 = 10.0;

const TIER_NAME: &str = "Main subscription tier";
const TEST_SEGMENT: &str = "New subscribers only";
const FALLBACK_RULE: &str = "Revert to current price if churn on existing subs rises >5%.";

/// Positional entry point. `risk_profile` is parsed leniently.
pub fn recommend_pricing(
    followers: u64,
    estimated_subscribers: u64,
    avg_views: f64,
    engagement_rate: f64,
    avg_cpm: f64,
    current_price: f64,
    risk_profile: &str,
) -> PricingRecommendation {
    let audience = AudienceSnapshot {
        followers,
        estimated_subscribers,
        avg_views,
        engagement_rate,
        avg_cpm,
    };
    recommend(&audience, current_price, RiskProfile::parse_lenient(risk_profile))
}

pub fn recommend(
    audience: &AudienceSnapshot,
    current_price: f64,
    risk_profile: RiskProfile,
) -> PricingRecommendation {
    let followers = audience.followers.max(1) as f64;
    let views = floor(audience.avg_views, 1.0);
    let engagement = floor(audience.engagement_rate, 0.1);
    let cpm = floor(audience.avg_cpm, 0.5);
    let current_price = floor(current_price, 1.0);

    let monthly_impressions = views * MONTHLY_POSTS;
    let implied_revenue_per_fan = (monthly_impressions / 1000.0 * cpm) / followers;

    let mut penetration = clip(engagement / 10.0, MIN_PENETRATION, MAX_PENETRATION);
    if penetration <= 0.0 {
        penetration = FALLBACK_PENETRATION;
    }

    let target_arpu = clip(implied_revenue_per_fan * ARPU_MULTIPLIER, MIN_ARPU, MAX_ARPU);

    let suggested = round_to_half(clip(
        target_arpu / penetration,
        MIN_SUB_PRICE,
        MAX_SUB_PRICE,
    ));

    let ppv_low = round_dp(MIN_PPV_LOW.max(suggested * 0.6), 2);
    let ppv_high = round_dp((ppv_low + PPV_MIN_SPREAD).max(suggested * 2.0), 2);

    let uplift_pct = round_dp((suggested / current_price - 1.0) * 100.0, 1);

    let test_price = select_test_price(suggested, current_price, risk_profile);
    let (duration_days, traffic_fraction) = risk_profile.test_allocation();
    let effect = expected_effect(test_price, current_price);

    tracing::debug!(
        suggested,
        current_price,
        test_price,
        risk_profile = %risk_profile,
        risk_level = %effect.risk_level,
        "pricing recommendation computed"
    );

    PricingRecommendation {
        suggested_sub_price: suggested,
        ppv_low,
        ppv_high,
        implied_revenue_per_fan: round_dp(implied_revenue_per_fan, 2),
        target_sub_penetration: round_dp(penetration, 4),
        target_arpu: round_dp(target_arpu, 2),
        uplift_pct_vs_current: uplift_pct,
        pricing_test: PricingTestProposal {
            tier_name: TIER_NAME.to_string(),
            current_price: round_dp(current_price, 2),
            test_price: round_dp(test_price, 2),
            segment: TEST_SEGMENT.to_string(),
            traffic_fraction_pct: (traffic_fraction * 100.0).round() as u32,
            duration_days,
            expected_conversion_change_pct: round_dp(effect.conversion_change_pct, 1),
            expected_mrr_change_pct: round_dp(effect.mrr_change_pct, 1),
            risk_level: effect.risk_level,
            fallback_rule: FALLBACK_RULE.to_string(),
        },
    }
}

/// NaN collapses to the floor as well.
fn floor(x: f64, min: f64) -> f64 {
    if x.is_nan() {
        min
    } else {
        x.max(min)
    }
}

// A large suggested drop is not tested outright: the discount branch steps
// down to 80% of the current price and leaves the full cut for a later round.
fn select_test_price(suggested: f64, current_price: f64, risk_profile: RiskProfile) -> f64 {
    let delta_pct = (suggested - current_price) / current_price * 100.0;

    let test_price = if delta_pct < -DIRECT_TEST_BAND_PCT {
        round_to_half(current_price * 0.8)
    } else if delta_pct <= DIRECT_TEST_BAND_PCT {
        suggested
    } else {
        match risk_profile {
            RiskProfile::Conservative => round_to_half(current_price * 1.15),
            RiskProfile::Aggressive => suggested,
            RiskProfile::Balanced => round_to_half(current_price * 1.25),
        }
    };

    clip(test_price, MIN_TEST_PRICE, MAX_TEST_PRICE)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ExpectedEffect {
    conversion_change_pct: f64,
    mrr_change_pct: f64,
    risk_level: RiskLevel,
}

fn expected_effect(test_price: f64, current_price: f64) -> ExpectedEffect {
    let price_change_pct = (test_price - current_price) / current_price * 100.0;

    if price_change_pct < 0.0 {
        let conversion_change_pct = (price_change_pct.abs() * 0.8).min(40.0);
        ExpectedEffect {
            conversion_change_pct,
            mrr_change_pct: (conversion_change_pct * 0.6).max(3.0),
            risk_level: RiskLevel::Low,
        }
    } else if price_change_pct <= 20.0 {
        ExpectedEffect {
            conversion_change_pct: -price_change_pct * 0.5,
            mrr_change_pct: (price_change_pct * 0.4).max(2.0),
            risk_level: RiskLevel::Medium,
        }
    } else {
        ExpectedEffect {
            conversion_change_pct: -(price_change_pct * 0.8).min(50.0),
            mrr_change_pct: (price_change_pct * 0.3).max(5.0),
            risk_level: RiskLevel::High,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn balanced_price_increase_scales_back_to_125_pct() {
        // views*30/1000*cpm = 1800 per month over 1000 followers -> 1.8 per fan.
        let rec = recommend_pricing(1_000, 1_000, 3_000.0, 3.5, 20.0, 12.0, "balanced");

        assert!(approx(rec.implied_revenue_per_fan, 1.8));
        assert!(approx(rec.target_sub_penetration, 0.35));
        assert!(approx(rec.target_arpu, 7.2));
        assert!(approx(rec.suggested_sub_price, 20.5));
        assert!(approx(rec.ppv_low, 12.3));
        assert!(approx(rec.ppv_high, 41.0));
        assert!(approx(rec.uplift_pct_vs_current, 70.8));

        let test = &rec.pricing_test;
        assert!(approx(test.current_price, 12.0));
        assert!(approx(test.test_price, 15.0));
        assert!(approx(test.expected_conversion_change_pct, -20.0));
        assert!(approx(test.expected_mrr_change_pct, 7.5));
        assert_eq!(test.risk_level, RiskLevel::High);
        assert_eq!(test.duration_days, 14);
        assert_eq!(test.traffic_fraction_pct, 50);
        assert_eq!(test.tier_name, "Main subscription tier");
        assert_eq!(test.segment, "New subscribers only");
        assert_eq!(
            test.fallback_rule,
            "Revert to current price if churn on existing subs rises >5%."
        );
    }

    #[test]
    fn large_audience_with_low_revenue_per_fan_triggers_discount_test() {
        // 1800 / 10000 = 0.18 per fan; ARPU floors at 3.0 -> 3.0 / 0.35 = 8.57 -> 8.5.
        let rec = recommend_pricing(10_000, 10_000, 3_000.0, 3.5, 20.0, 12.0, "balanced");

        assert!(approx(rec.implied_revenue_per_fan, 0.18));
        assert!(approx(rec.target_arpu, 3.0));
        assert!(approx(rec.suggested_sub_price, 8.5));
        assert!(approx(rec.ppv_low, 5.1));
        assert!(approx(rec.ppv_high, 17.0));

        // delta = -29% -> step down to 12 * 0.8 = 9.6 -> 9.5
        let test = &rec.pricing_test;
        assert!(approx(test.test_price, 9.5));
        assert!(approx(test.expected_conversion_change_pct, 16.7));
        assert!(approx(test.expected_mrr_change_pct, 10.0));
        assert_eq!(test.risk_level, RiskLevel::Low);
    }

    #[test]
    fn unknown_risk_profile_behaves_like_balanced() {
        let yolo = recommend_pricing(1_000, 1_000, 3_000.0, 3.5, 20.0, 12.0, "yolo");
        let balanced = recommend_pricing(1_000, 1_000, 3_000.0, 3.5, 20.0, 12.0, "balanced");
        assert_eq!(yolo, balanced);
    }

    #[test]
    fn current_price_equal_to_suggestion_tests_it_directly() {
        let rec = recommend_pricing(1_000, 1_000, 3_000.0, 3.5, 20.0, 20.5, "balanced");
        let test = &rec.pricing_test;
        assert!(approx(rec.suggested_sub_price, 20.5));
        assert!(approx(rec.uplift_pct_vs_current, 0.0));
        assert!(approx(test.test_price, 20.5));
        assert!(approx(test.expected_conversion_change_pct, 0.0));
        assert!(approx(test.expected_mrr_change_pct, 2.0));
        assert_eq!(test.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn risk_profile_shapes_increase_test() {
        let conservative =
            recommend_pricing(1_000, 1_000, 3_000.0, 3.5, 20.0, 12.0, "conservative");
        // 12 * 1.15 = 13.8 -> 14.0, +16.7% -> medium
        assert!(approx(conservative.pricing_test.test_price, 14.0));
        assert_eq!(conservative.pricing_test.risk_level, RiskLevel::Medium);
        assert_eq!(conservative.pricing_test.duration_days, 21);
        assert_eq!(conservative.pricing_test.traffic_fraction_pct, 30);

        let aggressive = recommend_pricing(1_000, 1_000, 3_000.0, 3.5, 20.0, 12.0, "aggressive");
        assert!(approx(aggressive.pricing_test.test_price, 20.5));
        assert_eq!(aggressive.pricing_test.risk_level, RiskLevel::High);
        assert_eq!(aggressive.pricing_test.duration_days, 10);
        assert_eq!(aggressive.pricing_test.traffic_fraction_pct, 80);
        // +70.8% price: conversion capped at -50
        assert!(approx(aggressive.pricing_test.expected_conversion_change_pct, -50.0));
    }

    #[test]
    fn out_of_range_inputs_are_floored() {
        let rec = recommend_pricing(0, 0, 0.0, -5.0, 0.0, 0.0, "balanced");
        assert!(rec.implied_revenue_per_fan >= 0.0);
        assert!(approx(rec.target_sub_penetration, 0.15));
        assert!(approx(rec.pricing_test.current_price, 1.0));
        // suggested 20.0 vs current 1.0 -> 1.25 -> 1.0 -> clamped to 3.0
        assert!(approx(rec.suggested_sub_price, 20.0));
        assert!(approx(rec.pricing_test.test_price, 3.0));

        let nan = recommend_pricing(10, 10, f64::NAN, f64::NAN, f64::NAN, f64::NAN, "");
        assert!(nan.suggested_sub_price.is_finite());
        assert!(nan.pricing_test.test_price.is_finite());
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let a = recommend_pricing(48_213, 4_100, 7_345.5, 6.2, 11.75, 14.99, "conservative");
        let b = recommend_pricing(48_213, 4_100, 7_345.5, 6.2, 11.75, 14.99, "conservative");
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn invariants_hold_across_input_grid() {
        let followers = [1u64, 50, 1_000, 25_000, 2_000_000];
        let views = [1.0, 120.0, 3_000.0, 900_000.0];
        let engagement = [0.1, 1.0, 3.5, 12.0, 100.0];
        let cpm = [0.5, 5.0, 20.0, 300.0];
        let prices = [1.0, 4.99, 12.0, 19.5, 49.0, 180.0];
        let profiles = ["conservative", "balanced", "aggressive"];

        for &f in &followers {
            for &v in &views {
                for &e in &engagement {
                    for &c in &cpm {
                        for &p in &prices {
                            for profile in profiles {
                                let rec = recommend_pricing(f, f, v, e, c, p, profile);
                                let s = rec.suggested_sub_price;
                                assert!((5.0..=50.0).contains(&s), "suggested {s}");
                                assert_eq!((s * 2.0).fract(), 0.0, "suggested {s} not a half step");
                                assert!(rec.ppv_high + 1e-9 >= rec.ppv_low + 2.0);
                                assert!((0.15..=0.35).contains(&rec.target_sub_penetration));
                                assert!((3.0..=30.0).contains(&rec.target_arpu));
                                assert!(rec.implied_revenue_per_fan >= 0.0);

                                let t = &rec.pricing_test;
                                assert!((3.0..=100.0).contains(&t.test_price));
                                let expected_level = if t.test_price < t.current_price {
                                    RiskLevel::Low
                                } else if t.test_price <= t.current_price * 1.2 {
                                    RiskLevel::Medium
                                } else {
                                    RiskLevel::High
                                };
                                assert_eq!(t.risk_level, expected_level, "{t:?}");
                            }
                        }
                    }
                }
            }
        }
    }
}
