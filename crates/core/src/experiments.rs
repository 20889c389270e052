//! Evaluates a manually logged A/B price test.

use crate::math::round_dp;
use serde::{Deserialize, Serialize};

const NOTES: &str = "This is a simplified A/B evaluator. For real pricing optimization you'd want \
exposures (visitors/new-signups), churn impact, and longer time windows.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingExperiment {
    pub name: String,
    pub control_price: f64,
    pub test_price: f64,
    pub control_new_subs: i64,
    pub test_new_subs: i64,
    pub days_running: u32,
    /// Visitors or signups exposed to the control price, when known.
    #[serde(default)]
    pub control_seen: Option<u64>,
    #[serde(default)]
    pub test_seen: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    ConversionRate,
    NewSubsProxy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Control,
    Test,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub experiment: PricingExperiment,
    pub metric_type: MetricType,
    pub control_conversion_rate: Option<f64>,
    pub test_conversion_rate: Option<f64>,
    pub uplift_pct: Option<f64>,
    pub control_revenue_proxy: f64,
    pub test_revenue_proxy: f64,
    pub revenue_uplift_pct: Option<f64>,
    pub winner: Winner,
    pub notes: String,
}

pub fn summarize_pricing_experiment(exp: &PricingExperiment) -> ExperimentSummary {
    let control_subs = exp.control_new_subs.max(0) as f64;
    let test_subs = exp.test_new_subs.max(0) as f64;

    let exposures = match (exp.control_seen, exp.test_seen) {
        (Some(c), Some(t)) if c > 0 && t > 0 => Some((c as f64, t as f64)),
        _ => None,
    };

    let (metric_type, control_rate, test_rate, uplift) = match exposures {
        Some((control_seen, test_seen)) => {
            let c_rate = control_subs / control_seen;
            let t_rate = test_subs / test_seen;
            let uplift = (c_rate > 0.0).then(|| (t_rate / c_rate - 1.0) * 100.0);
            (MetricType::ConversionRate, Some(c_rate), Some(t_rate), uplift)
        }
        None => {
            let uplift = (control_subs > 0.0).then(|| (test_subs / control_subs - 1.0) * 100.0);
            (MetricType::NewSubsProxy, None, None, uplift)
        }
    };

    // Subscription revenue only; churn is not modelled here.
    let control_rev = control_subs * exp.control_price;
    let test_rev = test_subs * exp.test_price;
    let revenue_uplift = (control_rev > 0.0).then(|| (test_rev / control_rev - 1.0) * 100.0);

    let winner = match revenue_uplift {
        Some(u) if u > 0.0 => Winner::Test,
        _ => Winner::Control,
    };

    tracing::debug!(
        experiment = %exp.name,
        ?metric_type,
        ?winner,
        ?revenue_uplift,
        "pricing experiment summarized"
    );

    ExperimentSummary {
        experiment: exp.clone(),
        metric_type,
        control_conversion_rate: control_rate,
        test_conversion_rate: test_rate,
        uplift_pct: uplift.map(|u| round_dp(u, 2)),
        control_revenue_proxy: round_dp(control_rev, 2),
        test_revenue_proxy: round_dp(test_rev, 2),
        revenue_uplift_pct: revenue_uplift.map(|u| round_dp(u, 2)),
        winner,
        notes: NOTES.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experiment(control_new_subs: i64, test_new_subs: i64) -> PricingExperiment {
        PricingExperiment {
            name: "Pricing Test #1 (new subs)".to_string(),
            control_price: 12.0,
            test_price: 15.0,
            control_new_subs,
            test_new_subs,
            days_running: 14,
            control_seen: None,
            test_seen: None,
        }
    }

    #[test]
    fn new_subs_proxy_without_exposures() {
        let s = summarize_pricing_experiment(&experiment(100, 90));
        assert_eq!(s.metric_type, MetricType::NewSubsProxy);
        assert_eq!(s.control_conversion_rate, None);
        assert_eq!(s.uplift_pct, Some(-10.0));
        assert_eq!(s.control_revenue_proxy, 1200.0);
        assert_eq!(s.test_revenue_proxy, 1350.0);
        assert_eq!(s.revenue_uplift_pct, Some(12.5));
        assert_eq!(s.winner, Winner::Test);
    }

    #[test]
    fn conversion_rates_when_both_exposures_known() {
        let mut exp = experiment(50, 40);
        exp.control_seen = Some(1_000);
        exp.test_seen = Some(500);
        let s = summarize_pricing_experiment(&exp);
        assert_eq!(s.metric_type, MetricType::ConversionRate);
        assert_eq!(s.control_conversion_rate, Some(0.05));
        assert_eq!(s.test_conversion_rate, Some(0.08));
        assert_eq!(s.uplift_pct, Some(60.0));
        // 600 vs 600 -> no revenue uplift -> control wins ties
        assert_eq!(s.revenue_uplift_pct, Some(0.0));
        assert_eq!(s.winner, Winner::Control);
    }

    #[test]
    fn one_sided_exposure_falls_back_to_proxy() {
        let mut exp = experiment(10, 20);
        exp.control_seen = Some(400);
        exp.test_seen = Some(0);
        let s = summarize_pricing_experiment(&exp);
        assert_eq!(s.metric_type, MetricType::NewSubsProxy);
        assert_eq!(s.uplift_pct, Some(100.0));
    }

    #[test]
    fn zero_control_leaves_uplifts_undefined() {
        let s = summarize_pricing_experiment(&experiment(0, 25));
        assert_eq!(s.uplift_pct, None);
        assert_eq!(s.revenue_uplift_pct, None);
        assert_eq!(s.winner, Winner::Control);
    }

    #[test]
    fn negative_counts_are_floored() {
        let s = summarize_pricing_experiment(&experiment(-5, -1));
        assert_eq!(s.control_revenue_proxy, 0.0);
        assert_eq!(s.test_revenue_proxy, 0.0);
        assert_eq!(s.winner, Winner::Control);
    }

    #[test]
    fn summary_serializes_enums_as_snake_case() {
        let v = serde_json::to_value(summarize_pricing_experiment(&experiment(100, 90))).unwrap();
        assert_eq!(v["metric_type"], "new_subs_proxy");
        assert_eq!(v["winner"], "test");
        assert_eq!(v["experiment"]["days_running"], 14);
    }
}
