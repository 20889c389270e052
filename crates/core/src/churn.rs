//! Churn rate and at-risk scoring from manually entered counts.

use crate::math::round_dp;
use serde::{Deserialize, Serialize};

const WATCH_CHURN_RATE: f64 = 0.05;
const RISK_CHURN_RATE: f64 = 0.10;

const MEDIUM_RISK_SCORE: u64 = 5;
const HIGH_RISK_SCORE: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChurnHealth {
    Healthy,
    Watch,
    Risk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnEstimate {
    pub active_subs: u64,
    pub cancels_30d: u64,
    pub monthly_churn_rate_pct: f64,
    pub health_label: ChurnHealth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtRiskAssessment {
    pub payment_fails: u64,
    pub inactive_14d: u64,
    pub risk_score: u64,
    pub risk_band: RiskBand,
    pub recommended_actions: Vec<String>,
}

/// `cancels / active` over the last 30 days. Active subs are floored at 1.
pub fn estimate_monthly_churn(active_subs: i64, cancels_30d: i64) -> ChurnEstimate {
    let active_subs = active_subs.max(1) as u64;
    let cancels_30d = cancels_30d.max(0) as u64;

    let churn_rate = cancels_30d as f64 / active_subs as f64;
    let health_label = if churn_rate < WATCH_CHURN_RATE {
        ChurnHealth::Healthy
    } else if churn_rate < RISK_CHURN_RATE {
        ChurnHealth::Watch
    } else {
        ChurnHealth::Risk
    };

    ChurnEstimate {
        active_subs,
        cancels_30d,
        monthly_churn_rate_pct: round_dp(churn_rate * 100.0, 2),
        health_label,
    }
}

/// Payment failures weigh twice as much as inactivity.
pub fn at_risk_heuristics(payment_fails: i64, inactive_14d: i64) -> AtRiskAssessment {
    let payment_fails = payment_fails.max(0) as u64;
    let inactive_14d = inactive_14d.max(0) as u64;

    let risk_score = payment_fails.saturating_mul(2).saturating_add(inactive_14d);
    let risk_band = if risk_score < MEDIUM_RISK_SCORE {
        RiskBand::Low
    } else if risk_score < HIGH_RISK_SCORE {
        RiskBand::Medium
    } else {
        RiskBand::High
    };

    let mut recommended_actions = Vec::with_capacity(3);
    if payment_fails > 0 {
        recommended_actions.push("Send payment-fail reminder + quick-resub incentive".to_string());
    }
    if inactive_14d > 0 {
        recommended_actions
            .push("Send re-engagement DM with preview + limited-time offer".to_string());
    }
    recommended_actions.push(
        "Post a high-performing content type within 24–48h to re-activate lurkers".to_string(),
    );

    AtRiskAssessment {
        payment_fails,
        inactive_14d,
        risk_score,
        risk_band,
        recommended_actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn churn_health_bands() {
        assert_eq!(estimate_monthly_churn(100, 4).health_label, ChurnHealth::Healthy);
        assert_eq!(estimate_monthly_churn(100, 5).health_label, ChurnHealth::Watch);
        assert_eq!(estimate_monthly_churn(100, 9).health_label, ChurnHealth::Watch);
        assert_eq!(estimate_monthly_churn(100, 10).health_label, ChurnHealth::Risk);
    }

    #[test]
    fn churn_rate_is_rounded_percent() {
        let est = estimate_monthly_churn(300, 7);
        assert_eq!(est.monthly_churn_rate_pct, 2.33);
    }

    #[test]
    fn churn_floors_bad_inputs() {
        let est = estimate_monthly_churn(0, -3);
        assert_eq!(est.active_subs, 1);
        assert_eq!(est.cancels_30d, 0);
        assert_eq!(est.monthly_churn_rate_pct, 0.0);
        assert_eq!(est.health_label, ChurnHealth::Healthy);
    }

    #[test]
    fn at_risk_score_and_bands() {
        let low = at_risk_heuristics(1, 2);
        assert_eq!(low.risk_score, 4);
        assert_eq!(low.risk_band, RiskBand::Low);

        let medium = at_risk_heuristics(2, 1);
        assert_eq!(medium.risk_score, 5);
        assert_eq!(medium.risk_band, RiskBand::Medium);

        let high = at_risk_heuristics(5, 5);
        assert_eq!(high.risk_score, 15);
        assert_eq!(high.risk_band, RiskBand::High);
    }

    #[test]
    fn actions_follow_signals() {
        assert_eq!(at_risk_heuristics(0, 0).recommended_actions.len(), 1);

        let both = at_risk_heuristics(1, 1).recommended_actions;
        assert_eq!(both.len(), 3);
        assert!(both[0].starts_with("Send payment-fail reminder"));
        assert!(both[1].starts_with("Send re-engagement DM"));

        let inactive_only = at_risk_heuristics(0, 3).recommended_actions;
        assert_eq!(inactive_only.len(), 2);
        assert!(inactive_only[0].starts_with("Send re-engagement DM"));
    }
}
