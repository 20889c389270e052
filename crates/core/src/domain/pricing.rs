use serde::{Deserialize, Serialize};
use std::fmt;

/// Audience metrics the pricing engine reads. Values are taken as entered;
/// the engine applies its own floors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudienceSnapshot {
    pub followers: u64,
    pub estimated_subscribers: u64,
    pub avg_views: f64,
    /// Percent, e.g. `3.5` for 3.5%.
    pub engagement_rate: f64,
    /// USD per 1000 impressions.
    pub avg_cpm: f64,
}

impl AudienceSnapshot {
    /// Builds a snapshot where the subscriber estimate defaults to the follower count.
    pub fn new(followers: u64, avg_views: f64, engagement_rate: f64, avg_cpm: f64) -> Self {
        Self {
            followers,
            estimated_subscribers: followers,
            avg_views,
            engagement_rate,
            avg_cpm,
        }
    }

    pub fn with_estimated_subscribers(mut self, estimated_subscribers: Option<u64>) -> Self {
        if let Some(subs) = estimated_subscribers.filter(|s| *s > 0) {
            self.estimated_subscribers = subs;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl RiskProfile {
    /// Case-insensitive parse. Anything unrecognised is treated as `Balanced`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Self::Conservative,
            "aggressive" => Self::Aggressive,
            _ => Self::Balanced,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }

    /// Test length in days and share of new signups routed to the test price.
    pub fn test_allocation(&self) -> (u32, f64) {
        match self {
            Self::Conservative => (21, 0.3),
            Self::Aggressive => (10, 0.8),
            Self::Balanced => (14, 0.5),
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTestProposal {
    pub tier_name: String,
    pub current_price: f64,
    pub test_price: f64,
    pub segment: String,
    /// Integer percent of new signups that see the test price.
    pub traffic_fraction_pct: u32,
    pub duration_days: u32,
    pub expected_conversion_change_pct: f64,
    pub expected_mrr_change_pct: f64,
    pub risk_level: RiskLevel,
    pub fallback_rule: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecommendation {
    pub suggested_sub_price: f64,
    pub ppv_low: f64,
    pub ppv_high: f64,
    pub implied_revenue_per_fan: f64,
    /// Fraction of followers expected to pay, in `[0.15, 0.35]`.
    pub target_sub_penetration: f64,
    pub target_arpu: f64,
    pub uplift_pct_vs_current: f64,
    pub pricing_test: PricingTestProposal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_profile_parse_is_lenient() {
        assert_eq!(RiskProfile::parse_lenient("Conservative"), RiskProfile::Conservative);
        assert_eq!(RiskProfile::parse_lenient(" AGGRESSIVE "), RiskProfile::Aggressive);
        assert_eq!(RiskProfile::parse_lenient("balanced"), RiskProfile::Balanced);
        assert_eq!(RiskProfile::parse_lenient("yolo"), RiskProfile::Balanced);
        assert_eq!(RiskProfile::parse_lenient(""), RiskProfile::Balanced);
    }

    #[test]
    fn risk_profile_serializes_snake_case() {
        let v = serde_json::to_value(RiskProfile::Aggressive).unwrap();
        assert_eq!(v, serde_json::json!("aggressive"));
    }

    #[test]
    fn subscriber_estimate_defaults_to_followers() {
        let snap = AudienceSnapshot::new(2_000, 600.0, 3.0, 10.0);
        assert_eq!(snap.estimated_subscribers, 2_000);
        assert_eq!(snap.with_estimated_subscribers(Some(0)).estimated_subscribers, 2_000);
        assert_eq!(snap.with_estimated_subscribers(Some(450)).estimated_subscribers, 450);
    }
}
