//! Wire-level request contracts.
//!
//! Raw requests are checked for well-formed numbers here and converted into
//! the inputs the heuristics take. Range floors are applied downstream.

use crate::analytics::CohortParams;
use crate::domain::pricing::{AudienceSnapshot, RiskProfile};
use crate::domain::profile::{CreatorProfile, Platform};
use crate::experiments::PricingExperiment;
use crate::profile::PublicPage;
use anyhow::ensure;
use serde::{Deserialize, Serialize};

const DEFAULT_MONTHLY_POSTS: u32 = 30;
const MAX_COHORT_SIZE: usize = 100_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRequest {
    pub followers: u64,
    #[serde(default)]
    pub estimated_subscribers: Option<u64>,
    pub avg_views: f64,
    pub engagement_rate: f64,
    pub avg_cpm: f64,
    pub current_price: f64,
    #[serde(default)]
    pub risk_profile: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInputs {
    pub audience: AudienceSnapshot,
    pub current_price: f64,
    pub risk_profile: RiskProfile,
}

impl PricingRequest {
    pub fn validate_and_into_inputs(
        self,
        default_risk_profile: RiskProfile,
    ) -> anyhow::Result<PricingInputs> {
        ensure_finite("avg_views", self.avg_views)?;
        ensure_finite("engagement_rate", self.engagement_rate)?;
        ensure_finite("avg_cpm", self.avg_cpm)?;
        ensure_finite("current_price", self.current_price)?;

        let risk_profile = self
            .risk_profile
            .as_deref()
            .map(RiskProfile::parse_lenient)
            .unwrap_or(default_risk_profile);

        let audience =
            AudienceSnapshot::new(self.followers, self.avg_views, self.engagement_rate, self.avg_cpm)
                .with_estimated_subscribers(self.estimated_subscribers);

        Ok(PricingInputs {
            audience,
            current_price: self.current_price,
            risk_profile,
        })
    }
}

/// Checks a logged experiment before it is summarized.
pub fn validate_experiment(mut exp: PricingExperiment) -> anyhow::Result<PricingExperiment> {
    exp.name = exp.name.trim().to_string();
    ensure!(!exp.name.is_empty(), "experiment name must be non-empty");
    ensure_finite("control_price", exp.control_price)?;
    ensure_finite("test_price", exp.test_price)?;
    ensure!(
        exp.control_price >= 0.0 && exp.test_price >= 0.0,
        "prices must be non-negative (control={}, test={})",
        exp.control_price,
        exp.test_price
    );
    Ok(exp)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyRequest {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
}

impl StrategyRequest {
    pub fn validate_and_into_profile(self) -> anyhow::Result<CreatorProfile> {
        let platform = match self.platform.as_deref() {
            Some(p) => p.parse::<Platform>()?,
            None => Platform::OnlyFans,
        };
        let handle = self.handle.unwrap_or_default();
        let mut profile = CreatorProfile::manual(platform, handle.trim(), 0, 0, 0.0, 0.0);
        profile.profile_name = self.profile_name;
        Ok(profile)
    }
}

/// A captured public page to interpret for `handle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub handle: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default)]
    pub page: PublicPage,
}

fn default_platform() -> String {
    Platform::OnlyFans.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsRequest {
    #[serde(default)]
    pub monthly_posts: Option<u32>,
    pub avg_views: f64,
    pub avg_cpm: f64,
}

impl EarningsRequest {
    pub fn validate(&self) -> anyhow::Result<u32> {
        ensure_finite("avg_views", self.avg_views)?;
        ensure_finite("avg_cpm", self.avg_cpm)?;
        Ok(self.monthly_posts.unwrap_or(DEFAULT_MONTHLY_POSTS))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineRequest {
    pub estimated_subscribers: u64,
    pub current_price: f64,
    #[serde(default)]
    pub estimated_monthly_visits: Option<u64>,
}

impl BaselineRequest {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure_finite("current_price", self.current_price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRequest {
    pub followers: u64,
    pub avg_views: f64,
    pub engagement_rate: f64,
    pub avg_cpm: f64,
    #[serde(default)]
    pub cohort_size: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl BenchmarkRequest {
    pub fn validate_params(&self) -> anyhow::Result<CohortParams> {
        ensure_finite("avg_views", self.avg_views)?;
        ensure_finite("engagement_rate", self.engagement_rate)?;
        ensure_finite("avg_cpm", self.avg_cpm)?;
        if let Some(n) = self.cohort_size {
            ensure!(
                (1..=MAX_COHORT_SIZE).contains(&n),
                "cohort_size must be 1..={MAX_COHORT_SIZE} (got {n})"
            );
        }
        Ok(CohortParams {
            followers: self.followers,
            avg_views: self.avg_views,
            engagement_rate: self.engagement_rate,
            avg_cpm: self.avg_cpm,
        })
    }
}

fn ensure_finite(field: &str, value: f64) -> anyhow::Result<()> {
    ensure!(value.is_finite(), "{field} must be a finite number (got {value})");
    Ok(())
}
