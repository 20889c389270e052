//! Synthetic peer cohort for percentile benchmarking.
//!
//! Sampling takes the generator as a parameter so callers decide between a
//! fixed seed and entropy.

use crate::math::{clip, round_dp};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const FOLLOWERS_SIGMA: f64 = 0.4;
const VIEW_RATIO_SD: f64 = 0.05;
const ENGAGEMENT_SD: f64 = 1.5;
const CPM_SIGMA: f64 = 0.35;

/// The creator's own stats; the cohort is sampled around them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortParams {
    pub followers: u64,
    pub avg_views: f64,
    pub engagement_rate: f64,
    pub avg_cpm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortMember {
    pub followers: u64,
    pub avg_views: u64,
    pub engagement_rate: f64,
    pub avg_cpm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortBenchmark {
    pub cohort_size: usize,
    pub followers_percentile: f64,
    pub avg_views_percentile: f64,
    pub engagement_percentile: f64,
    pub cpm_percentile: f64,
}

pub fn generate_synthetic_cohort<R: Rng>(
    params: &CohortParams,
    n: usize,
    rng: &mut R,
) -> Vec<CohortMember> {
    let followers = params.followers.max(1) as f64;
    let log_followers = followers.ln();

    let view_ratio = clip(params.avg_views / followers, 0.05, 0.8);
    let engagement_mean = clip(params.engagement_rate, 0.1, 50.0);
    let log_cpm = params.avg_cpm.max(0.5).ln();

    (0..n)
        .map(|_| {
            let member_followers = lognormal(rng, log_followers, FOLLOWERS_SIGMA) as u64;
            let ratio = clip(normal(rng, view_ratio, VIEW_RATIO_SD), 0.02, 0.9);
            CohortMember {
                followers: member_followers,
                avg_views: (member_followers as f64 * ratio) as u64,
                engagement_rate: clip(normal(rng, engagement_mean, ENGAGEMENT_SD), 0.1, 80.0),
                avg_cpm: lognormal(rng, log_cpm, CPM_SIGMA),
            }
        })
        .collect()
}

/// Share of `values` strictly below `value`, as a percentage rounded to 2 decimals.
pub fn percentile_rank(values: &[f64], value: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let below = values.iter().filter(|v| **v < value).count();
    round_dp(100.0 * below as f64 / values.len() as f64, 2)
}

pub fn benchmark(cohort: &[CohortMember], creator: &CohortParams) -> CohortBenchmark {
    let followers: Vec<f64> = cohort.iter().map(|m| m.followers as f64).collect();
    let views: Vec<f64> = cohort.iter().map(|m| m.avg_views as f64).collect();
    let engagement: Vec<f64> = cohort.iter().map(|m| m.engagement_rate).collect();
    let cpm: Vec<f64> = cohort.iter().map(|m| m.avg_cpm).collect();

    CohortBenchmark {
        cohort_size: cohort.len(),
        followers_percentile: percentile_rank(&followers, creator.followers as f64),
        avg_views_percentile: percentile_rank(&views, creator.avg_views),
        engagement_percentile: percentile_rank(&engagement, creator.engagement_rate),
        cpm_percentile: percentile_rank(&cpm, creator.avg_cpm),
    }
}

fn normal<R: Rng>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    mean + sd * sample_standard_normal(rng)
}

fn lognormal<R: Rng>(rng: &mut R, log_mean: f64, sigma: f64) -> f64 {
    normal(rng, log_mean, sigma).exp()
}

fn sample_standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // Box-Muller transform
    let u1: f64 = rng.gen::<f64>().max(1e-10);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
