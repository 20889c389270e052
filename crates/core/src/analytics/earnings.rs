use crate::math::round_dp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarningsEstimate {
    pub monthly_posts: u32,
    pub total_impressions: u64,
    /// USD.
    pub earnings: f64,
}

/// `impressions / 1000 * cpm` with posts, views and CPM floored at 1, 1 and 0.5.
pub fn estimate_earnings(monthly_posts: u32, avg_views_per_post: f64, cpm: f64) -> EarningsEstimate {
    let monthly_posts = monthly_posts.max(1);
    let avg_views = if avg_views_per_post.is_nan() { 1.0 } else { avg_views_per_post.max(1.0) };
    let cpm = if cpm.is_nan() { 0.5 } else { cpm.max(0.5) };

    let total_impressions = (monthly_posts as f64 * avg_views) as u64;
    EarningsEstimate {
        monthly_posts,
        total_impressions,
        earnings: total_impressions as f64 / 1000.0 * cpm,
    }
}

/// What the creator earns today at a single tier price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineRevenue {
    pub mrr_estimate: f64,
    pub active_subscribers: u64,
    pub avg_tier_price: f64,
    pub estimated_monthly_visits: Option<u64>,
}

pub fn baseline_revenue(
    estimated_subscribers: u64,
    current_price: f64,
    estimated_monthly_visits: Option<u64>,
) -> BaselineRevenue {
    let price = if current_price.is_nan() { 0.0 } else { current_price.max(0.0) };
    BaselineRevenue {
        mrr_estimate: round_dp(estimated_subscribers as f64 * price, 2),
        active_subscribers: estimated_subscribers,
        avg_tier_price: round_dp(price, 2),
        estimated_monthly_visits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earnings_from_impressions_and_cpm() {
        let e = estimate_earnings(30, 3_000.0, 20.0);
        assert_eq!(e.total_impressions, 90_000);
        assert_eq!(e.earnings, 1_800.0);
    }

    #[test]
    fn earnings_floor_inputs() {
        let e = estimate_earnings(0, 0.0, 0.0);
        assert_eq!(e.monthly_posts, 1);
        assert_eq!(e.total_impressions, 1);
        assert_eq!(e.earnings, 0.0005);
    }

    #[test]
    fn impressions_truncate() {
        assert_eq!(estimate_earnings(3, 10.9, 1.0).total_impressions, 32);
    }

    #[test]
    fn baseline_is_subs_times_price() {
        let b = baseline_revenue(10_000, 12.0, Some(150_000));
        assert_eq!(b.mrr_estimate, 120_000.0);
        assert_eq!(b.avg_tier_price, 12.0);
        assert_eq!(b.estimated_monthly_visits, Some(150_000));
    }
}
