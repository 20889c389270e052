//! Scalar helpers shared by the heuristics.

/// `min(max(x, lo), hi)`.
pub(crate) fn clip(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

/// Round half-to-even at `dp` decimal places.
pub(crate) fn round_dp(x: f64, dp: i32) -> f64 {
    let scale = 10f64.powi(dp);
    (x * scale).round_ties_even() / scale
}

/// Nearest multiple of 0.5, ties to even.
pub(crate) fn round_to_half(x: f64) -> f64 {
    (x * 2.0).round_ties_even() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_bounds() {
        assert_eq!(clip(0.5, 1.0, 2.0), 1.0);
        assert_eq!(clip(3.0, 1.0, 2.0), 2.0);
        assert_eq!(clip(1.5, 1.0, 2.0), 1.5);
    }

    #[test]
    fn round_to_half_snaps_and_ties_to_even() {
        assert_eq!(round_to_half(20.57), 20.5);
        assert_eq!(round_to_half(9.6), 9.5);
        assert_eq!(round_to_half(13.8), 14.0);
        // 20.25 * 2 = 40.5 -> 40
        assert_eq!(round_to_half(20.25), 20.0);
        // 20.75 * 2 = 41.5 -> 42
        assert_eq!(round_to_half(20.75), 21.0);
    }

    #[test]
    fn round_dp_rounds() {
        assert_eq!(round_dp(16.666_666, 1), 16.7);
        assert_eq!(round_dp(1.234_9, 2), 1.23);
        assert_eq!(round_dp(-20.0, 1), -20.0);
    }
}
