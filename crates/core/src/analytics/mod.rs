pub mod cohort;
pub mod earnings;

pub use cohort::{
    benchmark, generate_synthetic_cohort, percentile_rank, CohortBenchmark, CohortMember,
    CohortParams,
};
pub use earnings::{baseline_revenue, estimate_earnings, BaselineRevenue, EarningsEstimate};
