pub mod analytics;
pub mod churn;
pub mod domain;
pub mod experiments;
mod math;
pub mod pricing;
pub mod profile;
pub mod strategy;

pub mod config {
    use crate::domain::pricing::RiskProfile;
    use anyhow::Context;

    const DEFAULT_PORT: u16 = 3000;
    const DEFAULT_COHORT_SIZE: usize = 1000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub port: u16,
        pub cohort_size: usize,
        pub cohort_seed: Option<u64>,
        pub default_risk_profile: RiskProfile,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let port = match std::env::var("PORT") {
                Ok(s) => s
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a valid port number (got {s:?})"))?,
                Err(_) => DEFAULT_PORT,
            };

            let cohort_size = match std::env::var("COHORT_SIZE") {
                Ok(s) => s
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("COHORT_SIZE must be an integer (got {s:?})"))?,
                Err(_) => DEFAULT_COHORT_SIZE,
            };
            anyhow::ensure!(
                (1..=100_000).contains(&cohort_size),
                "COHORT_SIZE must be 1..=100000 (got {cohort_size})"
            );

            let cohort_seed = match std::env::var("COHORT_SEED") {
                Ok(s) if !s.trim().is_empty() => Some(
                    s.trim()
                        .parse::<u64>()
                        .with_context(|| format!("COHORT_SEED must be a u64 (got {s:?})"))?,
                ),
                _ => None,
            };

            let default_risk_profile = std::env::var("DEFAULT_RISK_PROFILE")
                .map(|s| RiskProfile::parse_lenient(&s))
                .unwrap_or_default();

            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok().filter(|s| !s.is_empty()),
                port,
                cohort_size,
                cohort_seed,
                default_risk_profile,
            })
        }

        pub fn require_sentry_dsn(&self) -> anyhow::Result<&str> {
            self.sentry_dsn.as_deref().context("SENTRY_DSN is required")
        }
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                sentry_dsn: None,
                port: DEFAULT_PORT,
                cohort_size: DEFAULT_COHORT_SIZE,
                cohort_seed: None,
                default_risk_profile: RiskProfile::default(),
            }
        }
    }
}
