use anyhow::Context;
use clap::Subcommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

use silent_partner_core::analytics;
use silent_partner_core::churn;
use silent_partner_core::config::Settings;
use silent_partner_core::domain::contract::{
    self, BenchmarkRequest, EarningsRequest, PricingRequest, StrategyRequest,
};
use silent_partner_core::experiments::{self, PricingExperiment};
use silent_partner_core::pricing;
use silent_partner_core::profile::{self, PublicPage};
use silent_partner_core::strategy;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a creator profile from a captured public page.
    Profile {
        #[arg(long)]
        handle: String,
        #[arg(long, default_value = "OnlyFans")]
        platform: String,
        /// `og:title` or page title.
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// Meta description blurb.
        #[arg(long)]
        description: Option<String>,
        /// Visible page text.
        #[arg(long, default_value = "")]
        text: String,
    },

    /// Recommend subscription / PPV prices and an A/B price test.
    Pricing {
        #[arg(long)]
        followers: u64,
        /// Defaults to the follower count.
        #[arg(long)]
        estimated_subscribers: Option<u64>,
        #[arg(long)]
        avg_views: f64,
        /// Percent.
        #[arg(long, default_value_t = 3.5)]
        engagement_rate: f64,
        /// USD per 1000 impressions.
        #[arg(long, default_value_t = 20.0)]
        avg_cpm: f64,
        #[arg(long)]
        current_price: f64,
        /// conservative | balanced | aggressive. Defaults to DEFAULT_RISK_PROFILE.
        #[arg(long)]
        risk_profile: Option<String>,
    },

    /// Summarize a manually logged A/B price test.
    Experiment {
        #[arg(long, default_value = "Pricing Test #1 (new subs)")]
        name: String,
        #[arg(long)]
        control_price: f64,
        #[arg(long)]
        test_price: f64,
        #[arg(long)]
        control_new_subs: i64,
        #[arg(long)]
        test_new_subs: i64,
        #[arg(long, default_value_t = 14)]
        days_running: u32,
        #[arg(long)]
        control_seen: Option<u64>,
        #[arg(long)]
        test_seen: Option<u64>,
    },

    /// Churn rate, at-risk score and the win-back DM template.
    Churn {
        #[arg(long)]
        active_subs: i64,
        #[arg(long, default_value_t = 0)]
        cancels_30d: i64,
        #[arg(long, default_value_t = 0)]
        payment_fails: i64,
        #[arg(long, default_value_t = 0)]
        inactive_14d: i64,
    },

    /// Ad-equivalent monthly earnings.
    Earnings {
        #[arg(long)]
        monthly_posts: Option<u32>,
        #[arg(long)]
        avg_views: f64,
        #[arg(long, default_value_t = 20.0)]
        avg_cpm: f64,
    },

    /// Percentile position against a synthetic peer cohort.
    Benchmark {
        #[arg(long)]
        followers: u64,
        #[arg(long)]
        avg_views: f64,
        #[arg(long, default_value_t = 3.5)]
        engagement_rate: f64,
        #[arg(long, default_value_t = 20.0)]
        avg_cpm: f64,
        /// Defaults to COHORT_SIZE.
        #[arg(long)]
        cohort_size: Option<usize>,
        /// Defaults to COHORT_SEED, then entropy.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// DM playbooks and whale upsell ideas.
    Playbook {
        #[arg(long)]
        handle: Option<String>,
        #[arg(long)]
        profile_name: Option<String>,
        #[arg(long)]
        platform: Option<String>,
    },
}

pub async fn run(command: Command, settings: &Settings) -> anyhow::Result<Value> {
    match command {
        Command::Profile {
            handle,
            platform,
            title,
            image_url,
            description,
            text,
        } => {
            let page = PublicPage {
                title,
                image_url,
                description,
                text,
            };
            let profile = profile::interpret_page(&handle, &platform, page)
                .await
                .context("profile interpretation failed")?;
            Ok(serde_json::to_value(profile)?)
        }

        Command::Pricing {
            followers,
            estimated_subscribers,
            avg_views,
            engagement_rate,
            avg_cpm,
            current_price,
            risk_profile,
        } => {
            let inputs = PricingRequest {
                followers,
                estimated_subscribers,
                avg_views,
                engagement_rate,
                avg_cpm,
                current_price,
                risk_profile,
            }
            .validate_and_into_inputs(settings.default_risk_profile)?;

            let rec = pricing::recommend(&inputs.audience, inputs.current_price, inputs.risk_profile);
            let baseline = analytics::baseline_revenue(
                inputs.audience.estimated_subscribers,
                inputs.current_price,
                None,
            );
            tracing::info!(
                risk_profile = %inputs.risk_profile,
                suggested_sub_price = rec.suggested_sub_price,
                "pricing recommendation computed"
            );
            Ok(json!({ "baseline": baseline, "recommendation": rec }))
        }

        Command::Experiment {
            name,
            control_price,
            test_price,
            control_new_subs,
            test_new_subs,
            days_running,
            control_seen,
            test_seen,
        } => {
            let exp = contract::validate_experiment(PricingExperiment {
                name,
                control_price,
                test_price,
                control_new_subs,
                test_new_subs,
                days_running,
                control_seen,
                test_seen,
            })?;
            let summary = experiments::summarize_pricing_experiment(&exp);
            Ok(serde_json::to_value(summary)?)
        }

        Command::Churn {
            active_subs,
            cancels_30d,
            payment_fails,
            inactive_14d,
        } => {
            let estimate = churn::estimate_monthly_churn(active_subs, cancels_30d);
            let at_risk = churn::at_risk_heuristics(payment_fails, inactive_14d);
            let profile = StrategyRequest::default().validate_and_into_profile()?;
            Ok(json!({
                "churn": estimate,
                "at_risk": at_risk,
                "win_back": strategy::win_back_template(&profile),
            }))
        }

        Command::Earnings {
            monthly_posts,
            avg_views,
            avg_cpm,
        } => {
            let req = EarningsRequest {
                monthly_posts,
                avg_views,
                avg_cpm,
            };
            let posts = req.validate()?;
            Ok(serde_json::to_value(analytics::estimate_earnings(
                posts, avg_views, avg_cpm,
            ))?)
        }

        Command::Benchmark {
            followers,
            avg_views,
            engagement_rate,
            avg_cpm,
            cohort_size,
            seed,
        } => {
            let req = BenchmarkRequest {
                followers,
                avg_views,
                engagement_rate,
                avg_cpm,
                cohort_size,
                seed,
            };
            let params = req.validate_params()?;
            let size = cohort_size.unwrap_or(settings.cohort_size);
            let seed = seed.or(settings.cohort_seed);

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let cohort = analytics::generate_synthetic_cohort(&params, size, &mut rng);
            let benchmark = analytics::benchmark(&cohort, &params);
            tracing::info!(size, ?seed, "cohort benchmark computed");
            Ok(serde_json::to_value(benchmark)?)
        }

        Command::Playbook {
            handle,
            profile_name,
            platform,
        } => {
            let profile = StrategyRequest {
                platform,
                handle,
                profile_name,
            }
            .validate_and_into_profile()
            .context("invalid playbook profile")?;
            Ok(json!({
                "dm_suggestions": strategy::dm_reachout_suggestions(&profile),
                "whale_ideas": strategy::whale_upsell_ideas(),
            }))
        }
    }
}
