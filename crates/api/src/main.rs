use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use silent_partner_core::analytics::{
    self, BaselineRevenue, CohortBenchmark, EarningsEstimate,
};
use silent_partner_core::churn::{self, AtRiskAssessment, ChurnEstimate};
use silent_partner_core::config::Settings;
use silent_partner_core::domain::contract::{
    self, BaselineRequest, BenchmarkRequest, EarningsRequest, PricingRequest, ProfileRequest,
    StrategyRequest,
};
use silent_partner_core::domain::pricing::PricingRecommendation;
use silent_partner_core::domain::profile::CreatorProfile;
use silent_partner_core::experiments::{self, ExperimentSummary, PricingExperiment};
use silent_partner_core::pricing;
use silent_partner_core::profile;
use silent_partner_core::strategy::{self, DmSuggestion, WhaleIdea};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port));
    let app = router(AppState { settings });

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/profile/interpret", post(interpret_profile))
        .route("/pricing", post(recommend_pricing))
        .route("/experiments/summary", post(summarize_experiment))
        .route("/churn/estimate", post(estimate_churn))
        .route("/churn/risk", post(assess_at_risk))
        .route("/strategy/dm", post(dm_playbooks))
        .route("/strategy/whales", post(whale_ideas))
        .route("/earnings", post(estimate_earnings))
        .route("/baseline", post(baseline))
        .route("/cohort/benchmark", post(cohort_benchmark))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    settings: Settings,
}

#[derive(Debug, Deserialize)]
struct ChurnRequest {
    active_subs: i64,
    #[serde(default)]
    cancels_30d: i64,
}

#[derive(Debug, Deserialize)]
struct AtRiskRequest {
    #[serde(default)]
    payment_fails: i64,
    #[serde(default)]
    inactive_14d: i64,
}

async fn interpret_profile(
    Json(req): Json<ProfileRequest>,
) -> Result<Json<CreatorProfile>, StatusCode> {
    let profile = profile::interpret_page(&req.handle, &req.platform, req.page)
        .await
        .map_err(|err| bad_request(err.into()))?;
    Ok(Json(profile))
}

async fn recommend_pricing(
    State(state): State<AppState>,
    Json(req): Json<PricingRequest>,
) -> Result<Json<PricingRecommendation>, StatusCode> {
    let inputs = req
        .validate_and_into_inputs(state.settings.default_risk_profile)
        .map_err(bad_request)?;

    let rec = pricing::recommend(&inputs.audience, inputs.current_price, inputs.risk_profile);
    tracing::info!(
        followers = inputs.audience.followers,
        risk_profile = %inputs.risk_profile,
        suggested_sub_price = rec.suggested_sub_price,
        test_price = rec.pricing_test.test_price,
        "pricing recommendation served"
    );
    Ok(Json(rec))
}

async fn summarize_experiment(
    Json(exp): Json<PricingExperiment>,
) -> Result<Json<ExperimentSummary>, StatusCode> {
    let exp = contract::validate_experiment(exp).map_err(bad_request)?;
    Ok(Json(experiments::summarize_pricing_experiment(&exp)))
}

async fn estimate_churn(Json(req): Json<ChurnRequest>) -> Json<ChurnEstimate> {
    Json(churn::estimate_monthly_churn(req.active_subs, req.cancels_30d))
}

async fn assess_at_risk(Json(req): Json<AtRiskRequest>) -> Json<AtRiskAssessment> {
    Json(churn::at_risk_heuristics(req.payment_fails, req.inactive_14d))
}

async fn dm_playbooks(
    Json(req): Json<StrategyRequest>,
) -> Result<Json<Vec<DmSuggestion>>, StatusCode> {
    let profile = req.validate_and_into_profile().map_err(bad_request)?;
    Ok(Json(strategy::dm_reachout_suggestions(&profile)))
}

async fn whale_ideas() -> Json<Vec<WhaleIdea>> {
    Json(strategy::whale_upsell_ideas())
}

async fn estimate_earnings(
    Json(req): Json<EarningsRequest>,
) -> Result<Json<EarningsEstimate>, StatusCode> {
    let monthly_posts = req.validate().map_err(bad_request)?;
    Ok(Json(analytics::estimate_earnings(
        monthly_posts,
        req.avg_views,
        req.avg_cpm,
    )))
}

async fn baseline(Json(req): Json<BaselineRequest>) -> Result<Json<BaselineRevenue>, StatusCode> {
    req.validate().map_err(bad_request)?;
    Ok(Json(analytics::baseline_revenue(
        req.estimated_subscribers,
        req.current_price,
        req.estimated_monthly_visits,
    )))
}

async fn cohort_benchmark(
    State(state): State<AppState>,
    Json(req): Json<BenchmarkRequest>,
) -> Result<Json<CohortBenchmark>, StatusCode> {
    let params = req.validate_params().map_err(bad_request)?;
    let size = req.cohort_size.unwrap_or(state.settings.cohort_size);

    let mut rng = match req.seed.or(state.settings.cohort_seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let cohort = analytics::generate_synthetic_cohort(&params, size, &mut rng);
    Ok(Json(analytics::benchmark(&cohort, &params)))
}

fn bad_request(err: anyhow::Error) -> StatusCode {
    sentry_anyhow::capture_anyhow(&err);
    tracing::warn!(error = %err, "rejected request");
    StatusCode::BAD_REQUEST
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.require_sentry_dsn().ok()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
