use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use supplyrisk_core::domain::inputs::Commodity;
use supplyrisk_core::pipeline::{self, DashboardView, PipelineContext};
use supplyrisk_core::scenario::{ScenarioSource, SimulatedScenario};

#[derive(Debug, Parser)]
#[command(name = "supplyrisk_worker")]
struct Args {
    /// Commodity to assess (wheat|sugar|oil).
    #[arg(long, default_value = "wheat")]
    commodity: String,

    /// Reference date (YYYY-MM-DD). Defaults to today (UTC).
    #[arg(long)]
    as_of_date: Option<String>,

    /// Seed for a reproducible run. Falls back to SUPPLY_RNG_SEED, then
    /// to entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print the dashboard JSON.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = supplyrisk_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let commodity: Commodity = args.commodity.parse()?;
    let as_of_date = resolve_as_of_date(args.as_of_date.as_deref())?;
    let seed = args.seed.or(settings.rng_seed);

    let scenario = SimulatedScenario::new(settings.region_or_default(), seed);
    let mut request = scenario.load(commodity, as_of_date).await?;
    if request.alert_thresholds.is_none() {
        request.alert_thresholds = settings.alert_thresholds();
    }

    let ctx = PipelineContext::at(as_of_date, chrono::Utc::now(), seed);

    let assessment = match pipeline::run_pipeline(&ctx, &request).await {
        Ok(assessment) => assessment,
        Err(err) => {
            let err = anyhow::Error::new(err);
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(%as_of_date, error = %err, "risk assessment failed");
            return Err(err);
        }
    };

    tracing::info!(
        %as_of_date,
        commodity = commodity.as_str(),
        alert = ?assessment.early_warning.supply_alert_level,
        recommendation = ?assessment.strategy.data.recommendation,
        confidence = assessment.strategy.data.confidence_level,
        "risk assessment generated"
    );

    let view = DashboardView::from_assessment(&assessment);
    let json = if args.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    println!("{json}");

    Ok(())
}

fn init_sentry(
    settings: &supplyrisk_core::config::Settings,
) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

fn resolve_as_of_date(as_of_date_arg: Option<&str>) -> anyhow::Result<chrono::NaiveDate> {
    match as_of_date_arg {
        Some(s) => chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --as-of-date: {s}")),
        None => Ok(chrono::Utc::now().date_naive()),
    }
}
