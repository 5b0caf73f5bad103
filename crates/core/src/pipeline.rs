use crate::domain::competitive::{CompetitiveHealthResult, CompetitivePosition};
use crate::domain::forecast::{CostDriver, CostForecast, TrendDirection};
use crate::domain::inputs::{
    AlertThresholds, BusinessContext, Commodity, CostPoint, EnvironmentalData,
    HistoricalBaseline, MarketContext, MarketIndicators, PricingData, SeasonalFactor,
};
use crate::domain::production::{Outlook, ProductionOutlook};
use crate::domain::strategy::{ActionItem, Recommendation, RiskBreakdown, StrategicReport};
use crate::domain::warning::{AlertLevel, EarlyWarningResult};
use crate::error::PipelineError;
use crate::sampling::{Sampler, StdSampler, ZeroSampler};
use crate::stages::{
    competitive_health, cost_forecast, early_warning, local_production,
    strategic_synthesis::{self, SynthesisInputs},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Explicitly constructed, request-scoped dependencies for one pipeline
/// run: the reference clock and the randomness policy. Owned by the
/// serving layer; nothing in here is process-global.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub today: NaiveDate,
    pub now: DateTime<Utc>,
    randomness: Randomness,
}

#[derive(Debug, Clone, Copy)]
enum Randomness {
    Entropy,
    Seeded(u64),
    Zero,
}

impl PipelineContext {
    pub fn new(seed: Option<u64>) -> Self {
        let now = Utc::now();
        Self::at(now.date_naive(), now, seed)
    }

    pub fn at(today: NaiveDate, now: DateTime<Utc>, seed: Option<u64>) -> Self {
        Self {
            today,
            now,
            randomness: match seed {
                Some(seed) => Randomness::Seeded(seed),
                None => Randomness::Entropy,
            },
        }
    }

    /// All stage draws collapse to their deterministic floor.
    pub fn zero_variance(today: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            today,
            now,
            randomness: Randomness::Zero,
        }
    }

    /// Independent sampler per stage so concurrent stages never share a
    /// mutable RNG. Seeded runs derive one deterministic stream per
    /// stream id.
    fn sampler(&self, stream: u64) -> Box<dyn Sampler> {
        match self.randomness {
            Randomness::Entropy => Box::new(StdSampler::from_entropy()),
            Randomness::Seeded(seed) => Box::new(StdSampler::from_seed(
                seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15),
            )),
            Randomness::Zero => Box::new(ZeroSampler),
        }
    }
}

/// One fully specified pipeline invocation. Baseline and pricing may be
/// omitted; the coordinator then derives them from the forecast the way
/// the combined dashboard endpoint does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub commodity_id: Commodity,
    pub region_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub market_indicators: MarketIndicators,
    pub historical_baseline: Option<HistoricalBaseline>,
    pub alert_thresholds: Option<AlertThresholds>,
    pub environmental_data: EnvironmentalData,
    pub seasonal_factor: SeasonalFactor,
    pub pricing_data: Option<PricingData>,
    pub market_context: Option<MarketContext>,
    pub business_context: BusinessContext,
}

/// All five stage outputs for one request. Request-scoped; dropped once
/// serialized.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub cost_forecast: CostForecast,
    pub early_warning: EarlyWarningResult,
    pub local_production: ProductionOutlook,
    pub competitive_health: CompetitiveHealthResult,
    pub strategy: StrategicReport,
}

/// Runs the five stages: forecast first, then warning/production/health
/// fanned out, then synthesis over all four. Stage failures are not
/// caught here; a partial synthesis is not meaningful.
pub async fn run_pipeline(
    ctx: &PipelineContext,
    request: &PipelineRequest,
) -> Result<RiskAssessment, PipelineError> {
    let forecast = cost_forecast::predict(
        request.commodity_id,
        request.start_date,
        request.end_date,
        &request.market_indicators,
        ctx.sampler(0).as_mut(),
    )?;
    tracing::debug!(
        commodity = request.commodity_id.as_str(),
        points = forecast.predictions.len(),
        trend = ?forecast.summary.trend_direction,
        "cost forecast computed"
    );

    let baseline = request
        .historical_baseline
        .clone()
        .unwrap_or_else(|| derived_baseline(&forecast));
    let pricing = request
        .pricing_data
        .clone()
        .unwrap_or_else(|| derived_pricing(&forecast, ctx.sampler(2).as_mut()));
    let points: Vec<CostPoint> = forecast
        .predictions
        .iter()
        .map(|p| CostPoint {
            date: p.date,
            cost: p.predicted_landed_cost_usd,
        })
        .collect();

    let mut production_sampler = ctx.sampler(1);
    let (warning, production, health) = tokio::join!(
        async {
            early_warning::analyze(
                request.commodity_id,
                &points,
                Some(&baseline),
                request.alert_thresholds,
                ctx.today,
            )
        },
        async {
            local_production::analyze(
                &request.region_id,
                request.commodity_id,
                &request.environmental_data,
                request.seasonal_factor,
                ctx.today,
                production_sampler.as_mut(),
            )
        },
        async {
            competitive_health::analyze(
                request.commodity_id,
                &pricing,
                request.market_context.as_ref(),
            )
        },
    );
    let warning = warning?;
    let health = health?;

    let digest = forecast.digest();
    let strategy = strategic_synthesis::generate(
        request.commodity_id,
        &SynthesisInputs {
            forecast: &digest,
            warning: &warning,
            production: &production,
            competitive: &health,
            business: &request.business_context,
        },
        ctx.today,
        ctx.now,
    );

    tracing::info!(
        commodity = request.commodity_id.as_str(),
        alert = ?warning.supply_alert_level,
        outlook = ?production.production_outlook,
        recommendation = ?strategy.data.recommendation,
        "risk assessment complete"
    );

    Ok(RiskAssessment {
        cost_forecast: forecast,
        early_warning: warning,
        local_production: production,
        competitive_health: health,
        strategy,
    })
}

/// Stand-in baseline when no history is supplied, anchored to the
/// forecast average.
fn derived_baseline(forecast: &CostForecast) -> HistoricalBaseline {
    let avg = forecast.summary.avg_cost;
    HistoricalBaseline {
        avg_cost_30d: avg * 0.95,
        avg_cost_90d: avg * 0.90,
        std_dev: 50.0,
    }
}

/// Stand-in pricing when none is supplied: local market carries a 15%
/// markup over the average landed cost.
fn derived_pricing(forecast: &CostForecast, sampler: &mut dyn Sampler) -> PricingData {
    let avg = forecast.summary.avg_cost;
    PricingData {
        local_market_price: avg * 1.15,
        landed_cost: avg,
        competitor_price_index: sampler.uniform(95.0, 110.0),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardKpis {
    pub avg_predicted_cost: f64,
    pub supply_alert_level: AlertLevel,
    pub production_outlook: Outlook,
    pub competitive_position: CompetitivePosition,
    pub trend_direction: TrendDirection,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardPrediction {
    pub date: NaiveDate,
    pub cost: f64,
    pub confidence: f64,
    pub driver: CostDriver,
}

/// The condensed payload the dashboard front-ends consume.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub commodity_id: Commodity,
    pub kpis: DashboardKpis,
    pub cost_predictions: Vec<DashboardPrediction>,
    pub risk_breakdown: RiskBreakdown,
    pub recommendation: Recommendation,
    pub action_items: Vec<ActionItem>,
}

impl DashboardView {
    pub fn from_assessment(assessment: &RiskAssessment) -> Self {
        Self {
            commodity_id: assessment.cost_forecast.commodity_id,
            kpis: DashboardKpis {
                avg_predicted_cost: assessment.cost_forecast.summary.avg_cost,
                supply_alert_level: assessment.early_warning.supply_alert_level,
                production_outlook: assessment.local_production.production_outlook,
                competitive_position: assessment.competitive_health.competitive_position,
                trend_direction: assessment.cost_forecast.summary.trend_direction,
                confidence_score: assessment.local_production.reliability_score,
            },
            cost_predictions: assessment
                .cost_forecast
                .predictions
                .iter()
                .map(|p| DashboardPrediction {
                    date: p.date,
                    cost: p.predicted_landed_cost_usd,
                    confidence: p.confidence_score,
                    driver: p.main_cost_driver,
                })
                .collect(),
            risk_breakdown: assessment.strategy.data.risk_breakdown,
            recommendation: assessment.strategy.data.recommendation,
            action_items: assessment.strategy.data.action_items.clone(),
        }
    }
}
