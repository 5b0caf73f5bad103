use crate::domain::inputs::{
    BusinessContext, Commodity, EnvironmentalData, MarketIndicators, SeasonalFactor,
    UrgencyLevel,
};
use crate::pipeline::PipelineRequest;
use crate::sampling::{Sampler, StdSampler};
use chrono::{Duration, NaiveDate};

const FORECAST_HORIZON_DAYS: i64 = 90;

/// Supplies fully populated pipeline requests. Implementations may read
/// live feeds; the bundled one simulates plausible market conditions.
#[async_trait::async_trait]
pub trait ScenarioSource: Send + Sync {
    async fn load(
        &self,
        commodity: Commodity,
        reference_date: NaiveDate,
    ) -> anyhow::Result<PipelineRequest>;
}

/// Draws indicators from the ranges the demo dashboards use. Baseline and
/// pricing are left unset so the coordinator derives them from the
/// forecast.
pub struct SimulatedScenario {
    pub region_id: String,
    pub seed: Option<u64>,
}

impl SimulatedScenario {
    pub fn new(region_id: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            region_id: region_id.into(),
            seed,
        }
    }
}

#[async_trait::async_trait]
impl ScenarioSource for SimulatedScenario {
    async fn load(
        &self,
        commodity: Commodity,
        reference_date: NaiveDate,
    ) -> anyhow::Result<PipelineRequest> {
        let mut sampler = StdSampler::new(self.seed);

        let market_indicators = MarketIndicators {
            global_price_anomaly: sampler.uniform(-50.0, 100.0),
            shipping_index: sampler.uniform(80.0, 150.0),
            insurance_risk_index: sampler.uniform(0.1, 0.5),
            supply_chain_stress_index: sampler.uniform(30.0, 70.0),
        };

        let environmental_data = EnvironmentalData {
            ndvi_index: sampler.uniform(0.4, 0.8),
            rainfall_anomaly: sampler.uniform(-30.0, 30.0),
            temperature_anomaly: Some(sampler.uniform(-2.0, 2.0)),
        };

        Ok(PipelineRequest {
            commodity_id: commodity,
            region_id: self.region_id.clone(),
            start_date: reference_date,
            end_date: reference_date + Duration::days(FORECAST_HORIZON_DAYS),
            market_indicators,
            historical_baseline: None,
            alert_thresholds: None,
            environmental_data,
            seasonal_factor: SeasonalFactor::Growing,
            pricing_data: None,
            market_context: None,
            business_context: BusinessContext {
                current_inventory_days: 25,
                budget_available: 500_000.0,
                urgency_level: UrgencyLevel::Medium,
            },
        })
    }
}
