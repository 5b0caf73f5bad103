use crate::domain::inputs::Commodity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dominant contributor to a predicted landed cost. Wire labels match the
/// upstream feature names the dashboards already consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostDriver {
    #[serde(rename = "Anomaly_Price_Global")]
    GlobalPriceAnomaly,
    #[serde(rename = "Index_Cost_Shipping")]
    ShippingCost,
    #[serde(rename = "Premium_Insurance_Risk_War")]
    InsuranceRiskPremium,
    #[serde(rename = "Index_Stress_Chain_Supply")]
    SupplyChainStress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostPrediction {
    pub date: NaiveDate,
    pub predicted_landed_cost_usd: f64,
    /// 0.0-1.0, non-increasing with forecast horizon.
    pub confidence_score: f64,
    pub main_cost_driver: CostDriver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub avg_cost: f64,
    pub min_cost: f64,
    pub max_cost: f64,
    pub trend_direction: TrendDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostForecast {
    pub commodity_id: Commodity,
    pub predictions: Vec<CostPrediction>,
    pub summary: ForecastSummary,
}

/// The slice of a forecast the synthesis stage consumes: the summary plus
/// the lead prediction's driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDigest {
    pub avg_predicted_cost: f64,
    pub trend_direction: TrendDirection,
    pub main_cost_driver: CostDriver,
}

impl CostForecast {
    pub fn digest(&self) -> ForecastDigest {
        ForecastDigest {
            avg_predicted_cost: self.summary.avg_cost,
            trend_direction: self.summary.trend_direction,
            // predict() always emits at least one point.
            main_cost_driver: self.predictions[0].main_cost_driver,
        }
    }
}
