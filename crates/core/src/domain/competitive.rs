use crate::domain::inputs::Commodity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginPressure {
    Low,
    Moderate,
    High,
    Critical,
}

impl MarginPressure {
    pub fn is_elevated(self) -> bool {
        matches!(self, MarginPressure::High | MarginPressure::Critical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompetitivePosition {
    Advantaged,
    Neutral,
    Disadvantaged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingAction {
    IncreasePrices,
    HoldPrices,
    MaintainStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRecommendation {
    pub action: PricingAction,
    pub target_price: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitiveHealthResult {
    pub commodity_id: Commodity,
    pub usd_spread_price_market: f64,
    pub margin_pressure_level: MarginPressure,
    pub gross_margin_pct: f64,
    pub competitive_position: CompetitivePosition,
    pub pricing_recommendation: PricingRecommendation,
}
