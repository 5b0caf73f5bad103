use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tracked import commodities. The base landed cost per commodity is a
/// fixed reference constant in USD/ton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commodity {
    Wheat,
    Sugar,
    Oil,
}

impl Commodity {
    pub fn base_cost_usd(self) -> f64 {
        match self {
            Commodity::Wheat => 550.0,
            Commodity::Sugar => 750.0,
            Commodity::Oil => 1500.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Commodity::Wheat => "wheat",
            Commodity::Sugar => "sugar",
            Commodity::Oil => "oil",
        }
    }
}

impl std::str::FromStr for Commodity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wheat" => Ok(Commodity::Wheat),
            "sugar" => Ok(Commodity::Sugar),
            "oil" => Ok(Commodity::Oil),
            other => anyhow::bail!("unknown commodity: {other}"),
        }
    }
}

/// Market-side drivers of landed cost. Immutable per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketIndicators {
    /// USD/ton deviation from the global reference price.
    pub global_price_anomaly: f64,
    /// 0-200 scale.
    pub shipping_index: f64,
    /// 0.0-1.0.
    pub insurance_risk_index: f64,
    /// 0-100.
    pub supply_chain_stress_index: f64,
}

/// One observed or predicted cost at a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostPoint {
    pub date: NaiveDate,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalBaseline {
    pub avg_cost_30d: f64,
    pub avg_cost_90d: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub medium_pct: f64,
    pub high_pct: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            medium_pct: 10.0,
            high_pct: 15.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentalData {
    /// Vegetation health, 0.0-1.0.
    pub ndvi_index: f64,
    /// Deviation from normal rainfall (mm).
    pub rainfall_anomaly: f64,
    /// Deviation from normal temperature (deg C), when available.
    pub temperature_anomaly: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalFactor {
    Planting,
    Growing,
    Harvest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingData {
    /// USD/ton.
    pub local_market_price: f64,
    /// USD/ton.
    pub landed_cost: f64,
    /// Relative index, 100 = parity with competitors.
    pub competitor_price_index: f64,
}

/// Optional qualitative market context for the competitive stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketContext {
    pub market_share_pct: Option<f64>,
    pub demand_trend: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessContext {
    pub current_inventory_days: i32,
    pub budget_available: f64,
    pub urgency_level: UrgencyLevel,
}
