use crate::domain::inputs::Commodity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlook {
    Weak,
    Medium,
    Good,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactFactor {
    pub factor: String,
    pub impact: Impact,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionOutlook {
    pub region_id: String,
    pub commodity_id: Commodity,
    pub production_outlook: Outlook,
    /// 0.0-1.0 data-quality estimate.
    pub reliability_score: f64,
    /// Ordered by weight, heaviest first.
    pub impact_factors: Vec<ImpactFactor>,
    pub expected_yield_change_pct: f64,
}
