use crate::domain::inputs::Commodity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskType {
    Global,
    Local,
    Logistic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Buy Now")]
    BuyNow,
    Delay,
    #[serde(rename = "Diversify Suppliers")]
    DiversifySuppliers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub priority: i32,
    pub action: String,
    pub deadline: NaiveDate,
}

/// Per-dimension risk scores, each in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub global_risk_score: f64,
    pub local_risk_score: f64,
    pub logistic_risk_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicSummary {
    pub commodity_id: Commodity,
    pub dominant_risk_type: RiskType,
    pub recommendation: Recommendation,
    pub confidence_level: f64,
    /// At most 200 characters.
    pub explanation_text: String,
    pub action_items: Vec<ActionItem>,
    pub risk_breakdown: RiskBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionMetadata {
    pub decision_id: Uuid,
    pub decision_timestamp: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub model_confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicReport {
    pub data: StrategicSummary,
    pub metadata: DecisionMetadata,
}
