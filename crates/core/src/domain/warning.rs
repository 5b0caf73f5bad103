use crate::domain::inputs::Commodity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertDetails {
    pub peak_date: NaiveDate,
    pub peak_cost: f64,
    /// Floored at 0 when the peak is already behind the reference date.
    pub days_until_peak: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlyWarningResult {
    pub commodity_id: Commodity,
    pub supply_alert_level: AlertLevel,
    pub expected_increase_percentage: f64,
    pub trigger_reason: String,
    pub alert_details: AlertDetails,
    pub recommended_action: String,
}
