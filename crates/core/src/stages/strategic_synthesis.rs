use crate::domain::competitive::{CompetitiveHealthResult, CompetitivePosition};
use crate::domain::forecast::{CostDriver, ForecastDigest, TrendDirection};
use crate::domain::inputs::{BusinessContext, Commodity, UrgencyLevel};
use crate::domain::production::{Outlook, ProductionOutlook};
use crate::domain::strategy::{
    ActionItem, DecisionMetadata, Recommendation, RiskBreakdown, RiskType, StrategicReport,
    StrategicSummary,
};
use crate::domain::warning::{AlertLevel, EarlyWarningResult};
use crate::stages::round2;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

const EXPLANATION_MAX_CHARS: usize = 200;

/// Everything the synthesis stage consumes: the stage-1 digest, the
/// stage 2-4 results, and the caller's business context.
#[derive(Debug, Clone)]
pub struct SynthesisInputs<'a> {
    pub forecast: &'a ForecastDigest,
    pub warning: &'a EarlyWarningResult,
    pub production: &'a ProductionOutlook,
    pub competitive: &'a CompetitiveHealthResult,
    pub business: &'a BusinessContext,
}

/// Combines the four upstream results into one recommendation.
pub fn generate(
    commodity: Commodity,
    inputs: &SynthesisInputs<'_>,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> StrategicReport {
    let trend = inputs.forecast.trend_direction;
    let alert = inputs.warning.supply_alert_level;
    let outlook = inputs.production.production_outlook;

    let risk_breakdown = score_risks(inputs);
    let dominant_risk_type = dominant_risk(&risk_breakdown);

    let recommendation = if alert == AlertLevel::High {
        if inputs.business.current_inventory_days < 30 {
            Recommendation::BuyNow
        } else {
            Recommendation::DiversifySuppliers
        }
    } else if trend == TrendDirection::Rising
        && inputs.business.urgency_level == UrgencyLevel::High
    {
        Recommendation::BuyNow
    } else {
        Recommendation::Delay
    };

    let confidence_level =
        round2((inputs.production.reliability_score * 0.5 + 0.4).min(1.0));

    let explanation_text = explanation(
        recommendation,
        trend,
        outlook,
        inputs.competitive.competitive_position,
    );

    let action_items = action_items(recommendation, today);

    StrategicReport {
        data: StrategicSummary {
            commodity_id: commodity,
            dominant_risk_type,
            recommendation,
            confidence_level,
            explanation_text,
            action_items,
            risk_breakdown,
        },
        metadata: DecisionMetadata {
            decision_id: Uuid::new_v4(),
            decision_timestamp: now,
            valid_until: now + Duration::hours(24),
            model_confidence: confidence_level,
        },
    }
}

/// Fixed base per dimension, fixed increment per trigger, clamped to [0, 1].
fn score_risks(inputs: &SynthesisInputs<'_>) -> RiskBreakdown {
    let mut global: f64 = 0.3;
    if inputs.forecast.trend_direction == TrendDirection::Rising {
        global += 0.3;
    }
    if inputs.warning.supply_alert_level == AlertLevel::High {
        global += 0.2;
    }

    let mut local: f64 = 0.2;
    match inputs.production.production_outlook {
        Outlook::Weak => local += 0.4,
        Outlook::Medium => local += 0.2,
        Outlook::Good => {}
    }

    let mut logistic: f64 = 0.2;
    if inputs.forecast.main_cost_driver == CostDriver::ShippingCost {
        logistic += 0.3;
    }
    if inputs.competitive.margin_pressure_level.is_elevated() {
        logistic += 0.2;
    }

    RiskBreakdown {
        global_risk_score: round2(global.min(1.0)),
        local_risk_score: round2(local.min(1.0)),
        logistic_risk_score: round2(logistic.min(1.0)),
    }
}

/// Argmax with a fixed priority order on exact ties: Global > Local >
/// Logistic.
fn dominant_risk(breakdown: &RiskBreakdown) -> RiskType {
    let ranked = [
        (RiskType::Global, breakdown.global_risk_score),
        (RiskType::Local, breakdown.local_risk_score),
        (RiskType::Logistic, breakdown.logistic_risk_score),
    ];
    let mut best = ranked[0];
    for candidate in &ranked[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

fn explanation(
    recommendation: Recommendation,
    trend: TrendDirection,
    outlook: Outlook,
    position: CompetitivePosition,
) -> String {
    let text = match recommendation {
        Recommendation::BuyNow => format!(
            "{} costs with {} local production. Secure supply before Q2 surge.",
            trend_label_capitalized(trend),
            outlook_label(outlook),
        ),
        Recommendation::Delay => format!(
            "Costs {}. Low alert level. Wait for better pricing opportunities.",
            trend_label(trend),
        ),
        Recommendation::DiversifySuppliers => format!(
            "High supply risk with {} position. Consider alternative suppliers.",
            position_label(position),
        ),
    };
    text.chars().take(EXPLANATION_MAX_CHARS).collect()
}

fn action_items(recommendation: Recommendation, today: NaiveDate) -> Vec<ActionItem> {
    match recommendation {
        Recommendation::BuyNow => vec![
            ActionItem {
                priority: 1,
                action: "Lock shipping contracts".to_string(),
                deadline: today + Duration::days(7),
            },
            ActionItem {
                priority: 2,
                action: "Increase inventory to 45 days".to_string(),
                deadline: today + Duration::days(14),
            },
        ],
        Recommendation::DiversifySuppliers => vec![ActionItem {
            priority: 1,
            action: "Contact alternative suppliers".to_string(),
            deadline: today + Duration::days(5),
        }],
        Recommendation::Delay => vec![ActionItem {
            priority: 1,
            action: "Monitor market conditions weekly".to_string(),
            deadline: today + Duration::days(30),
        }],
    }
}

fn trend_label(trend: TrendDirection) -> &'static str {
    match trend {
        TrendDirection::Rising => "rising",
        TrendDirection::Falling => "falling",
        TrendDirection::Stable => "stable",
    }
}

fn trend_label_capitalized(trend: TrendDirection) -> &'static str {
    match trend {
        TrendDirection::Rising => "Rising",
        TrendDirection::Falling => "Falling",
        TrendDirection::Stable => "Stable",
    }
}

fn outlook_label(outlook: Outlook) -> &'static str {
    match outlook {
        Outlook::Weak => "weak",
        Outlook::Medium => "medium",
        Outlook::Good => "good",
    }
}

fn position_label(position: CompetitivePosition) -> &'static str {
    match position {
        CompetitivePosition::Advantaged => "advantaged",
        CompetitivePosition::Neutral => "neutral",
        CompetitivePosition::Disadvantaged => "disadvantaged",
    }
}
