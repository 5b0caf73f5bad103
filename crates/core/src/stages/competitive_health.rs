use crate::domain::competitive::{
    CompetitiveHealthResult, CompetitivePosition, MarginPressure, PricingAction,
    PricingRecommendation,
};
use crate::domain::inputs::{Commodity, MarketContext, PricingData};
use crate::error::PipelineError;
use crate::stages::{round1, round2};

/// Scores margin and price pressure from local pricing against landed
/// cost and the competitor index.
pub fn analyze(
    commodity: Commodity,
    pricing: &PricingData,
    _market_context: Option<&MarketContext>,
) -> Result<CompetitiveHealthResult, PipelineError> {
    let local_price = pricing.local_market_price;
    if local_price <= 0.0 {
        return Err(PipelineError::InvalidPrice {
            local_market_price: local_price,
        });
    }

    let spread = local_price - pricing.landed_cost;
    let gross_margin_pct = spread / local_price * 100.0;

    let margin_pressure = if gross_margin_pct >= 15.0 {
        MarginPressure::Low
    } else if gross_margin_pct >= 10.0 {
        MarginPressure::Moderate
    } else if gross_margin_pct >= 5.0 {
        MarginPressure::High
    } else {
        MarginPressure::Critical
    };

    let competitive_position = if pricing.competitor_price_index > 105.0 {
        CompetitivePosition::Advantaged
    } else if pricing.competitor_price_index >= 95.0 {
        CompetitivePosition::Neutral
    } else {
        CompetitivePosition::Disadvantaged
    };

    let pricing_recommendation = if margin_pressure.is_elevated() {
        if pricing.competitor_price_index > 100.0 {
            PricingRecommendation {
                action: PricingAction::IncreasePrices,
                target_price: round2(local_price * 1.05),
                rationale: "Competitor prices higher; opportunity to improve margins"
                    .to_string(),
            }
        } else {
            PricingRecommendation {
                action: PricingAction::HoldPrices,
                target_price: local_price,
                rationale: "Competitor prices expected to rise; maintain position"
                    .to_string(),
            }
        }
    } else {
        PricingRecommendation {
            action: PricingAction::MaintainStrategy,
            target_price: local_price,
            rationale: "Current pricing optimal for market conditions".to_string(),
        }
    };

    Ok(CompetitiveHealthResult {
        commodity_id: commodity,
        usd_spread_price_market: round2(spread),
        margin_pressure_level: margin_pressure,
        gross_margin_pct: round1(gross_margin_pct),
        competitive_position,
        pricing_recommendation,
    })
}
