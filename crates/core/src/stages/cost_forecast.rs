use crate::domain::forecast::{
    CostDriver, CostForecast, CostPrediction, ForecastSummary, TrendDirection,
};
use crate::domain::inputs::{Commodity, MarketIndicators};
use crate::error::PipelineError;
use crate::sampling::Sampler;
use crate::stages::round2;
use chrono::{Duration, NaiveDate};

const STEP_DAYS: i64 = 30;
const DRIFT_PER_STEP_USD: f64 = 5.0;
const PERTURBATION_SCALE_USD: f64 = 20.0;
const CONFIDENCE_FLOOR: f64 = 0.6;
const CONFIDENCE_DECAY_PER_STEP: f64 = 0.05;

/// Projects landed cost for `commodity` over the inclusive date range at a
/// monthly cadence. Fails fast with `InvalidRange` when the range is
/// inverted.
pub fn predict(
    commodity: Commodity,
    start_date: NaiveDate,
    end_date: NaiveDate,
    indicators: &MarketIndicators,
    sampler: &mut dyn Sampler,
) -> Result<CostForecast, PipelineError> {
    if end_date < start_date {
        return Err(PipelineError::InvalidRange {
            start: start_date,
            end: end_date,
        });
    }

    // start <= end, so this yields at least one date.
    let mut dates = Vec::new();
    let mut current = start_date;
    while current <= end_date {
        dates.push(current);
        current = current + Duration::days(STEP_DAYS);
    }

    let base_cost = commodity.base_cost_usd();
    let main_driver = dominant_driver(indicators);

    let mut predictions = Vec::with_capacity(dates.len());
    for (step, date) in dates.into_iter().enumerate() {
        let mut cost = base_cost;
        cost += indicators.global_price_anomaly * 0.8;
        cost += indicators.shipping_index * 2.0;
        cost += indicators.insurance_risk_index * 100.0;
        cost += indicators.supply_chain_stress_index * 1.2;
        cost += step as f64 * DRIFT_PER_STEP_USD;
        cost += sampler.perturbation(PERTURBATION_SCALE_USD);

        let confidence =
            (0.95 - step as f64 * CONFIDENCE_DECAY_PER_STEP).max(CONFIDENCE_FLOOR);

        predictions.push(CostPrediction {
            date,
            predicted_landed_cost_usd: round2(cost),
            confidence_score: round2(confidence),
            main_cost_driver: main_driver,
        });
    }

    let summary = summarize(&predictions);

    Ok(CostForecast {
        commodity_id: commodity,
        predictions,
        summary,
    })
}

/// Argmax over the indicator magnitudes, first wins on ties. Order is
/// fixed: anomaly, shipping, insurance, stress.
fn dominant_driver(indicators: &MarketIndicators) -> CostDriver {
    let candidates = [
        (
            CostDriver::GlobalPriceAnomaly,
            indicators.global_price_anomaly.abs(),
        ),
        (CostDriver::ShippingCost, indicators.shipping_index),
        (
            CostDriver::InsuranceRiskPremium,
            indicators.insurance_risk_index * 100.0,
        ),
        (
            CostDriver::SupplyChainStress,
            indicators.supply_chain_stress_index,
        ),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

fn summarize(predictions: &[CostPrediction]) -> ForecastSummary {
    let costs: Vec<f64> = predictions
        .iter()
        .map(|p| p.predicted_landed_cost_usd)
        .collect();
    let avg = costs.iter().sum::<f64>() / costs.len() as f64;
    let min = costs.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = costs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let first = costs[0];
    let last = costs[costs.len() - 1];
    let trend = if last > first * 1.05 {
        TrendDirection::Rising
    } else if last < first * 0.95 {
        TrendDirection::Falling
    } else {
        TrendDirection::Stable
    };

    ForecastSummary {
        avg_cost: round2(avg),
        min_cost: round2(min),
        max_cost: round2(max),
        trend_direction: trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::ZeroSampler;

    fn quiet_market() -> MarketIndicators {
        MarketIndicators {
            global_price_anomaly: 0.0,
            shipping_index: 0.0,
            insurance_risk_index: 0.0,
            supply_chain_stress_index: 0.0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        let err = predict(
            Commodity::Wheat,
            date(2026, 6, 1),
            date(2026, 5, 1),
            &quiet_market(),
            &mut ZeroSampler,
        )
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_RANGE");
    }

    #[test]
    fn minimum_indicators_are_deterministic_without_noise() {
        let forecast = predict(
            Commodity::Wheat,
            date(2026, 1, 1),
            date(2026, 2, 15),
            &quiet_market(),
            &mut ZeroSampler,
        )
        .unwrap();

        let costs: Vec<f64> = forecast
            .predictions
            .iter()
            .map(|p| p.predicted_landed_cost_usd)
            .collect();
        // Base 550, +5 drift per 30-day step.
        assert_eq!(costs, vec![550.0, 555.0]);
    }

    #[test]
    fn short_range_still_yields_one_point() {
        let forecast = predict(
            Commodity::Sugar,
            date(2026, 3, 10),
            date(2026, 3, 10),
            &quiet_market(),
            &mut ZeroSampler,
        )
        .unwrap();
        assert_eq!(forecast.predictions.len(), 1);
        assert_eq!(forecast.predictions[0].predicted_landed_cost_usd, 750.0);
    }

    #[test]
    fn confidence_never_increases_and_floors_at_point_six() {
        let forecast = predict(
            Commodity::Oil,
            date(2026, 1, 1),
            date(2026, 12, 31),
            &quiet_market(),
            &mut ZeroSampler,
        )
        .unwrap();

        let confidences: Vec<f64> = forecast
            .predictions
            .iter()
            .map(|p| p.confidence_score)
            .collect();
        assert_eq!(confidences[0], 0.95);
        for pair in confidences.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        assert!(confidences.iter().all(|&c| c >= 0.6));
        assert_eq!(*confidences.last().unwrap(), 0.6);
    }

    #[test]
    fn long_drift_reads_as_rising() {
        // 7 points: 550 -> 580, above the 1.05 band edge of 577.5.
        let forecast = predict(
            Commodity::Wheat,
            date(2026, 1, 1),
            date(2026, 6, 30),
            &quiet_market(),
            &mut ZeroSampler,
        )
        .unwrap();
        assert_eq!(forecast.summary.trend_direction, TrendDirection::Rising);
    }

    #[test]
    fn trend_classification_is_idempotent_without_noise() {
        let run = || {
            predict(
                Commodity::Wheat,
                date(2026, 1, 1),
                date(2026, 3, 31),
                &quiet_market(),
                &mut ZeroSampler,
            )
            .unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.summary.trend_direction, b.summary.trend_direction);
        assert_eq!(a.summary.avg_cost, b.summary.avg_cost);
    }

    #[test]
    fn driver_argmax_follows_magnitudes() {
        let mut indicators = quiet_market();
        indicators.shipping_index = 150.0;
        indicators.supply_chain_stress_index = 80.0;
        let forecast = predict(
            Commodity::Wheat,
            date(2026, 1, 1),
            date(2026, 1, 1),
            &indicators,
            &mut ZeroSampler,
        )
        .unwrap();
        assert_eq!(
            forecast.predictions[0].main_cost_driver,
            CostDriver::ShippingCost
        );

        indicators.shipping_index = 10.0;
        indicators.insurance_risk_index = 0.9; // scales to 90
        let forecast = predict(
            Commodity::Wheat,
            date(2026, 1, 1),
            date(2026, 1, 1),
            &indicators,
            &mut ZeroSampler,
        )
        .unwrap();
        assert_eq!(
            forecast.predictions[0].main_cost_driver,
            CostDriver::InsuranceRiskPremium
        );
    }

    #[test]
    fn driver_tie_break_prefers_earlier_candidate() {
        let indicators = MarketIndicators {
            global_price_anomaly: -100.0,
            shipping_index: 100.0,
            insurance_risk_index: 0.0,
            supply_chain_stress_index: 100.0,
        };
        let forecast = predict(
            Commodity::Wheat,
            date(2026, 1, 1),
            date(2026, 1, 1),
            &indicators,
            &mut ZeroSampler,
        )
        .unwrap();
        assert_eq!(
            forecast.predictions[0].main_cost_driver,
            CostDriver::GlobalPriceAnomaly
        );
    }
}
