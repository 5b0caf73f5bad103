use crate::domain::inputs::{AlertThresholds, Commodity, CostPoint, HistoricalBaseline};
use crate::domain::warning::{AlertDetails, AlertLevel, EarlyWarningResult};
use crate::error::PipelineError;
use crate::stages::{round1, round2};
use chrono::NaiveDate;

/// Flags abnormal cost spikes in a series against the 90-day historical
/// baseline. `today` is passed in so the days-until-peak math is not tied
/// to the wall clock.
pub fn analyze(
    commodity: Commodity,
    points: &[CostPoint],
    baseline: Option<&HistoricalBaseline>,
    thresholds: Option<AlertThresholds>,
    today: NaiveDate,
) -> Result<EarlyWarningResult, PipelineError> {
    if points.is_empty() {
        return Err(PipelineError::EmptySeries);
    }
    let baseline = baseline.ok_or(PipelineError::MissingBaseline {
        detail: "no historical baseline supplied",
    })?;
    if baseline.avg_cost_90d <= 0.0 {
        return Err(PipelineError::MissingBaseline {
            detail: "avg_cost_90d must be positive",
        });
    }

    let thresholds = thresholds.unwrap_or_default();
    let peak = peak_point(points);

    let increase_pct =
        (peak.cost - baseline.avg_cost_90d) / baseline.avg_cost_90d * 100.0;

    let (alert_level, recommended_action) = if increase_pct >= thresholds.high_pct {
        (AlertLevel::High, "Consider immediate procurement")
    } else if increase_pct >= thresholds.medium_pct {
        (
            AlertLevel::Medium,
            "Monitor closely, prepare contingency plans",
        )
    } else {
        (AlertLevel::Low, "Continue normal operations")
    };

    let trigger_reason = if increase_pct > 20.0 {
        "Severe cost deviation detected - multiple risk factors converging"
    } else if increase_pct > 10.0 {
        "Shipping index surge combined with global price anomaly"
    } else {
        "Normal market fluctuation within expected range"
    };

    let days_until_peak = (peak.date - today).num_days().max(0);

    Ok(EarlyWarningResult {
        commodity_id: commodity,
        supply_alert_level: alert_level,
        expected_increase_percentage: round1(increase_pct),
        trigger_reason: trigger_reason.to_string(),
        alert_details: AlertDetails {
            peak_date: peak.date,
            peak_cost: round2(peak.cost),
            days_until_peak,
        },
        recommended_action: recommended_action.to_string(),
    })
}

/// Maximum-cost point; ties resolve to the earliest date so the result is
/// deterministic for unsorted input.
fn peak_point(points: &[CostPoint]) -> &CostPoint {
    let mut best = &points[0];
    for point in &points[1..] {
        if point.cost > best.cost || (point.cost == best.cost && point.date < best.date) {
            best = point;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn baseline(avg_90d: f64) -> HistoricalBaseline {
        HistoricalBaseline {
            avg_cost_30d: avg_90d * 1.05,
            avg_cost_90d: avg_90d,
            std_dev: 50.0,
        }
    }

    #[test]
    fn twenty_percent_spike_raises_high_alert() {
        let points = vec![CostPoint {
            date: date(2026, 9, 15),
            cost: 600.0 * 1.20,
        }];
        let result = analyze(
            Commodity::Wheat,
            &points,
            Some(&baseline(600.0)),
            None,
            date(2026, 8, 28),
        )
        .unwrap();
        assert_eq!(result.supply_alert_level, AlertLevel::High);
        assert!((result.expected_increase_percentage - 20.0).abs() < 1e-9);
    }

    #[test]
    fn medium_band_between_thresholds() {
        let points = vec![CostPoint {
            date: date(2026, 9, 15),
            cost: 672.0, // +12% over 600
        }];
        let result = analyze(
            Commodity::Wheat,
            &points,
            Some(&baseline(600.0)),
            None,
            date(2026, 8, 28),
        )
        .unwrap();
        assert_eq!(result.supply_alert_level, AlertLevel::Medium);
        assert_eq!(
            result.trigger_reason,
            "Shipping index surge combined with global price anomaly"
        );
    }

    #[test]
    fn empty_series_is_rejected() {
        let err = analyze(
            Commodity::Sugar,
            &[],
            Some(&baseline(600.0)),
            None,
            date(2026, 8, 28),
        )
        .unwrap_err();
        assert_eq!(err, PipelineError::EmptySeries);
    }

    #[test]
    fn missing_baseline_is_rejected() {
        let points = vec![CostPoint {
            date: date(2026, 9, 15),
            cost: 700.0,
        }];
        let err = analyze(Commodity::Sugar, &points, None, None, date(2026, 8, 28))
            .unwrap_err();
        assert_eq!(err.code(), "MISSING_BASELINE");
    }

    #[test]
    fn peak_ties_resolve_to_earliest_date() {
        let points = vec![
            CostPoint {
                date: date(2026, 10, 1),
                cost: 700.0,
            },
            CostPoint {
                date: date(2026, 9, 1),
                cost: 700.0,
            },
            CostPoint {
                date: date(2026, 11, 1),
                cost: 650.0,
            },
        ];
        let result = analyze(
            Commodity::Oil,
            &points,
            Some(&baseline(600.0)),
            None,
            date(2026, 8, 28),
        )
        .unwrap();
        assert_eq!(result.alert_details.peak_date, date(2026, 9, 1));
    }

    #[test]
    fn days_until_peak_never_negative() {
        let points = vec![CostPoint {
            date: date(2026, 6, 1),
            cost: 700.0,
        }];
        let result = analyze(
            Commodity::Wheat,
            &points,
            Some(&baseline(600.0)),
            None,
            date(2026, 8, 28),
        )
        .unwrap();
        assert_eq!(result.alert_details.days_until_peak, 0);
    }

    #[test]
    fn custom_thresholds_shift_the_bands() {
        let points = vec![CostPoint {
            date: date(2026, 9, 15),
            cost: 636.0, // +6% over 600
        }];
        let thresholds = AlertThresholds {
            medium_pct: 5.0,
            high_pct: 25.0,
        };
        let result = analyze(
            Commodity::Wheat,
            &points,
            Some(&baseline(600.0)),
            Some(thresholds),
            date(2026, 8, 28),
        )
        .unwrap();
        assert_eq!(result.supply_alert_level, AlertLevel::Medium);
    }
}
