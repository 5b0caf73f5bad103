use crate::domain::inputs::{Commodity, EnvironmentalData, SeasonalFactor};
use crate::domain::production::{Impact, ImpactFactor, Outlook, ProductionOutlook};
use crate::sampling::Sampler;
use crate::stages::{round1, round2};
use chrono::NaiveDate;

const NDVI_WEIGHT: f64 = 0.45;
const RAINFALL_WEIGHT: f64 = 0.35;
const SEASON_WEIGHT: f64 = 0.20;

/// Scores agricultural output health for a region from environmental
/// indicators and the point in the crop calendar.
pub fn analyze(
    region_id: &str,
    commodity: Commodity,
    environmental: &EnvironmentalData,
    seasonal_factor: SeasonalFactor,
    _reference_date: NaiveDate,
    sampler: &mut dyn Sampler,
) -> ProductionOutlook {
    let (ndvi_score, ndvi_impact) = if environmental.ndvi_index >= 0.6 {
        (0.8, Impact::Positive)
    } else if environmental.ndvi_index >= 0.4 {
        (0.5, Impact::Neutral)
    } else {
        (0.2, Impact::Negative)
    };

    let rainfall = environmental.rainfall_anomaly;
    let (rain_score, rain_impact) = if (-50.0..=50.0).contains(&rainfall) {
        (0.8, Impact::Positive)
    } else if (-100.0..=100.0).contains(&rainfall) {
        (0.5, Impact::Neutral)
    } else {
        (0.2, Impact::Negative)
    };

    let season_score = match seasonal_factor {
        SeasonalFactor::Planting => 0.5,
        SeasonalFactor::Growing => 0.7,
        SeasonalFactor::Harvest => 0.9,
    };
    let season_impact = if season_score == 0.5 {
        Impact::Neutral
    } else {
        Impact::Positive
    };

    let impact_factors = vec![
        ImpactFactor {
            factor: "ndvi_index".to_string(),
            impact: ndvi_impact,
            weight: NDVI_WEIGHT,
        },
        ImpactFactor {
            factor: "rainfall_anomaly".to_string(),
            impact: rain_impact,
            weight: RAINFALL_WEIGHT,
        },
        ImpactFactor {
            factor: "seasonal_factor".to_string(),
            impact: season_impact,
            weight: SEASON_WEIGHT,
        },
    ];

    let overall_score =
        ndvi_score * NDVI_WEIGHT + rain_score * RAINFALL_WEIGHT + season_score * SEASON_WEIGHT;

    let (outlook, yield_multiplier) = if overall_score >= 0.65 {
        (Outlook::Good, 30.0)
    } else if overall_score >= 0.4 {
        (Outlook::Medium, 20.0)
    } else {
        (Outlook::Weak, 40.0)
    };
    let expected_yield_change_pct = round1((overall_score - 0.5) * yield_multiplier);

    // Data-quality estimate; the jitter stands in for a real coverage check.
    let reliability_score = round2(0.7 + sampler.uniform(0.0, 0.2));

    ProductionOutlook {
        region_id: region_id.to_string(),
        commodity_id: commodity,
        production_outlook: outlook,
        reliability_score,
        impact_factors,
        expected_yield_change_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::ZeroSampler;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn env(ndvi: f64, rainfall: f64) -> EnvironmentalData {
        EnvironmentalData {
            ndvi_index: ndvi,
            rainfall_anomaly: rainfall,
            temperature_anomaly: None,
        }
    }

    #[test]
    fn healthy_harvest_season_scores_good() {
        // 0.8*0.45 + 0.8*0.35 + 0.9*0.20 = 0.82
        let outlook = analyze(
            "YEM-01",
            Commodity::Wheat,
            &env(0.7, 0.0),
            SeasonalFactor::Harvest,
            date(2026, 8, 28),
            &mut ZeroSampler,
        );
        assert_eq!(outlook.production_outlook, Outlook::Good);
        assert_eq!(outlook.expected_yield_change_pct, 9.6);
    }

    #[test]
    fn drought_and_sparse_vegetation_score_weak() {
        // 0.2*0.45 + 0.2*0.35 + 0.5*0.20 = 0.26
        let outlook = analyze(
            "YEM-02",
            Commodity::Sugar,
            &env(0.2, 150.0),
            SeasonalFactor::Planting,
            date(2026, 8, 28),
            &mut ZeroSampler,
        );
        assert_eq!(outlook.production_outlook, Outlook::Weak);
        assert_eq!(outlook.expected_yield_change_pct, -9.6);
    }

    #[test]
    fn factor_weights_sum_to_one() {
        let outlook = analyze(
            "YEM-01",
            Commodity::Oil,
            &env(0.5, -80.0),
            SeasonalFactor::Growing,
            date(2026, 8, 28),
            &mut ZeroSampler,
        );
        let total: f64 = outlook.impact_factors.iter().map(|f| f.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(outlook.impact_factors[0].factor, "ndvi_index");
    }

    #[test]
    fn reliability_floor_without_jitter() {
        let outlook = analyze(
            "YEM-01",
            Commodity::Wheat,
            &env(0.7, 0.0),
            SeasonalFactor::Harvest,
            date(2026, 8, 28),
            &mut ZeroSampler,
        );
        assert_eq!(outlook.reliability_score, 0.7);
    }

    #[test]
    fn reliability_stays_in_band_with_jitter() {
        let mut sampler = crate::sampling::StdSampler::from_seed(11);
        for _ in 0..50 {
            let outlook = analyze(
                "YEM-01",
                Commodity::Wheat,
                &env(0.7, 0.0),
                SeasonalFactor::Harvest,
                date(2026, 8, 28),
                &mut sampler,
            );
            assert!((0.7..=0.9).contains(&outlook.reliability_score));
        }
    }
}
