pub mod competitive_health;
pub mod cost_forecast;
pub mod early_warning;
pub mod local_production;
pub mod strategic_synthesis;

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
