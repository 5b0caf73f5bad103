pub mod domain;
pub mod error;
pub mod pipeline;
pub mod sampling;
pub mod scenario;
pub mod stages;

pub mod config {
    use crate::domain::inputs::AlertThresholds;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub default_region: Option<String>,
        pub rng_seed: Option<u64>,
        pub alert_medium_pct: Option<f64>,
        pub alert_high_pct: Option<f64>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                default_region: std::env::var("SUPPLY_DEFAULT_REGION").ok(),
                rng_seed: parse_var("SUPPLY_RNG_SEED")?,
                alert_medium_pct: parse_var("SUPPLY_ALERT_MEDIUM_PCT")?,
                alert_high_pct: parse_var("SUPPLY_ALERT_HIGH_PCT")?,
            })
        }

        /// Threshold overrides from the environment, or `None` to use the
        /// stage defaults (medium 10%, high 15%).
        pub fn alert_thresholds(&self) -> Option<AlertThresholds> {
            match (self.alert_medium_pct, self.alert_high_pct) {
                (None, None) => None,
                (medium, high) => {
                    let defaults = AlertThresholds::default();
                    Some(AlertThresholds {
                        medium_pct: medium.unwrap_or(defaults.medium_pct),
                        high_pct: high.unwrap_or(defaults.high_pct),
                    })
                }
            }
        }

        pub fn region_or_default(&self) -> &str {
            self.default_region.as_deref().unwrap_or("YEM-01")
        }
    }

    fn parse_var<T: std::str::FromStr>(name: &str) -> anyhow::Result<Option<T>>
    where
        T::Err: std::fmt::Display,
    {
        match std::env::var(name) {
            Ok(raw) => match raw.trim().parse() {
                Ok(v) => Ok(Some(v)),
                Err(e) => anyhow::bail!("invalid {name}={raw}: {e}"),
            },
            Err(_) => Ok(None),
        }
    }
}
