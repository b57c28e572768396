pub mod domain;
pub mod format;
pub mod funnel;
pub mod input;
pub mod report;
pub mod session;
pub mod trend;

pub mod config {
    use crate::format::DEFAULT_CURRENCY_SYMBOL;
    use crate::input::PercentBounds;
    use anyhow::Context;

    const DEFAULT_PORT: u16 = 3000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub port: u16,
        pub currency_symbol: String,
        pub percent_bounds: PercentBounds,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

            let port = match var("PORT") {
                Some(s) => s
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a port number (got {s:?})"))?,
                None => DEFAULT_PORT,
            };

            let defaults = PercentBounds::default();
            let min = parse_f64(var("FORECAST_PERCENT_MIN"), "FORECAST_PERCENT_MIN")?
                .unwrap_or(defaults.min);
            let max = parse_f64(var("FORECAST_PERCENT_MAX"), "FORECAST_PERCENT_MAX")?
                .unwrap_or(defaults.max);
            anyhow::ensure!(
                min <= max,
                "FORECAST_PERCENT_MIN ({min}) must not exceed FORECAST_PERCENT_MAX ({max})"
            );

            Ok(Self {
                sentry_dsn: var("SENTRY_DSN"),
                port,
                currency_symbol: var("FORECAST_CURRENCY_SYMBOL")
                    .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
                percent_bounds: PercentBounds { min, max },
            })
        }
    }

    fn parse_f64(value: Option<String>, key: &str) -> anyhow::Result<Option<f64>> {
        value
            .map(|s| {
                s.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .with_context(|| format!("{key} must be a finite number (got {s:?})"))
            })
            .transpose()
    }

}
