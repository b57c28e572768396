use crate::domain::forecast::{ForecastInputs, ForecastResults, Metric};
use crate::format::{format_currency_with, format_number};
use crate::funnel::calculate;
use crate::trend::{MetricTrends, Trend};
use serde::{Deserialize, Serialize};

/// One calculation together with its comparison against the prior one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub inputs: ForecastInputs,
    pub results: ForecastResults,
    pub previous: Option<ForecastResults>,
    pub trends: MetricTrends,
}

impl ForecastReport {
    pub fn new(inputs: ForecastInputs, previous: Option<ForecastResults>) -> Self {
        let results = calculate(&inputs);
        let trends = MetricTrends::between(&results, previous.as_ref());
        Self {
            inputs,
            results,
            previous,
            trends,
        }
    }

    pub fn cards(&self, currency_symbol: &str) -> Vec<ResultCard> {
        Metric::ALL
            .iter()
            .map(|&metric| ResultCard::new(metric, &self.results, &self.trends, currency_symbol))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCard {
    pub metric: Metric,
    pub icon: String,
    pub label: String,
    pub value: String,
    pub trend: Trend,
}

impl ResultCard {
    fn new(
        metric: Metric,
        results: &ForecastResults,
        trends: &MetricTrends,
        currency_symbol: &str,
    ) -> Self {
        let raw = results.get(metric);
        let value = if metric.is_currency() {
            format_currency_with(raw, currency_symbol)
        } else {
            format_number(raw)
        };

        Self {
            metric,
            icon: metric.icon().to_string(),
            label: metric.label().to_string(),
            value,
            trend: trends.get(metric),
        }
    }

    /// Single-line rendering, e.g. `📩 Estimated Opens: 5,000 ▲`.
    pub fn render_line(&self) -> String {
        match self.trend.marker() {
            Some(marker) => format!("{} {}: {} {marker}", self.icon, self.label, self.value),
            None => format!("{} {}: {}", self.icon, self.label, self.value),
        }
    }
}
