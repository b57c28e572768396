use crate::domain::forecast::{ForecastInputs, ForecastResults};
use crate::report::ForecastReport;

/// Caller-held history for trend display.
///
/// Only the latest results are kept; each calculation demotes them to
/// "previous" and replaces them wholesale.
#[derive(Debug, Clone, Default)]
pub struct ForecastSession {
    latest: Option<ForecastResults>,
}

impl ForecastSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calculate(&mut self, inputs: ForecastInputs) -> ForecastReport {
        let report = ForecastReport::new(inputs, self.latest.take());
        tracing::debug!(
            opens = report.results.estimated_opens,
            replies = report.results.estimated_replies,
            meetings = report.results.estimated_meetings,
            roi = report.results.projected_roi,
            has_previous = report.previous.is_some(),
            "forecast calculated"
        );
        self.latest = Some(report.results);
        report
    }

    pub fn latest(&self) -> Option<&ForecastResults> {
        self.latest.as_ref()
    }

    pub fn reset(&mut self) {
        self.latest = None;
    }
}
