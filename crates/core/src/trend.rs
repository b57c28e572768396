use crate::domain::forecast::{ForecastResults, Metric};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Neutral,
}

impl Trend {
    /// Marker shown next to a value; neutral shows nothing.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Trend::Up => Some("▲"),
            Trend::Down => Some("▼"),
            Trend::Neutral => None,
        }
    }
}

/// Classifies `current` against the prior value of the same metric.
///
/// Anything that is neither equal nor greater counts as down, so a NaN on either
/// side reads as `Down`.
pub fn trend(current: f64, previous: Option<f64>) -> Trend {
    let Some(previous) = previous else {
        return Trend::Neutral;
    };
    if current == previous {
        Trend::Neutral
    } else if current > previous {
        Trend::Up
    } else {
        Trend::Down
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricTrends {
    pub estimated_opens: Trend,
    pub estimated_replies: Trend,
    pub estimated_meetings: Trend,
    pub projected_roi: Trend,
}

impl MetricTrends {
    pub fn between(current: &ForecastResults, previous: Option<&ForecastResults>) -> Self {
        let per = |metric: Metric| trend(current.get(metric), previous.map(|p| p.get(metric)));
        Self {
            estimated_opens: per(Metric::EstimatedOpens),
            estimated_replies: per(Metric::EstimatedReplies),
            estimated_meetings: per(Metric::EstimatedMeetings),
            projected_roi: per(Metric::ProjectedRoi),
        }
    }

    pub fn get(&self, metric: Metric) -> Trend {
        match metric {
            Metric::EstimatedOpens => self.estimated_opens,
            Metric::EstimatedReplies => self.estimated_replies,
            Metric::EstimatedMeetings => self.estimated_meetings,
            Metric::ProjectedRoi => self.projected_roi,
        }
    }
}
