use serde::{Deserialize, Serialize};

/// Prospecting assumptions for one calculation.
///
/// Rates are percentages. They are expected to sit in `0..=100` but nothing here
/// enforces it; clamping belongs to [`crate::input`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastInputs {
    pub total_prospects: f64,
    pub open_rate: f64,
    pub reply_rate: f64,
    pub meeting_conversion: f64,
    pub avg_deal_value: f64,
}

impl Default for ForecastInputs {
    fn default() -> Self {
        Self {
            total_prospects: 10_000.0,
            open_rate: 50.0,
            reply_rate: 10.0,
            meeting_conversion: 20.0,
            avg_deal_value: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastResults {
    pub estimated_opens: f64,
    pub estimated_replies: f64,
    pub estimated_meetings: f64,
    pub projected_roi: f64,
}

impl ForecastResults {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::EstimatedOpens => self.estimated_opens,
            Metric::EstimatedReplies => self.estimated_replies,
            Metric::EstimatedMeetings => self.estimated_meetings,
            Metric::ProjectedRoi => self.projected_roi,
        }
    }
}

/// One displayed output of the funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    EstimatedOpens,
    EstimatedReplies,
    EstimatedMeetings,
    ProjectedRoi,
}

impl Metric {
    /// Display order, top of the funnel first.
    pub const ALL: [Metric; 4] = [
        Metric::EstimatedOpens,
        Metric::EstimatedReplies,
        Metric::EstimatedMeetings,
        Metric::ProjectedRoi,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::EstimatedOpens => "Estimated Opens",
            Metric::EstimatedReplies => "Estimated Replies",
            Metric::EstimatedMeetings => "Estimated Meetings",
            Metric::ProjectedRoi => "Projected ROI",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Metric::EstimatedOpens => "📩",
            Metric::EstimatedReplies => "💬",
            Metric::EstimatedMeetings => "📅",
            Metric::ProjectedRoi => "💵",
        }
    }

    pub fn is_currency(self) -> bool {
        matches!(self, Metric::ProjectedRoi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inputs_match_initial_form_state() {
        let inputs = ForecastInputs::default();
        assert_eq!(inputs.total_prospects, 10_000.0);
        assert_eq!(inputs.open_rate, 50.0);
        assert_eq!(inputs.reply_rate, 10.0);
        assert_eq!(inputs.meeting_conversion, 20.0);
        assert_eq!(inputs.avg_deal_value, 500.0);
    }

    #[test]
    fn get_reads_each_metric() {
        let results = ForecastResults {
            estimated_opens: 1.0,
            estimated_replies: 2.0,
            estimated_meetings: 3.0,
            projected_roi: 4.0,
        };
        let values: Vec<f64> = Metric::ALL.iter().map(|m| results.get(*m)).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn inputs_deserialize_from_snake_case_json() {
        let inputs: ForecastInputs = serde_json::from_str(
            r#"{"total_prospects":100,"open_rate":40,"reply_rate":5,"meeting_conversion":50,"avg_deal_value":1000}"#,
        )
        .unwrap();
        assert_eq!(inputs.total_prospects, 100.0);
        assert_eq!(inputs.avg_deal_value, 1000.0);
    }

    #[test]
    fn only_roi_is_currency() {
        assert!(Metric::ProjectedRoi.is_currency());
        assert!(!Metric::EstimatedMeetings.is_currency());
    }
}
