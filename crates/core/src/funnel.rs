use crate::domain::forecast::{ForecastInputs, ForecastResults};

/// Runs the prospect pool through the funnel.
///
/// Each stage applies its rate to the previous stage's count. Nothing is rounded
/// or clamped here; out-of-range inputs propagate arithmetically.
pub fn calculate(inputs: &ForecastInputs) -> ForecastResults {
    let estimated_opens = inputs.total_prospects * (inputs.open_rate / 100.0);
    let estimated_replies = estimated_opens * (inputs.reply_rate / 100.0);
    let estimated_meetings = estimated_replies * (inputs.meeting_conversion / 100.0);
    let projected_roi = estimated_meetings * inputs.avg_deal_value;

    ForecastResults {
        estimated_opens,
        estimated_replies,
        estimated_meetings,
        projected_roi,
    }
}
