//! Normalization of raw form entry into [`ForecastInputs`].
//!
//! Entry widgets hand over text. Empty or non-numeric text becomes `0`, numeric
//! text keeps its leading integer, and percentage fields are clamped to the
//! slider bounds. The calculator never sees anything that skipped this step
//! unless a caller builds `ForecastInputs` directly.

use crate::domain::forecast::ForecastInputs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for PercentBounds {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

impl PercentBounds {
    pub fn clamp(&self, value: f64) -> f64 {
        if value > self.max {
            self.max
        } else if value < self.min {
            self.min
        } else {
            value
        }
    }
}

/// Form fields exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputs {
    pub total_prospects: String,
    pub open_rate: String,
    pub reply_rate: String,
    pub meeting_conversion: String,
    pub avg_deal_value: String,
}

impl RawInputs {
    pub fn normalize(&self, bounds: &PercentBounds) -> ForecastInputs {
        ForecastInputs {
            total_prospects: parse_count(&self.total_prospects),
            open_rate: parse_percent(&self.open_rate, bounds),
            reply_rate: parse_percent(&self.reply_rate, bounds),
            meeting_conversion: parse_percent(&self.meeting_conversion, bounds),
            avg_deal_value: parse_count(&self.avg_deal_value),
        }
    }
}

impl From<&ForecastInputs> for RawInputs {
    fn from(inputs: &ForecastInputs) -> Self {
        Self {
            total_prospects: inputs.total_prospects.to_string(),
            open_rate: inputs.open_rate.to_string(),
            reply_rate: inputs.reply_rate.to_string(),
            meeting_conversion: inputs.meeting_conversion.to_string(),
            avg_deal_value: inputs.avg_deal_value.to_string(),
        }
    }
}

/// Free-form numeric entry: leading integer, or `0` when there is none.
pub fn parse_count(text: &str) -> f64 {
    leading_integer(text).unwrap_or(0.0)
}

/// Slider entry: as [`parse_count`], then clamped to `bounds`.
pub fn parse_percent(text: &str, bounds: &PercentBounds) -> f64 {
    bounds.clamp(parse_count(text))
}

// "12abc" -> 12, "  -7.9" -> -7, "abc" / "" / "-" -> None.
fn leading_integer(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    let negative = trimmed.starts_with('-');

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }

    let magnitude: f64 = unsigned[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_garbage_become_zero() {
        assert_eq!(parse_count(""), 0.0);
        assert_eq!(parse_count("   "), 0.0);
        assert_eq!(parse_count("abc"), 0.0);
        assert_eq!(parse_count("-"), 0.0);
        assert_eq!(parse_count("e5"), 0.0);
    }

    #[test]
    fn leading_integer_is_kept() {
        assert_eq!(parse_count("10000"), 10_000.0);
        assert_eq!(parse_count("  42 "), 42.0);
        assert_eq!(parse_count("12abc"), 12.0);
        assert_eq!(parse_count("4.7"), 4.0);
        assert_eq!(parse_count("+15"), 15.0);
        assert_eq!(parse_count("-30"), -30.0);
    }

    #[test]
    fn percent_is_clamped() {
        let bounds = PercentBounds::default();
        assert_eq!(parse_percent("150", &bounds), 100.0);
        assert_eq!(parse_percent("-5", &bounds), 0.0);
        assert_eq!(parse_percent("37", &bounds), 37.0);
        assert_eq!(parse_percent("", &bounds), 0.0);
    }

    #[test]
    fn custom_bounds() {
        let bounds = PercentBounds {
            min: 5.0,
            max: 60.0,
        };
        assert_eq!(parse_percent("1", &bounds), 5.0);
        assert_eq!(parse_percent("99", &bounds), 60.0);
    }

    #[test]
    fn normalize_raw_form() {
        let raw = RawInputs {
            total_prospects: "2500".to_string(),
            open_rate: "120".to_string(),
            reply_rate: "oops".to_string(),
            meeting_conversion: "25".to_string(),
            avg_deal_value: "".to_string(),
        };
        let inputs = raw.normalize(&PercentBounds::default());
        assert_eq!(
            inputs,
            ForecastInputs {
                total_prospects: 2_500.0,
                open_rate: 100.0,
                reply_rate: 0.0,
                meeting_conversion: 25.0,
                avg_deal_value: 0.0,
            }
        );
    }

    #[test]
    fn raw_from_defaults_normalizes_back() {
        let defaults = ForecastInputs::default();
        let raw = RawInputs::from(&defaults);
        assert_eq!(raw.total_prospects, "10000");
        assert_eq!(raw.normalize(&PercentBounds::default()), defaults);
    }
}
