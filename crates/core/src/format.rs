//! Display formatting for funnel metrics.
//!
//! Rounding happens here and nowhere else; the calculator hands over raw floats.

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Whole currency units with thousands separators, e.g. `$50,000` or `-$1,235`.
pub fn format_currency(value: f64) -> String {
    format_currency_with(value, DEFAULT_CURRENCY_SYMBOL)
}

pub fn format_currency_with(value: f64, symbol: &str) -> String {
    let (negative, body) = whole_number_body(value);
    if negative {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

/// Counts: one decimal place for fractional values strictly between 0 and 10,
/// otherwise a whole number with thousands separators.
pub fn format_number(value: f64) -> String {
    if value > 0.0 && value < 10.0 && value.fract() != 0.0 {
        let tenths = (value * 10.0).round() / 10.0;
        return format!("{tenths:.1}");
    }

    let (negative, body) = whole_number_body(value);
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

// Returns the sign separately so currency symbols can sit between sign and digits.
// Values that round to zero lose their sign.
fn whole_number_body(value: f64) -> (bool, String) {
    if value.is_nan() {
        return (false, "NaN".to_string());
    }
    if value.is_infinite() {
        return (value < 0.0, "∞".to_string());
    }

    let rounded = value.round();
    if rounded == 0.0 {
        return (false, "0".to_string());
    }
    let digits = format!("{:.0}", rounded.abs());
    (rounded < 0.0, group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
