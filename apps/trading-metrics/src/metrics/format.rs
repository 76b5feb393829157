//! Formatting utilities for metric display.

/// Placeholder rendered for a metric with no value yet.
pub const UNSET: &str = "N/A";

/// Format an optional metric value for display.
///
/// Unset renders as `N/A`, magnitudes of 1000 or more get thousands
/// separators, everything else is rounded to two decimals.
#[must_use]
pub fn format_metric(value: Option<f64>) -> String {
    value.map_or_else(|| UNSET.to_string(), format_value)
}

/// Format a metric value with two decimals.
#[must_use]
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.abs() >= 1000.0 {
        return group_thousands(&format!("{value:.2}"));
    }
    format!("{value:.2}")
}

/// Insert `,` separators into the integer part of a formatted number.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = formatted
        .strip_prefix('-')
        .map_or(("", formatted), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(None, "N/A" ; "unset")]
    #[test_case(Some(1.5678), "1.57" ; "small")]
    #[test_case(Some(0.0), "0.00" ; "zero")]
    #[test_case(Some(-20.0), "-20.00" ; "negative")]
    #[test_case(Some(999.994), "999.99" ; "just below threshold")]
    #[test_case(Some(1000.0), "1,000.00" ; "threshold")]
    #[test_case(Some(12_345.678), "12,345.68" ; "large")]
    #[test_case(Some(-1_234_567.891), "-1,234,567.89" ; "large negative")]
    #[test_case(Some(f64::INFINITY), "inf" ; "infinity")]
    fn test_format_metric(value: Option<f64>, expected: &str) {
        assert_eq!(format_metric(value), expected);
    }
}
