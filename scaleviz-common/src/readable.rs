//! Human-readable magnitudes for hover text
//!
//! Adoption times are stored as day counts; hover labels show them in the
//! largest sensible unit.

/// Day-count thresholds for unit selection
const DECADE_DAYS: u32 = 3650;
const YEAR_DAYS: u32 = 365;
const MONTH_DAYS: u32 = 30;

/// Format a day count as an approximate duration.
///
/// - 10 years or more: whole years (`~10 years`)
/// - 1 year or more: one decimal (`~2.7 years`)
/// - 30 days or more: whole months (`~3 months`)
/// - otherwise: days (`14 days`)
///
/// # Examples
///
/// ```
/// use scaleviz_common::readable::days_to_readable;
///
/// assert_eq!(days_to_readable(3650), "~10 years");
/// assert_eq!(days_to_readable(1000), "~2.7 years");
/// assert_eq!(days_to_readable(60), "~2 months");
/// assert_eq!(days_to_readable(5), "5 days");
/// ```
pub fn days_to_readable(days: u32) -> String {
    if days >= DECADE_DAYS {
        format!("~{} years", days / YEAR_DAYS)
    } else if days >= YEAR_DAYS {
        format!("~{:.1} years", days as f64 / YEAR_DAYS as f64)
    } else if days >= MONTH_DAYS {
        format!("~{:.0} months", days as f64 / MONTH_DAYS as f64)
    } else {
        format!("{} days", days)
    }
}

/// Compact scientific notation used in hover text (`3.14e+23`)
pub fn scientific(value: f64) -> String {
    with_signed_exponent(&format!("{:.2e}", value))
}

/// At most `digits` significant digits, trailing zeros dropped
/// (`0.0045`, `90`, `4000`); very large or small values switch to
/// scientific notation (`1.234e+05`)
pub fn significant(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    if magnitude < -4 || magnitude >= digits as i32 {
        let formatted = format!("{:.*e}", digits - 1, value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                with_signed_exponent(&format!("{}e{}", trim_fraction(mantissa), exponent))
            }
            None => formatted,
        };
    }

    let decimals = (digits as i32 - 1 - magnitude).max(0) as usize;
    trim_fraction(&format!("{:.*}", decimals, value)).to_string()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Rust prints `3.14e23`; hover labels use the signed two-digit form
fn with_signed_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.strip_prefix('-') {
            Some(digits) => format!("{}e-{:0>2}", mantissa, digits),
            None => format!("{}e+{:0>2}", mantissa, exponent),
        },
        None => formatted.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decade_format_truncates() {
        assert_eq!(days_to_readable(3650), "~10 years");
        assert_eq!(days_to_readable(5000), "~13 years");
    }

    #[test]
    fn test_year_format() {
        assert_eq!(days_to_readable(365), "~1.0 years");
        assert_eq!(days_to_readable(3649), "~10.0 years");
    }

    #[test]
    fn test_month_format() {
        assert_eq!(days_to_readable(30), "~1 months");
        assert_eq!(days_to_readable(90), "~3 months");
        assert_eq!(days_to_readable(364), "~12 months");
    }

    #[test]
    fn test_day_format() {
        assert_eq!(days_to_readable(0), "0 days");
        assert_eq!(days_to_readable(29), "29 days");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(scientific(3.14e23), "3.14e+23");
        assert_eq!(scientific(6.5e-6), "6.50e-06");
        assert_eq!(scientific(10.0), "1.00e+01");
    }

    #[test]
    fn test_significant() {
        assert_eq!(significant(0.0045, 4), "0.0045");
        assert_eq!(significant(90.0, 4), "90");
        assert_eq!(significant(4000.0, 4), "4000");
        assert_eq!(significant(0.35, 4), "0.35");
        assert_eq!(significant(1.23456, 4), "1.235");
        assert_eq!(significant(123456.0, 4), "1.235e+05");
        assert_eq!(significant(0.00001, 4), "1e-05");
        assert_eq!(significant(0.0, 4), "0");
    }
}
