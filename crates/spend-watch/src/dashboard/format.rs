//! en-US display formatting for dashboard figures.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// US dollars show cents unless the caller asks for fewer digits.
const CURRENCY_FRACTION_DIGITS: u8 = 2;

/// Format an amount as US dollars, e.g. `$1,234,567.89`.
///
/// `max_fraction_digits` caps the fraction (compact cards pass `Some(0)`).
/// The shortest decimal form of the amount is rounded half away from zero to
/// that many digits, so `1.005` shows as `$1.01`. Non-finite input is passed
/// through rather than rejected.
pub fn format_currency(amount: f64, max_fraction_digits: Option<u8>) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount.is_sign_negative() {
            "-$∞".to_string()
        } else {
            "$∞".to_string()
        };
    }

    let max_digits = max_fraction_digits.unwrap_or(CURRENCY_FRACTION_DIGITS);
    let min_digits = max_digits.min(CURRENCY_FRACTION_DIGITS);
    let (fixed, is_zero) = round_half_away(amount.abs(), max_digits);
    let negative = amount.is_sign_negative() && !is_zero;

    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, trim_fraction(fraction, min_digits)),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_thousands(whole));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Thousands-grouped integer, e.g. `1,234,567`.
pub fn format_count(n: i64) -> String {
    let grouped = group_thousands(&n.unsigned_abs().to_string());
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Display form of a machine token: `OUTLIER_HIGH_SPEND` -> `OUTLIER HIGH SPEND`.
pub fn normalize_label(token: &str) -> String {
    token.replace('_', " ")
}

/// Fixed-point text of `value` with exactly `digits` fraction digits, and
/// whether it rounded to zero.
fn round_half_away(value: f64, digits: u8) -> (String, bool) {
    let shortest = value.to_string();
    let width = usize::from(digits);

    match Decimal::from_str(&shortest) {
        Ok(decimal) => {
            let rounded = decimal.round_dp_with_strategy(
                u32::from(digits),
                RoundingStrategy::MidpointAwayFromZero,
            );
            (format!("{rounded:.width$}"), rounded.is_zero())
        }
        // Beyond Decimal's range: either an integer too large to carry a
        // fraction or a value far below the smallest displayable digit.
        Err(_) => {
            let whole = if shortest.contains('.') {
                "0"
            } else {
                shortest.as_str()
            };
            let is_zero = whole.trim_start_matches('0').is_empty();
            let fixed = if width == 0 {
                whole.to_string()
            } else {
                format!("{whole}.{}", "0".repeat(width))
            };
            (fixed, is_zero)
        }
    }
}

fn trim_fraction(fraction: &str, min_digits: u8) -> &str {
    let min = usize::from(min_digits).min(fraction.len());
    let significant = fraction.trim_end_matches('0').len();
    &fraction[..significant.max(min)]
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_defaults_to_cents() {
        assert_eq!(format_currency(1_234_567.89, None), "$1,234,567.89");
        assert_eq!(format_currency(350.5, None), "$350.50");
        assert_eq!(format_currency(0.0, None), "$0.00");
        assert_eq!(format_currency(999.999, None), "$1,000.00");
    }

    #[test]
    fn currency_rounds_half_cents_in_decimal() {
        let formatted: Vec<String> = [1.005, 1.255, 0.015, 8.345, 2.675]
            .into_iter()
            .map(|amount| format_currency(amount, None))
            .collect();

        assert_eq!(formatted, ["$1.01", "$1.26", "$0.02", "$8.35", "$2.68"]);
        assert_eq!(format_currency(-1.005, None), "-$1.01");
        assert_eq!(format_currency(2.5, Some(0)), "$3");
        assert_eq!(format_currency(0.005, None), "$0.01");
        assert_eq!(format_currency(1e-30, None), "$0.00");
    }

    #[test]
    fn currency_respects_fraction_cap() {
        assert_eq!(format_currency(1_234.5, Some(0)), "$1,235");
        assert_eq!(format_currency(48_210_993.42, Some(0)), "$48,210,993");
        assert_eq!(format_currency(12.0, Some(0)), "$12");
        assert_eq!(format_currency(1.5, Some(4)), "$1.50");
        assert_eq!(format_currency(1.23456, Some(4)), "$1.2346");
    }

    #[test]
    fn currency_handles_sign_and_magnitude() {
        assert_eq!(format_currency(-1_234.0, None), "-$1,234.00");
        assert_eq!(format_currency(-0.001, None), "$0.00");
        assert_eq!(format_currency(1e15, None), "$1,000,000,000,000,000.00");
        assert_eq!(format_currency(f64::INFINITY, None), "$∞");
        assert_eq!(format_currency(f64::NEG_INFINITY, Some(0)), "-$∞");
        assert_eq!(format_currency(f64::NAN, None), "$NaN");
        assert!(format_currency(f64::MAX, None).starts_with("$179,769"));
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(-1_200), "-1,200");
        assert_eq!(format_count(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn labels_swap_underscores_for_spaces() {
        assert_eq!(normalize_label("OUTLIER_HIGH_SPEND"), "OUTLIER HIGH SPEND");
        assert_eq!(normalize_label("VOLUME"), "VOLUME");
        assert_eq!(normalize_label("__"), "  ");
    }
}
