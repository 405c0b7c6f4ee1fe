//! Decimal-comma number handling for the es-ES locale.
//!
//! Form fields hold text such as `"1.234.567,89"`: `.` groups thousands and
//! `,` marks the decimal point. Parsing reads the longest leading number, so
//! `"250.000 €"` is 250000; text with no leading number becomes `NaN`, which
//! downstream formulas coerce to zero through [`safe`].

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Parse decimal-comma text into a number, or `NaN` when it does not start
/// with one. Trailing text after the number is ignored.
pub fn parse_locale_number(text: &str) -> f64 {
    let normalised: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let prefix = numeric_prefix(&normalised);
    if prefix.is_empty() {
        return f64::NAN;
    }

    match prefix.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => f64::NAN,
    }
}

/// Longest leading `[+-]digits[.digits][e[+-]digits]` slice, or `""`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            mantissa_digits += frac_end - end - 1;
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Render a number for an input field: `,` as decimal separator, no grouping.
pub fn format_for_editing(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    value.to_string().replace('.', ",")
}

/// Coerce a missing value to zero before arithmetic.
#[inline]
pub fn safe(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

#[inline]
pub fn is_num(value: f64) -> bool {
    value.is_finite()
}

/// Round a currency amount to whole units for display. `None` for NaN/inf.
pub fn round_money(value: Money) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Whole-euro amount with es-ES grouping, e.g. `"250.000 €"`.
///
/// es-ES only groups numbers of five or more integer digits, so `1234`
/// renders as `"1234 €"`. Empty string for missing values.
pub fn format_currency(value: Money) -> String {
    let Some(rounded) = round_money(value) else {
        return String::new();
    };

    let digits = rounded.abs().trunc().to_string();
    let grouped = if digits.len() > 4 {
        group_thousands(&digits)
    } else {
        digits
    };

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped} €")
    } else {
        format!("{grouped} €")
    }
}

/// Percentage with two decimals, or `"–"` when undefined.
pub fn format_pct(value: f64) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    format!("{value:.2}%")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_and_grouped() {
        assert_eq!(parse_locale_number("250000"), 250000.0);
        assert_eq!(parse_locale_number("250.000"), 250000.0);
        assert_eq!(parse_locale_number("1.234.567,89"), 1234567.89);
        assert_eq!(parse_locale_number("3,2"), 3.2);
    }

    #[test]
    fn test_parse_strips_whitespace() {
        assert_eq!(parse_locale_number("  1 200,5 "), 1200.5);
        assert_eq!(parse_locale_number("-3,5"), -3.5);
    }

    #[test]
    fn test_parse_rejects_empty_and_garbage() {
        assert!(parse_locale_number("").is_nan());
        assert!(parse_locale_number("   ").is_nan());
        assert!(parse_locale_number("abc").is_nan());
        assert!(parse_locale_number("€ 100").is_nan());
        assert!(parse_locale_number("-").is_nan());
        assert!(parse_locale_number(",").is_nan());
        assert!(parse_locale_number("inf").is_nan());
        assert!(parse_locale_number("1e999").is_nan());
    }

    #[test]
    fn test_parse_reads_leading_number() {
        assert_eq!(parse_locale_number("250.000 €"), 250000.0);
        assert_eq!(parse_locale_number("12abc"), 12.0);
        assert_eq!(parse_locale_number("1,2,3"), 1.2);
        assert_eq!(parse_locale_number("7%"), 7.0);
        assert_eq!(parse_locale_number("12,"), 12.0);
        assert_eq!(parse_locale_number(",5"), 0.5);
        assert_eq!(parse_locale_number("2e3x"), 2000.0);
        assert_eq!(parse_locale_number("4e"), 4.0);
        assert_eq!(parse_locale_number("+8"), 8.0);
    }

    #[test]
    fn test_format_for_editing() {
        assert_eq!(format_for_editing(3.2), "3,2");
        assert_eq!(format_for_editing(250000.0), "250000");
        assert_eq!(format_for_editing(f64::NAN), "");
    }

    #[test]
    fn test_edit_round_trip() {
        for x in [0.0, 1.0, 3.2, -7.25, 1234567.89, 0.0001, 99999.999, 1e-7] {
            assert_eq!(parse_locale_number(&format_for_editing(x)), x, "round trip of {x}");
        }
    }

    #[test]
    fn test_safe_and_is_num() {
        assert_eq!(safe(f64::NAN), 0.0);
        assert_eq!(safe(12.5), 12.5);
        assert!(is_num(1.0));
        assert!(!is_num(f64::NAN));
        assert!(!is_num(f64::INFINITY));
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(1234.5), Some(dec!(1235)));
        assert_eq!(round_money(0.4), Some(dec!(0)));
        assert_eq!(round_money(f64::NAN), None);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(250000.0), "250.000 €");
        assert_eq!(format_currency(1234.4), "1234 €");
        assert_eq!(format_currency(1234567.89), "1.234.568 €");
        assert_eq!(format_currency(-15000.0), "-15.000 €");
        assert_eq!(format_currency(f64::NAN), "");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(12.3456), "12.35%");
        assert_eq!(format_pct(f64::NAN), "–");
    }
}
