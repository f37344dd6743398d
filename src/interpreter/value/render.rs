use std::iter;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Parses a decimal integer with an optional sign.
///
/// Leading zeros are accepted, so `"007"` parses to `7`.
#[must_use]
pub fn parse_integer(text: &str) -> Option<BigInt> {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigInt::parse_bytes(text.as_bytes(), 10)
}

/// Parses a positional decimal such as `"3.25"`, `"-0.5"` or `"3."`.
///
/// Text without a decimal point is accepted as well, which is how an integer
/// token is widened to a float. Exponent notation is not part of the
/// calculator's syntax and is rejected.
///
/// # Example
/// ```
/// use clicalc::interpreter::value::render::{parse_float, render_float};
///
/// let x = parse_float("3.").unwrap();
/// assert_eq!(render_float(&x), "3.0");
/// assert!(parse_float("1e5").is_none());
/// ```
#[must_use]
pub fn parse_float(text: &str) -> Option<BigDecimal> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.len() + fraction.len() == 0 || !is_digits(whole) || !is_digits(fraction) {
        return None;
    }

    let mut mantissa = BigInt::parse_bytes(format!("{whole}{fraction}").as_bytes(), 10)?;
    if negative {
        mantissa = -mantissa;
    }
    let scale = i64::try_from(fraction.len()).ok()?;
    Some(BigDecimal::new(mantissa, scale))
}

/// Renders an integer in decimal.
#[must_use]
pub fn render_integer(value: &BigInt) -> String {
    value.to_string()
}

/// Renders a decimal in plain positional notation.
///
/// The output always has at least one digit on each side of the point and no
/// trailing zeros after it, and zero is printed as `0.0`.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use clicalc::interpreter::value::render::render_float;
///
/// assert_eq!(render_float(&BigDecimal::new(12500.into(), 4)), "1.25");
/// assert_eq!(render_float(&BigDecimal::new((-5).into(), 3)), "-0.005");
/// assert_eq!(render_float(&BigDecimal::new(12.into(), -2)), "1200.0");
/// ```
#[must_use]
pub fn render_float(value: &BigDecimal) -> String {
    let (mantissa, mut scale) = value.as_bigint_and_exponent();
    if mantissa.is_zero() {
        return "0.0".to_owned();
    }

    let mut digits = mantissa.magnitude().to_string();
    while scale > 0 && digits.ends_with('0') {
        digits.pop();
        scale -= 1;
    }

    let mut out = String::with_capacity(digits.len() + 4);
    if mantissa.is_negative() {
        out.push('-');
    }

    let shift = usize::try_from(scale.unsigned_abs()).unwrap_or(usize::MAX);
    if scale <= 0 {
        out.push_str(&digits);
        out.extend(iter::repeat_n('0', shift));
        out.push_str(".0");
    } else if shift >= digits.len() {
        out.push_str("0.");
        out.extend(iter::repeat_n('0', shift - digits.len()));
        out.push_str(&digits);
    } else {
        let (whole, fraction) = digits.split_at(digits.len() - shift);
        out.push_str(whole);
        out.push('.');
        out.push_str(fraction);
    }
    out
}
