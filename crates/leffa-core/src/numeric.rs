//! Lenient numeric coercion for provider JSON.
//!
//! The merchant API is inconsistent about numeric fields: `mrp` and `total`
//! arrive as decimal strings (`"1299.00"`), as JSON numbers, or not at all,
//! and `quantity` may be `"12"`, `12` or `"12.0"`. Every helper here reads
//! the longest leading numeric prefix the way a browser's `parseFloat` /
//! `parseInt` would and reports `None` for anything else. Callers decide the
//! fallback; aggregation code always falls back to zero.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

/// Parses the longest leading decimal number in `raw`.
///
/// Leading whitespace is skipped, a single `+`/`-` sign is accepted, and
/// parsing stops at the first character that cannot extend the number:
/// `"12.50 INR"` → `12.50`, `".5"` → `0.5`, `"7."` → `7`. An exponent is
/// honored when digits follow it (`"1e3"` → `1000`, `"2e"` → `2`). Values
/// outside `Decimal`'s range are `None`.
#[must_use]
pub fn parse_decimal_prefix(raw: &str) -> Option<Decimal> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let negative = bytes.first() == Some(&b'-');
    let digits_start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let mut end = digits_start;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let int_digits = end - digits_start;

    let mut frac_digits = 0usize;
    if bytes.get(end) == Some(&b'.') {
        let mut probe = end + 1;
        while bytes.get(probe).is_some_and(u8::is_ascii_digit) {
            probe += 1;
        }
        frac_digits = probe - end - 1;
        if frac_digits > 0 {
            end = probe;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    let int_part = if int_digits == 0 {
        "0"
    } else {
        &s[digits_start..digits_start + int_digits]
    };
    let frac_part = &s[digits_start + int_digits..end];
    let sign = if negative { "-" } else { "" };
    let mantissa = Decimal::from_str(&format!("{sign}{int_part}{frac_part}")).ok()?;

    // `"7.e2"` keeps its dot out of the mantissa but still carries an exponent.
    let exp_at = if frac_digits == 0 && bytes.get(end) == Some(&b'.') {
        end + 1
    } else {
        end
    };
    match parse_exponent(&s[exp_at..]) {
        Some(exp) => scale_by_power_of_ten(mantissa, exp),
        None => Some(mantissa),
    }
}

/// Reads an `e[+-]digits` marker at the start of `rest`.
fn parse_exponent(rest: &str) -> Option<i64> {
    let tail = rest.strip_prefix(['e', 'E'])?;
    let (negative, digits) = match tail.as_bytes().first() {
        Some(b'-') => (true, &tail[1..]),
        Some(b'+') => (false, &tail[1..]),
        _ => (false, tail),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    // Anything past i64 is out of range either way; saturate and let the
    // scaling step reject it.
    let magnitude = digits[..len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn scale_by_power_of_ten(value: Decimal, exp: i64) -> Option<Decimal> {
    let mut out = value;
    for _ in 0..exp.unsigned_abs() {
        if out.is_zero() {
            break;
        }
        out = if exp > 0 {
            out.checked_mul(Decimal::TEN)?
        } else {
            out.checked_div(Decimal::TEN)?
        };
    }
    Some(out)
}

/// Sums `values`, pinning at `Decimal::MAX` / `Decimal::MIN` instead of
/// overflowing.
#[must_use]
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Parses the longest leading integer in `raw`, truncating any fraction:
/// `"12"` → `12`, `"5.7"` → `5`, `"  3 pcs"` → `3`.
#[must_use]
pub fn parse_integer_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let mut end = digits_start;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    let digits = s[digits_start..end].parse::<i64>().ok()?;
    if bytes.first() == Some(&b'-') {
        Some(-digits)
    } else {
        Some(digits)
    }
}

/// Reads a decimal from a JSON string or number.
#[must_use]
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => parse_decimal_prefix(s),
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_u64().map(Decimal::from))
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        _ => None,
    }
}

/// Reads an integer from a JSON string or number, truncating fractions.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn integer_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => parse_integer_prefix(s),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        _ => None,
    }
}

/// JavaScript-style truthiness, used for the `a || b` field fallbacks the
/// merchant API relies on (`total || amount`, `createdAt || orderDate`).
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
